//! CSS values: the tagged [`CssValue`], ARGB colors, and the closed set of
//! keyword values ([`ValueType`]).

use std::fmt;

use strum::{AsRefStr, EnumCount, EnumIter, EnumString};

/// A recognized keyword value.
///
/// Every keyword spelling maps to exactly one variant (ASCII case-insensitive)
/// and `as_ref()` returns the canonical lower-case spelling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, AsRefStr, EnumIter,
    EnumCount,
)]
#[strum(ascii_case_insensitive)]
pub enum ValueType {
    #[strum(serialize = "none")]
    None,
    #[strum(serialize = "transparent")]
    Transparent,

    // Font weight / style
    #[strum(serialize = "bold")]
    Bold,
    #[strum(serialize = "normal")]
    Normal,
    #[strum(serialize = "italic")]
    Italic,
    #[strum(serialize = "oblique")]
    Oblique,

    // Text overflow / decoration
    #[strum(serialize = "clip")]
    Clip,
    #[strum(serialize = "ellipsis")]
    Ellipsis,
    #[strum(serialize = "wrap")]
    Wrap,
    #[strum(serialize = "underline")]
    Underline,
    #[strum(serialize = "overline")]
    Overline,
    #[strum(serialize = "line-through")]
    LineThrough,

    // Border / underline styles
    #[strum(serialize = "dashed")]
    Dashed,
    #[strum(serialize = "dot-dash")]
    DotDash,
    #[strum(serialize = "dot-dot-dash")]
    DotDotDash,
    #[strum(serialize = "dotted")]
    Dotted,
    #[strum(serialize = "solid")]
    Solid,
    #[strum(serialize = "wave")]
    Wave,

    // Background origin / clip boxes
    #[strum(serialize = "padding")]
    Padding,
    #[strum(serialize = "border")]
    Border,
    #[strum(serialize = "content")]
    Content,
    #[strum(serialize = "margin")]
    Margin,

    // Alignment
    #[strum(serialize = "top")]
    Top,
    #[strum(serialize = "right")]
    Right,
    #[strum(serialize = "left")]
    Left,
    #[strum(serialize = "bottom")]
    Bottom,
    #[strum(serialize = "center")]
    Center,

    // Repeat / stretch
    #[strum(serialize = "no-repeat")]
    NoRepeat,
    #[strum(serialize = "repeat-x")]
    RepeatX,
    #[strum(serialize = "repeat-y")]
    RepeatY,
    #[strum(serialize = "repeat")]
    Repeat,
    #[strum(serialize = "stretch")]
    Stretch,

    #[strum(serialize = "true")]
    True,

    // Cursor shapes
    #[strum(serialize = "default")]
    Default,
    #[strum(serialize = "app-starting")]
    AppStarting,
    #[strum(serialize = "cross")]
    Cross,
    #[strum(serialize = "hand")]
    Hand,
    #[strum(serialize = "help")]
    Help,
    #[strum(serialize = "ibeam")]
    IBeam,
    #[strum(serialize = "wait")]
    Wait,
    #[strum(serialize = "forbidden")]
    Forbidden,
    #[strum(serialize = "up-arrow")]
    UpArrow,
    #[strum(serialize = "size-all")]
    SizeAll,
    #[strum(serialize = "size-ver")]
    SizeVer,
    #[strum(serialize = "size-hor")]
    SizeHor,
    #[strum(serialize = "size-bdiag")]
    SizeBDiag,
    #[strum(serialize = "size-fdiag")]
    SizeFDiag,
    #[strum(serialize = "blank")]
    Blank,

    #[strum(serialize = "single-loop")]
    SingleLoop,
}

impl ValueType {
    /// Look up a keyword, ignoring ASCII case.
    pub fn from_keyword(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Returns `true` for the cursor-shape keywords.
    pub fn is_cursor(self) -> bool {
        (ValueType::Default as u8..=ValueType::Blank as u8).contains(&(self as u8))
    }

    /// Returns `true` for the border/underline line-style keywords.
    pub fn is_line_style(self) -> bool {
        (ValueType::Dashed as u8..=ValueType::Wave as u8).contains(&(self as u8))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// A color stored as a packed 32-bit `0xAARRGGBB` integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb(pub u32);

impl Argb {
    /// Pack 8-bit channels.
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(
            (u32::from(alpha) << 24)
                | (u32::from(red) << 16)
                | (u32::from(green) << 8)
                | u32::from(blue),
        )
    }

    /// Parse a CSS color: hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), a
    /// named color, or a functional form such as `rgb(1, 2, 3)`.
    ///
    /// Functional alpha is a fraction: `rgba(0, 0, 0, 0.5)` is half
    /// transparent, and anything above `1` clamps to opaque.
    pub fn parse(input: &str) -> Option<Self> {
        let parsed: csscolorparser::Color = input.parse().ok()?;
        let [red, green, blue, alpha] = parsed.to_rgba8();
        Some(Self::from_rgba8(red, green, blue, alpha))
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Returns `true` if the color is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.alpha() == 0xff
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// Discriminant of a [`CssValue`], for diagnostics and acceptance checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Unknown,
    Number,
    Length,
    Identifier,
    Uri,
    Color,
    String,
}

/// A single declared value.
///
/// Each variant carries only its own payload, so reading a color out of a
/// length is a type error rather than a runtime reinterpretation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CssValue {
    #[default]
    Unknown,
    /// A unit-less integer.
    Number(i32),
    /// A length in pixels.
    Length(i32),
    /// A recognized keyword.
    Identifier(ValueType),
    /// The contents of `url(...)`.
    Uri(String),
    Color(Argb),
    /// A quoted string (quotes removed).
    String(String),
}

impl CssValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            CssValue::Unknown => ValueKind::Unknown,
            CssValue::Number(_) => ValueKind::Number,
            CssValue::Length(_) => ValueKind::Length,
            CssValue::Identifier(_) => ValueKind::Identifier,
            CssValue::Uri(_) => ValueKind::Uri,
            CssValue::Color(_) => ValueKind::Color,
            CssValue::String(_) => ValueKind::String,
        }
    }

    /// The color payload.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a [`CssValue::Color`]. Callers must check
    /// [`kind`](Self::kind) first or use [`as_color`](Self::as_color).
    pub fn color(&self) -> Argb {
        match self {
            CssValue::Color(argb) => *argb,
            other => panic!("CssValue::color called on a {:?} value", other.kind()),
        }
    }

    pub fn as_color(&self) -> Option<Argb> {
        match self {
            CssValue::Color(argb) => Some(*argb),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<ValueType> {
        match self {
            CssValue::Identifier(keyword) => Some(*keyword),
            _ => None,
        }
    }

    /// The pixel value of a length, also accepting a bare number.
    pub fn as_length(&self) -> Option<i32> {
        match self {
            CssValue::Length(px) | CssValue::Number(px) => Some(*px),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i32> {
        match self {
            CssValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text payload of a `Uri` or `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CssValue::Uri(s) | CssValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssValue::Unknown => f.write_str("<unknown>"),
            CssValue::Number(n) => write!(f, "{n}"),
            CssValue::Length(px) => write!(f, "{px}px"),
            CssValue::Identifier(keyword) => f.write_str(keyword.as_ref()),
            CssValue::Uri(uri) => write!(f, "url({uri})"),
            CssValue::Color(argb) => write!(f, "{argb}"),
            CssValue::String(s) => write!(f, "{s:?}"),
        }
    }
}
