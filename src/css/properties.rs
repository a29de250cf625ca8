//! The closed set of style properties and the value kinds each one accepts.

use std::fmt;

use strum::{AsRefStr, EnumCount, EnumIter, EnumString};

use crate::css::value::{CssValue, ValueType};

/// A recognized property name.
///
/// Variant order is stable: [`PropertyType::index`] is used to address the
/// slots of a resolved [`crate::css::render_rule::RenderRule`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, AsRefStr, EnumIter,
    EnumCount,
)]
#[strum(ascii_case_insensitive)]
pub enum PropertyType {
    #[strum(serialize = "inherit-background")]
    InheritBackground,
    #[strum(serialize = "background")]
    Background,
    #[strum(serialize = "background-clip")]
    BackgroundClip,
    #[strum(serialize = "background-repeat")]
    BackgroundRepeat,
    #[strum(serialize = "background-position")]
    BackgroundPosition,
    #[strum(serialize = "background-size")]
    BackgroundSize,
    #[strum(serialize = "background-alignment")]
    BackgroundAlignment,

    #[strum(serialize = "border-image")]
    BorderImage,

    #[strum(serialize = "border")]
    Border,
    #[strum(serialize = "border-width")]
    BorderWidth,
    #[strum(serialize = "border-color")]
    BorderColor,
    #[strum(serialize = "border-style")]
    BorderStyles,
    #[strum(serialize = "border-top")]
    BorderTop,
    #[strum(serialize = "border-right")]
    BorderRight,
    #[strum(serialize = "border-bottom")]
    BorderBottom,
    #[strum(serialize = "border-left")]
    BorderLeft,
    #[strum(serialize = "border-top-width")]
    BorderTopWidth,
    #[strum(serialize = "border-right-width")]
    BorderRightWidth,
    #[strum(serialize = "border-bottom-width")]
    BorderBottomWidth,
    #[strum(serialize = "border-left-width")]
    BorderLeftWidth,
    #[strum(serialize = "border-top-color")]
    BorderTopColor,
    #[strum(serialize = "border-right-color")]
    BorderRightColor,
    #[strum(serialize = "border-bottom-color")]
    BorderBottomColor,
    #[strum(serialize = "border-left-color")]
    BorderLeftColor,
    #[strum(serialize = "border-top-style")]
    BorderTopStyle,
    #[strum(serialize = "border-right-style")]
    BorderRightStyle,
    #[strum(serialize = "border-bottom-style")]
    BorderBottomStyle,
    #[strum(serialize = "border-left-style")]
    BorderLeftStyle,
    #[strum(serialize = "border-top-left-radius")]
    BorderTopLeftRadius,
    #[strum(serialize = "border-top-right-radius")]
    BorderTopRightRadius,
    #[strum(serialize = "border-bottom-left-radius")]
    BorderBottomLeftRadius,
    #[strum(serialize = "border-bottom-right-radius")]
    BorderBottomRightRadius,
    #[strum(serialize = "border-radius")]
    BorderRadius,

    #[strum(serialize = "margin")]
    Margin,
    #[strum(serialize = "margin-top")]
    MarginTop,
    #[strum(serialize = "margin-right")]
    MarginRight,
    #[strum(serialize = "margin-bottom")]
    MarginBottom,
    #[strum(serialize = "margin-left")]
    MarginLeft,
    #[strum(serialize = "padding")]
    Padding,
    #[strum(serialize = "padding-top")]
    PaddingTop,
    #[strum(serialize = "padding-right")]
    PaddingRight,
    #[strum(serialize = "padding-bottom")]
    PaddingBottom,
    #[strum(serialize = "padding-left")]
    PaddingLeft,

    #[strum(serialize = "width")]
    Width,
    #[strum(serialize = "height")]
    Height,
    #[strum(serialize = "min-width")]
    MinimumWidth,
    #[strum(serialize = "min-height")]
    MinimumHeight,
    #[strum(serialize = "max-width")]
    MaximumWidth,
    #[strum(serialize = "max-height")]
    MaximumHeight,

    #[strum(serialize = "cursor")]
    Cursor,

    /// Also accepted as `font-family`.
    #[strum(to_string = "font", serialize = "font-family")]
    Font,
    #[strum(serialize = "font-size")]
    FontSize,
    #[strum(serialize = "font-style")]
    FontStyle,
    #[strum(serialize = "font-weight")]
    FontWeight,
    #[strum(serialize = "color")]
    Color,
    #[strum(serialize = "text-align")]
    TextAlignment,
    #[strum(serialize = "text-decoration")]
    TextDecoration,
    #[strum(serialize = "text-overflow")]
    TextOverflow,
    #[strum(serialize = "text-underline-style")]
    TextUnderlineStyle,
    #[strum(serialize = "text-outline")]
    TextOutline,
    #[strum(serialize = "text-shadow")]
    TextShadow,
}

/// Groups of properties sharing the same accepted value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueGroup {
    Color,
    Length,
    Border,
    BorderStyle,
    Background,
    Cursor,
    Font,
    Text,
}

impl PropertyType {
    /// Look up a property by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Dense slot index in `0..PropertyType::COUNT`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn group(self) -> ValueGroup {
        use PropertyType::*;
        match self {
            Color | BorderColor | BorderTopColor | BorderRightColor | BorderBottomColor
            | BorderLeftColor => ValueGroup::Color,
            BorderWidth | BorderTopWidth | BorderRightWidth | BorderBottomWidth
            | BorderLeftWidth | BorderTopLeftRadius | BorderTopRightRadius
            | BorderBottomLeftRadius | BorderBottomRightRadius | BorderRadius | Margin
            | MarginTop | MarginRight | MarginBottom | MarginLeft | Padding | PaddingTop
            | PaddingRight | PaddingBottom | PaddingLeft | Width | Height | MinimumWidth
            | MinimumHeight | MaximumWidth | MaximumHeight | FontSize => ValueGroup::Length,
            Border | BorderTop | BorderRight | BorderBottom | BorderLeft => ValueGroup::Border,
            BorderStyles | BorderTopStyle | BorderRightStyle | BorderBottomStyle
            | BorderLeftStyle => ValueGroup::BorderStyle,
            InheritBackground | Background | BackgroundClip | BackgroundRepeat
            | BackgroundPosition | BackgroundSize | BackgroundAlignment | BorderImage => {
                ValueGroup::Background
            }
            Cursor => ValueGroup::Cursor,
            Font | FontStyle | FontWeight => ValueGroup::Font,
            TextAlignment | TextDecoration | TextOverflow | TextUnderlineStyle | TextOutline
            | TextShadow => ValueGroup::Text,
        }
    }

    /// Whether `value` is of a kind this property can use.
    ///
    /// Values that fail this check are dropped from the declaration.
    pub fn accepts(self, value: &CssValue) -> bool {
        match (self.group(), value) {
            (_, CssValue::Unknown) => false,
            (ValueGroup::Color, CssValue::Color(_)) => true,
            (
                ValueGroup::Color,
                CssValue::Identifier(ValueType::Transparent | ValueType::None),
            ) => true,
            (ValueGroup::Length, CssValue::Length(_) | CssValue::Number(_)) => true,
            (
                ValueGroup::Border,
                CssValue::Length(_) | CssValue::Number(_) | CssValue::Color(_),
            ) => true,
            (ValueGroup::Border, CssValue::Identifier(ValueType::Transparent)) => true,
            (ValueGroup::Border | ValueGroup::BorderStyle, CssValue::Identifier(keyword)) => {
                keyword.is_line_style() || *keyword == ValueType::None
            }
            (ValueGroup::Background, _) => true,
            (ValueGroup::Cursor, CssValue::Identifier(keyword)) => keyword.is_cursor(),
            (ValueGroup::Cursor, CssValue::Uri(_)) => true,
            (
                ValueGroup::Font,
                CssValue::String(_)
                | CssValue::Identifier(_)
                | CssValue::Length(_)
                | CssValue::Number(_),
            ) => true,
            (
                ValueGroup::Text,
                CssValue::Identifier(_)
                | CssValue::Color(_)
                | CssValue::Length(_)
                | CssValue::Number(_),
            ) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::value::Argb;
    use strum::IntoEnumIterator;

    #[test]
    fn property_round_trip() {
        for property in PropertyType::iter() {
            assert_eq!(PropertyType::from_name(property.as_ref()), Some(property));
        }
    }

    #[test]
    fn property_indices_are_dense() {
        for (i, property) in PropertyType::iter().enumerate() {
            assert_eq!(property.index(), i);
        }
        assert_eq!(PropertyType::TextShadow.index(), PropertyType::COUNT - 1);
    }

    #[test]
    fn property_lookup_case_insensitive() {
        assert_eq!(PropertyType::from_name("Min-Width"), Some(PropertyType::MinimumWidth));
        assert_eq!(PropertyType::from_name("TEXT-ALIGN"), Some(PropertyType::TextAlignment));
        assert_eq!(PropertyType::from_name("display"), None);
    }

    #[test]
    fn color_group_accepts_colors_only() {
        let p = PropertyType::Color;
        assert!(p.accepts(&CssValue::Color(Argb(0xff00_0000))));
        assert!(p.accepts(&CssValue::Identifier(ValueType::Transparent)));
        assert!(!p.accepts(&CssValue::Length(3)));
        assert!(!p.accepts(&CssValue::Identifier(ValueType::Bold)));
    }

    #[test]
    fn length_group() {
        let p = PropertyType::MarginLeft;
        assert!(p.accepts(&CssValue::Length(3)));
        assert!(p.accepts(&CssValue::Number(0)));
        assert!(!p.accepts(&CssValue::String("x".into())));
    }

    #[test]
    fn border_shorthand() {
        let p = PropertyType::Border;
        assert!(p.accepts(&CssValue::Length(1)));
        assert!(p.accepts(&CssValue::Identifier(ValueType::Solid)));
        assert!(p.accepts(&CssValue::Color(Argb(0))));
        assert!(!p.accepts(&CssValue::Identifier(ValueType::Hand)));
    }

    #[test]
    fn border_sides_accept_transparent() {
        for p in [PropertyType::Border, PropertyType::BorderTop, PropertyType::BorderLeft] {
            assert!(p.accepts(&CssValue::Identifier(ValueType::Transparent)), "{p}");
        }
        let style = PropertyType::BorderStyles;
        assert!(!style.accepts(&CssValue::Identifier(ValueType::Transparent)));
    }

    #[test]
    fn font_family_is_an_alias_of_font() {
        assert_eq!(PropertyType::from_name("font-family"), Some(PropertyType::Font));
        assert_eq!(PropertyType::from_name("Font-Family"), Some(PropertyType::Font));
        assert_eq!(PropertyType::Font.as_ref(), "font");
    }

    #[test]
    fn cursor_group() {
        let p = PropertyType::Cursor;
        assert!(p.accepts(&CssValue::Identifier(ValueType::IBeam)));
        assert!(p.accepts(&CssValue::Uri("arrow.cur".into())));
        assert!(!p.accepts(&CssValue::Identifier(ValueType::Bold)));
    }

    #[test]
    fn unknown_is_never_accepted() {
        for property in PropertyType::iter() {
            assert!(!property.accepts(&CssValue::Unknown), "{property}");
        }
    }
}
