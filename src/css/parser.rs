//! Recursive descent stylesheet parser.
//!
//! Parses stylesheet text into a caller-owned [`StyleSheet`]. Uses the
//! logos-based tokenizer from [`crate::css::tokenizer`].
//!
//! Parsing never fails as a whole. Problems are collected as [`ParseError`]
//! diagnostics and the parser resynchronises:
//!
//! - a malformed selector list discards the rule and skips past the end of
//!   the next `{ ... }` block (a stray `}` before any `{` also ends the skip),
//! - a malformed declaration is skipped up to the next `;` or the closing `}`,
//! - an unknown property or a value of the wrong kind drops only that
//!   declaration or value,
//! - end of input inside a block keeps the declarations read so far.

use logos::Logos;

use crate::css::model::{BasicSelector, Declaration, Relation, Selector};
use crate::css::properties::PropertyType;
use crate::css::pseudo::PseudoState;
use crate::css::stylesheet::StyleSheet;
use crate::css::tokenizer::Token;
use crate::css::value::{Argb, CssValue, ValueType};

/// A parse diagnostic. Positions are byte offsets into the source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at byte {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input at byte {position}: {message}")]
    UnexpectedEof { position: usize, message: String },
    #[error("unknown pseudo-class '{name}' at byte {position}")]
    UnknownPseudo { position: usize, name: String },
    #[error("unknown property '{name}' at byte {position}")]
    UnknownProperty { position: usize, name: String },
    #[error("invalid value for {property} at byte {position}: {message}")]
    InvalidValue {
        position: usize,
        property: PropertyType,
        message: String,
    },
}

impl ParseError {
    /// Byte offset the diagnostic refers to.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEof { position, .. }
            | ParseError::UnknownPseudo { position, .. }
            | ParseError::UnknownProperty { position, .. }
            | ParseError::InvalidValue { position, .. } => *position,
        }
    }
}

/// A token with its source text and byte span. `token` is `None` for
/// characters the lexer does not recognize.
#[derive(Debug, Clone, Copy)]
struct PToken<'a> {
    token: Option<Token>,
    text: &'a str,
    byte_start: usize,
    byte_end: usize,
}

/// Blank out block comments (`/* ... */`), keeping byte offsets and newlines
/// so diagnostics still point into the original text.
///
/// Quoted strings and `url(...)` arguments are copied verbatim, so a `/*`
/// inside them is not a comment. An unterminated comment runs to the end of
/// the input.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(|c: char| matches!(c, '/' | '"' | '\'' | '(')) {
        let (head, tail) = rest.split_at(start);
        result.push_str(head);

        let end = match tail.as_bytes()[0] {
            b'/' if tail.starts_with("/*") => {
                let end = tail[2..].find("*/").map(|i| i + 4).unwrap_or(tail.len());
                for c in tail[..end].chars() {
                    if c == '\n' {
                        result.push('\n');
                    } else {
                        result.extend(std::iter::repeat(' ').take(c.len_utf8()));
                    }
                }
                rest = &tail[end..];
                continue;
            }
            quote @ (b'"' | b'\'') => tail[1..]
                .find(char::from(quote))
                .map(|i| i + 2)
                .unwrap_or(tail.len()),
            b'(' if ends_with_url(&result) => {
                tail.find(')').map(|i| i + 1).unwrap_or(tail.len())
            }
            _ => 1,
        };
        result.push_str(&tail[..end]);
        rest = &tail[end..];
    }
    result.push_str(rest);

    result
}

fn ends_with_url(text: &str) -> bool {
    text.get(text.len().saturating_sub(3)..)
        .is_some_and(|tail| tail.eq_ignore_ascii_case("url"))
}

/// Tokenize input using logos with span information preserved.
fn tokenize_with_spans(input: &str) -> Vec<PToken<'_>> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| PToken {
            token: result.ok(),
            text: &input[span.clone()],
            byte_start: span.start,
            byte_end: span.end,
        })
        .collect()
}

/// Parse `input` and append every recognized rule to `sheet`.
///
/// Returns the diagnostics collected along the way; the stylesheet holds
/// whatever rules survived.
pub fn parse_css(input: &str, sheet: &mut StyleSheet) -> Vec<ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_with_spans(&cleaned);

    let mut parser = Parser {
        tokens,
        cursor: 0,
        input_len: cleaned.len(),
        errors: Vec::new(),
    };

    let before = sheet.len();
    parser.parse_stylesheet(sheet);
    log::debug!(
        target: "gilt_style::parser",
        "parsed {} rules ({} diagnostics)",
        sheet.len() - before,
        parser.errors.len()
    );

    parser.errors
}

/// Recursive descent parser state.
struct Parser<'a> {
    tokens: Vec<PToken<'a>>,
    cursor: usize,
    input_len: usize,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<PToken<'a>> {
        self.tokens.get(self.cursor).copied()
    }

    fn peek_token(&self) -> Option<Option<Token>> {
        self.peek().map(|t| t.token)
    }

    fn advance(&mut self) -> Option<PToken<'a>> {
        let tok = self.peek()?;
        self.cursor += 1;
        Some(tok)
    }

    /// Returns `true` if the current token is immediately adjacent (no whitespace)
    /// to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.byte_start == prev.byte_end,
            None => false,
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(tok) => ParseError::UnexpectedToken {
                position: tok.byte_start,
                message: format!("expected {expected}, got '{}'", tok.text),
            },
            None => ParseError::UnexpectedEof {
                position: self.input_len,
                message: format!("expected {expected}"),
            },
        }
    }

    // ── Rules ────────────────────────────────────────────────────────

    fn parse_stylesheet(&mut self, sheet: &mut StyleSheet) {
        while !self.is_eof() {
            if matches!(
                self.peek_token(),
                Some(Some(Token::BraceClose | Token::Semicolon))
            ) {
                let err = self.unexpected("a selector");
                self.errors.push(err);
                self.advance();
                continue;
            }

            let selectors = match self.parse_selector_list() {
                Ok(selectors) => selectors,
                Err(err) => {
                    self.errors.push(err);
                    self.skip_rule();
                    continue;
                }
            };

            if self.peek_token() != Some(Some(Token::BraceOpen)) {
                let err = self.unexpected("'{'");
                self.errors.push(err);
                self.skip_rule();
                continue;
            }
            self.advance();

            let declarations = self.parse_declaration_block();
            sheet.add_rule(selectors, declarations);
        }
    }

    /// Skip the rest of a malformed rule: through the end of the next block,
    /// or through a stray `}` met before any `{`.
    fn skip_rule(&mut self) {
        let mut depth = 0usize;
        while let Some(tok) = self.advance() {
            match tok.token {
                Some(Token::BraceOpen) => depth += 1,
                Some(Token::BraceClose) => {
                    if depth <= 1 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
    }

    // ── Selectors ────────────────────────────────────────────────────

    /// Parse a comma-separated list of selectors (before `{`).
    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![self.parse_selector()?];

        while self.peek_token() == Some(Some(Token::Comma)) {
            self.advance();
            selectors.push(self.parse_selector()?);
        }

        Ok(selectors)
    }

    /// Parse one selector: basic selectors joined by combinators.
    ///
    /// Each combinator is recorded as the relation-to-next of the basic
    /// selector on its left.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut chain = vec![self.parse_basic_selector()?];

        loop {
            let relation = match self.peek_token() {
                // `>` means parent relation
                Some(Some(Token::GreaterThan)) => {
                    self.advance();
                    Relation::MatchNextIfParent
                }
                // A selector-starting token separated by whitespace is the
                // ancestor combinator. Adjacent ones were consumed by
                // parse_basic_selector.
                Some(Some(
                    Token::Ident | Token::HashName | Token::Star | Token::PseudoClass,
                )) => Relation::MatchNextIfAncestor,
                // Anything else ends this selector
                _ => break,
            };

            if let Some(last) = chain.last_mut() {
                last.relation_to_next = relation;
            }
            chain.push(self.parse_basic_selector()?);
        }

        Ok(Selector::new(chain))
    }

    /// Parse a basic selector: `Name#id:pseudo...` with no whitespace inside.
    fn parse_basic_selector(&mut self) -> Result<BasicSelector, ParseError> {
        let mut sel = BasicSelector::new();

        // Parts after a leading name or `*` must touch it.
        let mut need_adjacent = match self.peek() {
            Some(PToken {
                token: Some(Token::Ident),
                text,
                ..
            }) => {
                sel.element_name = text.to_string();
                self.advance();
                true
            }
            Some(PToken {
                token: Some(Token::Star),
                ..
            }) => {
                self.advance();
                true
            }
            Some(PToken {
                token: Some(Token::HashName | Token::PseudoClass),
                ..
            }) => false,
            _ => return Err(self.unexpected("a selector")),
        };

        loop {
            if need_adjacent && !self.is_adjacent() {
                break;
            }
            need_adjacent = true;
            let Some(tok) = self.peek() else {
                break;
            };
            match tok.token {
                Some(Token::HashName) => {
                    if !sel.id.is_empty() {
                        return Err(ParseError::UnexpectedToken {
                            position: tok.byte_start,
                            message: format!("second id '{}' in one selector", tok.text),
                        });
                    }
                    sel.id = tok.text[1..].to_string();
                    self.advance();
                }
                Some(Token::PseudoClass) => {
                    let name = tok.text.trim_start_matches(':');
                    let flag = PseudoState::from_pseudo_name(name).ok_or_else(|| {
                        ParseError::UnknownPseudo {
                            position: tok.byte_start,
                            name: name.to_string(),
                        }
                    })?;
                    sel.add_pseudo(flag);
                    self.advance();
                }
                Some(Token::Ident | Token::Star) => {
                    return Err(self.unexpected("'#id' or ':pseudo'"));
                }
                _ => break,
            }
        }

        Ok(sel)
    }

    // ── Declarations ─────────────────────────────────────────────────

    /// Parse declarations up to and including the closing `}`.
    fn parse_declaration_block(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        loop {
            match self.peek_token() {
                None => {
                    self.errors.push(ParseError::UnexpectedEof {
                        position: self.input_len,
                        message: "unterminated declaration block".into(),
                    });
                    break;
                }
                Some(Some(Token::BraceClose)) => {
                    self.advance();
                    break;
                }
                Some(Some(Token::Semicolon)) => {
                    self.advance();
                }
                Some(_) => match self.parse_declaration() {
                    Ok(Some(declaration)) => declarations.push(declaration),
                    Ok(None) => {}
                    Err(err) => {
                        self.errors.push(err);
                        self.skip_declaration();
                    }
                },
            }
        }

        declarations
    }

    /// Skip to the next `;` (consumed) or the block's `}` (left in place).
    fn skip_declaration(&mut self) {
        let mut depth = 0usize;
        while let Some(tok) = self.peek() {
            match tok.token {
                Some(Token::BraceOpen) => depth += 1,
                Some(Token::BraceClose) => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                Some(Token::Semicolon) if depth == 0 => {
                    self.advance();
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Parse `property: value (,? value)* ;?`.
    ///
    /// Returns `Ok(None)` when the declaration was well-formed but nothing in
    /// it could be used (unknown property, no acceptable values).
    fn parse_declaration(&mut self) -> Result<Option<Declaration>, ParseError> {
        let prop_tok = match self.peek() {
            Some(tok) if tok.token == Some(Token::Ident) => tok,
            _ => return Err(self.unexpected("a property name")),
        };
        self.advance();

        // `color:red` lexes as Ident + PseudoClass; the fused token carries
        // the first value.
        let mut raw_values: Vec<(Token, &'a str, usize)> = Vec::new();
        match self.peek() {
            Some(PToken {
                token: Some(Token::Colon),
                ..
            }) => {
                self.advance();
            }
            Some(PToken {
                token: Some(fused @ (Token::PseudoClass | Token::PseudoFunction)),
                text,
                byte_start,
                ..
            }) if !text.starts_with("::") => {
                let token = if fused == Token::PseudoClass {
                    Token::Ident
                } else {
                    Token::Function
                };
                raw_values.push((token, &text[1..], byte_start + 1));
                self.advance();
            }
            _ => return Err(self.unexpected("':'")),
        }

        loop {
            match self.peek() {
                None => break,
                Some(tok) => match tok.token {
                    Some(Token::Semicolon) => {
                        self.advance();
                        break;
                    }
                    Some(Token::BraceClose) => break,
                    Some(Token::BraceOpen) => return Err(self.unexpected("a value")),
                    Some(Token::Comma) => {
                        self.advance();
                    }
                    Some(token) => {
                        raw_values.push((token, tok.text, tok.byte_start));
                        self.advance();
                    }
                    None => return Err(self.unexpected("a value")),
                },
            }
        }

        let Some(property) = PropertyType::from_name(prop_tok.text) else {
            self.errors.push(ParseError::UnknownProperty {
                position: prop_tok.byte_start,
                name: prop_tok.text.to_string(),
            });
            return Ok(None);
        };

        let mut values = Vec::with_capacity(raw_values.len());
        for (token, text, position) in raw_values {
            match translate_value(token, text) {
                Ok(value) if property.accepts(&value) => values.push(value),
                Ok(value) => self.errors.push(ParseError::InvalidValue {
                    position,
                    property,
                    message: format!("{:?} value '{value}' not accepted", value.kind()),
                }),
                Err(message) => self.errors.push(ParseError::InvalidValue {
                    position,
                    property,
                    message,
                }),
            }
        }

        if values.is_empty() {
            self.errors.push(ParseError::InvalidValue {
                position: prop_tok.byte_start,
                property,
                message: "no usable value".into(),
            });
            return Ok(None);
        }

        Ok(Some(Declaration::new(property, values)))
    }
}

/// Translate one value token into a [`CssValue`].
fn translate_value(token: Token, text: &str) -> Result<CssValue, String> {
    match token {
        Token::Number => parse_integer(text).map(CssValue::Number),
        Token::Dimension => {
            let (number, unit) =
                split_dimension(text).ok_or_else(|| format!("invalid dimension: {text}"))?;
            if !unit.eq_ignore_ascii_case("px") {
                return Err(format!("unsupported unit '{unit}'"));
            }
            parse_integer(number).map(CssValue::Length)
        }
        Token::Ident => {
            if let Some(keyword) = ValueType::from_keyword(text) {
                return Ok(CssValue::Identifier(keyword));
            }
            // Bare hex digits are not a named color.
            if !text.chars().all(|c| c.is_ascii_hexdigit()) {
                if let Some(argb) = Argb::parse(text) {
                    return Ok(CssValue::Color(argb));
                }
            }
            Err(format!("unknown keyword '{text}'"))
        }
        Token::HashName => Argb::parse(text)
            .map(CssValue::Color)
            .ok_or_else(|| format!("invalid color '{text}'")),
        Token::Function => {
            let (name, args) = text
                .split_once('(')
                .ok_or_else(|| format!("invalid function '{text}'"))?;
            if name.eq_ignore_ascii_case("url") {
                let inner = args.trim_end_matches(')').trim();
                let inner = inner.trim_matches(|c| c == '"' || c == '\'');
                return Ok(CssValue::Uri(inner.to_string()));
            }
            Argb::parse(text)
                .map(CssValue::Color)
                .ok_or_else(|| format!("invalid color function '{text}'"))
        }
        Token::StringLiteral | Token::StringLiteralSingle => {
            Ok(CssValue::String(text[1..text.len() - 1].to_string()))
        }
        other => Err(format!("unexpected {other:?} '{text}' in value")),
    }
}

/// Parse a possibly fractional number, rounding to the nearest integer.
fn parse_integer(text: &str) -> Result<i32, String> {
    if let Ok(n) = text.parse::<i32>() {
        return Ok(n);
    }
    text.parse::<f32>()
        .map(|n| n.round() as i32)
        .map_err(|_| format!("invalid number: {text}"))
}

/// Split a dimension string like "12px" or "50%" into (number_part, unit_part).
fn split_dimension(s: &str) -> Option<(&str, &str)> {
    let unit_start = s
        .char_indices()
        .find(|(i, c)| !c.is_ascii_digit() && *c != '.' && !(*c == '-' && *i == 0))
        .map(|(i, _)| i)?;

    if unit_start == 0 || unit_start >= s.len() {
        return None;
    }

    Some((&s[..unit_start], &s[unit_start..]))
}
