//! logos-based stylesheet tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `10px` as Dimension beats `10` as Number)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `#ff00aa` and `#okButton` both lex as [`Token::HashName`]; the parser
//!   decides between id and color by context
//! - `12px` matches [`Token::Dimension`], not `Number` + `Ident`
//! - `:hover` and `::after` match [`Token::PseudoClass`], not `Colon` + `Ident`
//! - `url(a.png)` and `rgb(1,2,3)` match [`Token::Function`], not `Ident` + garbage

use logos::Logos;

/// Stylesheet token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// `#` followed by a name: an id in selectors, a hex color in values.
    #[regex(r"#[\p{L}\p{N}_-]+")]
    HashName,

    /// Function call with its argument text: `url(bg.png)`, `rgba(0, 0, 0, 0.5)`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9-]*\([^)]*\)")]
    Function,

    /// Number with a unit suffix: `12px`, `50%`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?[a-zA-Z%]+")]
    Dimension,

    /// Functional pseudo-class such as `:not(Label)`. Also the unspaced
    /// declaration shape `cursor:url(a.cur)`.
    #[regex(r"::?[a-zA-Z][a-zA-Z0-9-]*\([^)]*\)")]
    PseudoFunction,

    /// Pseudo-class or pseudo-element: `:hover`, `::after`.
    #[regex(r"::?[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoClass,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Number: integer or float, possibly negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Identifier: element names, property names, keywords, color names.
    /// Letters may be any Unicode letter.
    #[regex(r"[\p{L}_][\p{L}\p{N}_-]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,
}

/// Tokenize a string into `(Token, text)` pairs.
///
/// Characters that fail to lex are dropped.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: tokenize and return just the token variants.
    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokens("{ } : ; , * >"),
            vec![
                Token::BraceOpen,
                Token::BraceClose,
                Token::Colon,
                Token::Semicolon,
                Token::Comma,
                Token::Star,
                Token::GreaterThan,
            ]
        );
    }

    #[test]
    fn test_idents() {
        let result = tokenize("color background-clip MPushButton _private");
        assert_eq!(result[0], (Token::Ident, "color".into()));
        assert_eq!(result[1], (Token::Ident, "background-clip".into()));
        assert_eq!(result[2], (Token::Ident, "MPushButton".into()));
        assert_eq!(result[3], (Token::Ident, "_private".into()));
    }

    #[test]
    fn test_unicode_names() {
        let result = tokenize("Кнопка#ок Étiquette");
        assert_eq!(result[0], (Token::Ident, "Кнопка".into()));
        assert_eq!(result[1], (Token::HashName, "#ок".into()));
        assert_eq!(result[2], (Token::Ident, "Étiquette".into()));
    }

    #[test]
    fn test_numbers_and_dimensions() {
        let result = tokenize("10 -5 3.14 12px -2px 50%");
        assert_eq!(result[0], (Token::Number, "10".into()));
        assert_eq!(result[1], (Token::Number, "-5".into()));
        assert_eq!(result[2], (Token::Number, "3.14".into()));
        assert_eq!(result[3], (Token::Dimension, "12px".into()));
        assert_eq!(result[4], (Token::Dimension, "-2px".into()));
        assert_eq!(result[5], (Token::Dimension, "50%".into()));
    }

    #[test]
    fn test_hash_names() {
        let result = tokenize("#fff #okButton #ff00aa80");
        assert_eq!(result[0], (Token::HashName, "#fff".into()));
        assert_eq!(result[1], (Token::HashName, "#okButton".into()));
        assert_eq!(result[2], (Token::HashName, "#ff00aa80".into()));
    }

    #[test]
    fn test_pseudo_classes() {
        let result = tokenize(":hover ::after :read-only");
        assert_eq!(result[0], (Token::PseudoClass, ":hover".into()));
        assert_eq!(result[1], (Token::PseudoClass, "::after".into()));
        assert_eq!(result[2], (Token::PseudoClass, ":read-only".into()));
    }

    #[test]
    fn test_functions() {
        let result = tokenize("url(images/bg.png) rgba(0, 0, 0, 0.5)");
        assert_eq!(result[0], (Token::Function, "url(images/bg.png)".into()));
        assert_eq!(result[1], (Token::Function, "rgba(0, 0, 0, 0.5)".into()));
    }

    #[test]
    fn test_string_literals() {
        let result = tokenize(r#""Segoe UI" 'Tahoma'"#);
        assert_eq!(result[0], (Token::StringLiteral, "\"Segoe UI\"".into()));
        assert_eq!(result[1], (Token::StringLiteralSingle, "'Tahoma'".into()));
    }

    #[test]
    fn test_full_rule() {
        let input = "Panel > Button#ok:hover { color: #fff; margin: 1px 2px; }";
        assert_eq!(
            tokens(input),
            vec![
                Token::Ident,
                Token::GreaterThan,
                Token::Ident,
                Token::HashName,
                Token::PseudoClass,
                Token::BraceOpen,
                Token::Ident,
                Token::Colon,
                Token::HashName,
                Token::Semicolon,
                Token::Ident,
                Token::Colon,
                Token::Dimension,
                Token::Dimension,
                Token::Semicolon,
                Token::BraceClose,
            ]
        );
    }

    #[test]
    fn test_unspaced_declaration_lexes_as_pseudo() {
        // The parser accepts this shape inside declaration blocks.
        assert_eq!(tokens("color:red"), vec![Token::Ident, Token::PseudoClass]);
    }

    #[test]
    fn test_functional_pseudo() {
        let result = tokenize(":not(Label) :url(a.cur)");
        assert_eq!(result[0], (Token::PseudoFunction, ":not(Label)".into()));
        assert_eq!(result[1], (Token::PseudoFunction, ":url(a.cur)".into()));
    }

    #[test]
    fn test_invalid_characters_dropped() {
        assert_eq!(tokens("@ Button"), vec![Token::Ident]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \t\n  ").is_empty());
    }
}
