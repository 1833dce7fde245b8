//! Utility macros for the tokenizer.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a handler for a fixed punctuation token
//! - `MK_MATCH_HANDLER!` - Creates a handler emitting whatever its regex matched
//!
//! These macros reduce boilerplate in the pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's verbatim source text
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Ident, "color".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler for a fixed, single-spelling token.
///
/// The generated handler emits a token of the given kind whose text is the
/// literal, advancing the lexer by the literal's length.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: anchored(";"),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            lexer.emit($kind, $value.len());
        }
    };
}

/// Creates a lexer handler for a token whose text varies.
///
/// The generated handler re-runs the pattern's regex against the remaining
/// input and emits everything it matched as one token of the given kind.
#[macro_export]
macro_rules! MK_MATCH_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer, regex: &Regex| {
            let len = regex.find(lexer.remainder()).map_or(0, |m| m.end());
            lexer.emit($kind, len);
        }
    };
}
