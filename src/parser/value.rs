use crate::{
    ast::declarations::Value,
    lexer::tokens::{Token, TokenKind},
};

use super::{parser::Parser, recovery::jump_to_arg_end};

/// Accumulates the tokens of a property value into normalized text.
///
/// Runs of whitespace and comments collapse to a single space, so the text
/// of a value reparses to the same text and tokens a comment kept apart
/// stay apart. Brackets must balance
/// and bad strings or urls make the value invalid.
#[derive(Debug, Default)]
pub struct ValueBuilder {
    text: String,
    closers: Vec<TokenKind>,
    valid: bool,
}

impl ValueBuilder {
    pub fn new() -> Self {
        ValueBuilder {
            text: String::new(),
            closers: vec![],
            valid: true,
        }
    }

    /// Number of brackets currently open.
    pub fn depth(&self) -> usize {
        self.closers.len()
    }

    fn paren_depth(&self) -> usize {
        self.closers.iter().filter(|kind| **kind == TokenKind::CloseParen).count()
    }

    /// Feeds one token. Returns false when the token makes the value invalid.
    pub fn apply(&mut self, token: &Token, spaced: bool) -> bool {
        let accepted = match token.kind {
            TokenKind::BadString | TokenKind::BadUrl => false,
            TokenKind::Function | TokenKind::OpenParen => {
                self.closers.push(TokenKind::CloseParen);
                true
            }
            TokenKind::OpenBracket => {
                self.closers.push(TokenKind::CloseBracket);
                true
            }
            TokenKind::OpenCurly => {
                self.closers.push(TokenKind::CloseCurly);
                true
            }
            TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseCurly => {
                if self.closers.last() == Some(&token.kind) {
                    self.closers.pop();
                    true
                } else {
                    false
                }
            }
            _ => true,
        };

        if spaced && !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(&token.value);

        self.valid &= accepted;
        accepted
    }

    /// Drops every open bracket after the rest of an argument list was
    /// skipped.
    fn abandon_nesting(&mut self) {
        self.closers.clear();
        self.valid = false;
    }

    pub fn finalize(self) -> (Option<Value>, bool) {
        let valid = self.valid && self.closers.is_empty();
        if self.text.is_empty() {
            (None, false)
        } else {
            (Some(Value::new(self.text)), valid)
        }
    }
}

/// Result of driving a [`ValueBuilder`] over the token stream.
#[derive(Debug, Clone, Default)]
pub struct ParsedValue {
    pub value: Option<Value>,
    pub important: bool,
    pub valid: bool,
}

/// Reads a value up to one of `terminators` (or end of input) at bracket
/// depth zero. A trailing `!important` is split off; anything after it
/// invalidates the value.
pub fn parse_value_until(parser: &mut Parser, terminators: &[TokenKind]) -> ParsedValue {
    let mut important = false;
    let mut valid = true;

    let value = parser.framed(|parser| {
        let mut builder = ValueBuilder::new();

        while parser.has_tokens() {
            let token = parser.current_token();
            if builder.depth() == 0 {
                if terminators.contains(&token.kind) {
                    break;
                }
                if token.is_delim('!') {
                    parser.advance();
                    if parser.current_token().is_ident("important") {
                        parser.advance();
                        valid &= !important;
                        important = true;
                    } else {
                        valid = false;
                    }
                    continue;
                }
            }

            if important {
                valid = false;
            }

            let spaced = parser.has_trivia_before();
            let token = parser.advance();
            if !builder.apply(&token, spaced) && builder.paren_depth() > 0 {
                let depth = builder.paren_depth();
                jump_to_arg_end(parser, depth);
                builder.abandon_nesting();
            }
        }

        let (value, builder_valid) = builder.finalize();
        valid &= builder_valid;
        value
    });

    ParsedValue {
        valid: valid && value.is_some(),
        value,
        important,
    }
}
