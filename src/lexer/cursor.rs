use std::rc::Rc;

use crate::{Position, Span};

use super::tokens::{Token, TokenKind};

/// Pull-based token source consumed by the parser.
///
/// Once the input is exhausted every call yields an `EOF` token.
pub trait TokenCursor {
    fn next_token(&mut self) -> Token;
}

/// A cursor over an already tokenized input.
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.kind == TokenKind::EOF => last.clone(),
            Some(last) => Token {
                kind: TokenKind::EOF,
                value: String::new(),
                span: Span { start: last.span.end.clone(), end: last.span.end.clone() },
            },
            None => {
                let origin = Position(0, Rc::new(String::from("<inline>")));
                Token {
                    kind: TokenKind::EOF,
                    value: String::new(),
                    span: Span { start: origin.clone(), end: origin },
                }
            }
        };

        TokenStream { tokens, pos: 0, eof }
    }
}

impl TokenCursor for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind != TokenKind::EOF => {
                self.pos += 1;
                token.clone()
            }
            _ => self.eof.clone(),
        }
    }
}
