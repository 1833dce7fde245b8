use crate::{
    ast::rules::SelectorList,
    lexer::tokens::{Token, TokenKind},
};

use super::parser::{Gap, Parser};

/// Accumulates a comma separated selector list.
///
/// Combinators are normalized to ` > `, ` + ` and ` ~ `; descendant
/// whitespace collapses to one space. A comment between two compound parts
/// is kept as `/**/` so the parts neither merge nor become a descendant
/// combinator.
#[derive(Debug)]
pub struct SelectorBuilder {
    selectors: Vec<String>,
    current: String,
    closers: Vec<TokenKind>,
    after_combinator: bool,
    valid: bool,
}

impl Default for SelectorBuilder {
    fn default() -> Self {
        SelectorBuilder::new()
    }
}

impl SelectorBuilder {
    pub fn new() -> Self {
        SelectorBuilder {
            selectors: vec![],
            current: String::new(),
            closers: vec![],
            after_combinator: false,
            valid: true,
        }
    }

    fn finish_selector(&mut self) {
        let selector = std::mem::take(&mut self.current);
        if selector.is_empty() || self.after_combinator {
            self.valid = false;
        }
        self.after_combinator = false;
        self.selectors.push(selector);
    }

    fn combinator(token: &Token) -> Option<char> {
        ['>', '+', '~'].into_iter().find(|c| token.is_delim(*c))
    }

    pub fn apply(&mut self, token: &Token, gap: Gap) -> bool {
        let nested = !self.closers.is_empty();

        let accepted = match token.kind {
            TokenKind::Comma if !nested => {
                self.finish_selector();
                return self.valid;
            }
            TokenKind::Semicolon
            | TokenKind::AtKeyword
            | TokenKind::BadString
            | TokenKind::BadUrl
            | TokenKind::OpenCurly
            | TokenKind::CloseCurly => false,
            TokenKind::String => nested,
            TokenKind::OpenBracket => {
                self.closers.push(TokenKind::CloseBracket);
                true
            }
            TokenKind::OpenParen | TokenKind::Function => {
                self.closers.push(TokenKind::CloseParen);
                true
            }
            TokenKind::CloseBracket | TokenKind::CloseParen => {
                if self.closers.last() == Some(&token.kind) {
                    self.closers.pop();
                    true
                } else {
                    false
                }
            }
            _ => true,
        };

        match Self::combinator(token) {
            Some(combinator) if !nested => {
                if self.current.is_empty() || self.after_combinator {
                    self.valid = false;
                }
                let trimmed = self.current.trim_end().len();
                self.current.truncate(trimmed);
                self.current.push(' ');
                self.current.push(combinator);
                self.current.push(' ');
                self.after_combinator = true;
            }
            _ => {
                if !self.current.is_empty() && !self.after_combinator {
                    match gap {
                        Gap::Space => self.current.push(' '),
                        Gap::Comment => self.current.push_str("/**/"),
                        Gap::None => {}
                    }
                }
                self.current.push_str(&token.value);
                self.after_combinator = false;
            }
        }

        self.valid &= accepted;
        accepted
    }

    pub fn finalize(mut self) -> (Option<SelectorList>, bool) {
        self.finish_selector();
        let valid = self.valid && self.closers.is_empty();
        (Some(SelectorList(self.selectors)), valid)
    }
}

/// Reads a selector list up to `{`, `}` or end of input. Returns the list
/// and whether it was valid; the list is returned either way so callers can
/// quote it in a diagnostic.
pub fn parse_selector_list(parser: &mut Parser) -> (SelectorList, bool) {
    let mut valid = false;

    let selectors = parser.framed(|parser| {
        let mut builder = SelectorBuilder::new();

        while !matches!(
            parser.current_token_kind(),
            TokenKind::OpenCurly | TokenKind::CloseCurly | TokenKind::EOF
        ) {
            let gap = parser.gap_before();
            let token = parser.advance();
            builder.apply(&token, gap);
        }

        let (selectors, builder_valid) = builder.finalize();
        valid = builder_valid;
        selectors
    });

    (selectors.unwrap_or_default(), valid)
}
