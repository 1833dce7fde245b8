//! Parser state and entry points.
//!
//! The Parser owns the token cursor, the current token, the CST frame stack
//! and the collected diagnostics. Productions are free functions over
//! `&mut Parser` in the sibling modules:
//! - `rules` dispatches rules and at-rules and fills rule bodies
//! - `condition` parses `@supports` style boolean conditions
//! - `media` parses media lists
//! - `declaration` assembles `name: value !important` pairs
//! - `value` and `selector` are the token-driven micro-syntax builders
//! - `recovery` holds the resynchronization scans

use std::{collections::VecDeque, rc::Rc};

use crate::{
    ast::{
        ast::{Entity, ToEntity},
        conditions::Condition,
        declarations::{DeclarationBlock, Value},
        media::MediaList,
        rules::{KeyframeRule, Rule, SelectorList, Stylesheet},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        cursor::{TokenCursor, TokenStream},
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    condition::parse_aggregate,
    config::ParserConfig,
    cst::{CstFrame, CstStack},
    factory::{PropertyFactory, PropertySet, StandardFactory},
    media::fill_media_list,
    rules::{fill_declarations, parse_keyframe, parse_rule},
    selector::parse_selector_list,
    value::parse_value_until,
};

/// What separated the current token from the previous significant one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    None,
    /// At least one whitespace token
    Space,
    /// Only comments or `<!--` / `-->`
    Comment,
}

/// The main parser structure that maintains parsing state.
///
/// A parser is bound to one cursor and one configuration for its whole life
/// and is not meant to be shared between threads.
pub struct Parser {
    /// Source of tokens
    cursor: Box<dyn TokenCursor>,
    /// Tokens pulled ahead by `peek_token` and not yet recorded
    lookahead: VecDeque<Token>,
    /// The significant token under the cursor
    current: Token,
    /// Trivia between the previous token and `current`
    gap: Gap,
    config: ParserConfig,
    factory: Box<dyn PropertyFactory>,
    cst: CstStack,
    root_entity: Option<Entity>,
    diagnostics: Vec<Error>,
}

impl Parser {
    /// Creates a parser and pulls the first significant token.
    pub fn new(cursor: Box<dyn TokenCursor>, config: ParserConfig) -> Self {
        let origin = Position(0, Rc::new(String::from("<inline>")));
        let mut parser = Parser {
            cursor,
            lookahead: VecDeque::new(),
            current: Token {
                kind: TokenKind::EOF,
                value: String::new(),
                span: Span { start: origin.clone(), end: origin },
            },
            gap: Gap::None,
            config,
            factory: Box::new(StandardFactory),
            cst: CstStack::new(config.store_trivia),
            root_entity: None,
            diagnostics: vec![],
        };
        parser.pull();
        parser
    }

    pub fn from_tokens(tokens: Vec<Token>, config: ParserConfig) -> Self {
        Parser::new(Box::new(TokenStream::new(tokens)), config)
    }

    pub fn with_factory(mut self, factory: Box<dyn PropertyFactory>) -> Self {
        self.factory = factory;
        self
    }

    fn next_raw(&mut self) -> Token {
        match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.cursor.next_token(),
        }
    }

    /// Moves to the next significant token. Trivia in between is recorded
    /// into the CST (when enabled) and otherwise dropped.
    fn pull(&mut self) {
        self.gap = Gap::None;
        loop {
            let token = self.next_raw();

            if token.kind.is_trivia() {
                if token.kind == TokenKind::Whitespace {
                    self.gap = Gap::Space;
                } else if self.gap == Gap::None {
                    self.gap = Gap::Comment;
                }
                self.cst.record(token);
                continue;
            }

            if token.kind != TokenKind::EOF {
                self.cst.record(token.clone());
            }
            self.current = token;
            return;
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Whether whitespace preceded the current token.
    pub fn has_space_before(&self) -> bool {
        self.gap == Gap::Space
    }

    /// Whether any trivia (whitespace, a comment, `<!--` or `-->`) preceded
    /// the current token.
    pub fn has_trivia_before(&self) -> bool {
        self.gap != Gap::None
    }

    pub fn gap_before(&self) -> Gap {
        self.gap
    }

    /// Advances to the next token and returns the previous one.
    pub fn advance(&mut self) -> Token {
        let previous = self.current.clone();
        self.pull();
        previous
    }

    /// Returns the next significant token after the current one without
    /// consuming anything.
    pub fn peek_token(&mut self) -> &Token {
        loop {
            if let Some(index) = self.lookahead.iter().position(|t| !t.kind.is_trivia()) {
                return &self.lookahead[index];
            }
            let token = self.cursor.next_token();
            self.lookahead.push_back(token);
        }
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    pub fn factory(&self) -> &dyn PropertyFactory {
        self.factory.as_ref()
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    fn offset(&self) -> u32 {
        self.current.span.start.0
    }

    /// Records a diagnostic at the current token.
    pub fn report(&mut self, error: ErrorImpl) {
        let position = self.get_position();
        self.report_at(error, position);
    }

    pub fn report_at(&mut self, error: ErrorImpl, position: Position) {
        let error = Error::new(error, position);
        tracing::debug!(name = error.get_error_name(), offset = error.get_position().0, "{}", error);
        self.diagnostics.push(error);
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Runs one production inside its own CST frame.
    ///
    /// The frame is opened before `production` runs and closed with its
    /// result on every path, so frames stay balanced however the production
    /// exits.
    pub fn framed<T, F>(&mut self, production: F) -> Option<T>
    where
        T: ToEntity,
        F: FnOnce(&mut Parser) -> Option<T>,
    {
        if !self.cst.is_enabled() {
            return production(self);
        }

        self.cst.open(self.has_tokens());
        let result = production(self);
        let entity = result.as_ref().map(ToEntity::to_entity);
        self.cst.close(entity, self.has_tokens());
        result
    }

    /// Guards a rule or declaration loop: when an iteration consumed nothing,
    /// the offending token is reported and stepped over.
    pub fn ensure_progress(&mut self, before: u32) {
        if self.has_tokens() && self.offset() == before {
            self.report(ErrorImpl::InvalidToken {
                token: self.current.value.clone(),
            });
            self.advance();
        }
    }

    pub fn cst_depth(&self) -> usize {
        self.cst.depth()
    }

    /// Consumes the parser, returning the recorded CST root when trivia
    /// capture was enabled.
    pub fn into_cst(self) -> Option<CstFrame> {
        self.cst.finish(self.root_entity)
    }
}

/// Parses every rule up to the end of input.
pub fn parse_stylesheet(parser: &mut Parser) -> Stylesheet {
    let mut rules = vec![];

    while parser.has_tokens() {
        let before = parser.offset();
        if let Some(rule) = parse_rule(parser) {
            rules.push(rule);
        }
        parser.ensure_progress(before);
    }

    let stylesheet = Stylesheet { rules };
    if parser.cst.is_enabled() {
        parser.root_entity = Some(Entity::Stylesheet(stylesheet.clone()));
    }
    stylesheet
}

/// Parses a stream of tokens into a stylesheet.
///
/// This is the main entry point for parsing. The returned parser carries the
/// diagnostics and, with `store_trivia`, the concrete syntax tree.
pub fn parse(tokens: Vec<Token>, config: ParserConfig) -> (Parser, Stylesheet) {
    let mut parser = Parser::from_tokens(tokens, config);
    let stylesheet = parse_stylesheet(&mut parser);
    (parser, stylesheet)
}

/// Parses a standalone condition. Tokens after the condition are left
/// under the cursor.
pub fn parse_condition(tokens: Vec<Token>, config: ParserConfig) -> (Parser, Option<Condition>) {
    let mut parser = Parser::from_tokens(tokens, config);
    let condition = parse_aggregate(&mut parser);
    (parser, condition)
}

pub fn parse_media_list(tokens: Vec<Token>, config: ParserConfig) -> (Parser, MediaList) {
    let mut parser = Parser::from_tokens(tokens, config);
    let mut list = MediaList::new();
    if parser.has_tokens() {
        fill_media_list(&mut parser, &mut list, TokenKind::EOF);
    }
    (parser, list)
}

/// Parses a standalone value. Returns the value and its `!important` flag
/// when it parsed validly.
pub fn parse_value(tokens: Vec<Token>, config: ParserConfig) -> (Parser, Option<(Value, bool)>) {
    let mut parser = Parser::from_tokens(tokens, config);
    let parsed = parse_value_until(&mut parser, &[]);
    let value = match parsed.value {
        Some(value) if parsed.valid || config.tolerate_invalid_values => Some((value, parsed.important)),
        _ => None,
    };
    (parser, value)
}

pub fn parse_selector(tokens: Vec<Token>, config: ParserConfig) -> (Parser, Option<SelectorList>) {
    let mut parser = Parser::from_tokens(tokens, config);
    let (selectors, valid) = parse_selector_list(&mut parser);
    (parser, valid.then_some(selectors))
}

/// Parses the body of a style attribute.
pub fn parse_declaration_list(tokens: Vec<Token>, config: ParserConfig) -> (Parser, DeclarationBlock) {
    let mut parser = Parser::from_tokens(tokens, config);
    let mut block = DeclarationBlock::new();
    while parser.has_tokens() {
        fill_declarations(&mut parser, &mut block, PropertySet::Standard);
        if parser.current_token_kind() == TokenKind::CloseCurly {
            parser.report(ErrorImpl::InvalidToken { token: String::from("}") });
            parser.advance();
        }
    }
    (parser, block)
}

fn syntax_error(text: &str) -> Error {
    Error::new(
        ErrorImpl::SyntaxError {
            text: text.to_string(),
        },
        Position::null(),
    )
}

/// Parses text that must hold exactly one rule.
pub fn parse_rule_text(text: &str, config: ParserConfig) -> Result<Rule, Error> {
    let tokens = tokenize(text.to_string(), None)?;
    let mut parser = Parser::from_tokens(tokens, config);

    match parse_rule(&mut parser) {
        Some(rule) if !parser.has_tokens() => Ok(rule),
        _ => Err(syntax_error(text)),
    }
}

/// Parses text that must hold exactly one condition.
pub fn parse_condition_text(text: &str) -> Result<Condition, Error> {
    let tokens = tokenize(text.to_string(), None)?;
    let (parser, condition) = parse_condition(tokens, ParserConfig::default());

    match condition {
        Some(condition) if !parser.has_tokens() => Ok(condition),
        _ => Err(syntax_error(text)),
    }
}

/// Parses text that must hold exactly one keyframe block.
pub fn parse_keyframe_text(text: &str) -> Result<KeyframeRule, Error> {
    let tokens = tokenize(text.to_string(), None)?;
    let mut parser = Parser::from_tokens(tokens, ParserConfig::default());

    match parse_keyframe(&mut parser) {
        Some(rule) if !parser.has_tokens() => Ok(rule),
        _ => Err(syntax_error(text)),
    }
}
