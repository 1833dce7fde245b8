//! Rule and at-rule productions.
//!
//! Every production is entered with the first token of its rule under the
//! cursor and returns `None` when the rule is dropped. A dropped rule has
//! already been reported and skipped, so callers only loop.

use crate::{
    ast::{
        conditions::Condition,
        declarations::DeclarationBlock,
        media::MediaList,
        rules::{
            normalize_keyframe_key, CharsetRule, DocumentFunction, DocumentFunctionKind, DocumentRule,
            FontFaceRule, ImportRule, KeyframeRule, KeyframesRule, MediaRule, NamespaceRule, PageRule, Rule,
            StyleRule, SupportsRule, UnknownRule, ViewportRule,
        },
    },
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    condition::parse_aggregate,
    declaration::parse_declaration,
    factory::PropertySet,
    lookups::{at_rule_kind, AtRuleKind},
    media::fill_media_list,
    parser::Parser,
    recovery::{jump_to_arg_end, jump_to_end, skip_rule},
    selector::parse_selector_list,
};

/// Parses the rule starting at the current token.
pub fn parse_rule(parser: &mut Parser) -> Option<Rule> {
    parser.framed(|parser| match parser.current_token_kind() {
        TokenKind::EOF => None,
        TokenKind::AtKeyword => create_at_rule(parser),
        TokenKind::OpenCurly => {
            parser.report(ErrorImpl::InvalidBlockStart {
                token: parser.current_token().value.clone(),
            });
            skip_rule(parser);
            None
        }
        TokenKind::String
        | TokenKind::BadString
        | TokenKind::Url
        | TokenKind::BadUrl
        | TokenKind::CloseCurly
        | TokenKind::CloseParen
        | TokenKind::CloseBracket => {
            parser.report(ErrorImpl::InvalidToken {
                token: parser.current_token().value.clone(),
            });
            skip_rule(parser);
            None
        }
        _ => parse_style_rule(parser),
    })
}

/// Dispatches on the at-keyword under the cursor.
fn create_at_rule(parser: &mut Parser) -> Option<Rule> {
    let keyword = parser.advance();
    let name = keyword.name().to_string();
    let kind = at_rule_kind(&name);
    tracing::trace!(name = %name, ?kind, "at-rule");

    match kind {
        AtRuleKind::Media => parse_media_rule(parser),
        AtRuleKind::FontFace => parse_font_face_rule(parser),
        AtRuleKind::Keyframes => parse_keyframes_rule(parser),
        AtRuleKind::Import => parse_import_rule(parser),
        AtRuleKind::Charset => parse_charset_rule(parser),
        AtRuleKind::Namespace => parse_namespace_rule(parser),
        AtRuleKind::Page => parse_page_rule(parser),
        AtRuleKind::Supports => parse_supports_rule(parser),
        AtRuleKind::Viewport => parse_viewport_rule(parser),
        AtRuleKind::Document => parse_document_rule(parser),
        AtRuleKind::Unknown => parse_unknown_rule(parser, name, keyword.span.start),
    }
}

/// Consumes the `{` that opens a rule body. Anything else is reported and
/// the rule is skipped.
fn open_block(parser: &mut Parser) -> bool {
    if parser.current_token_kind() == TokenKind::OpenCurly {
        parser.advance();
        return true;
    }

    parser.report(ErrorImpl::InvalidBlockStart {
        token: parser.current_token().value.clone(),
    });
    skip_rule(parser);
    false
}

/// Consumes the `}` that closes a rule body. A body cut short by end of
/// input is accepted as closed.
fn close_block(parser: &mut Parser) {
    if parser.current_token_kind() == TokenKind::CloseCurly {
        parser.advance();
    }
}

/// Parses nested rules until the enclosing `}` or end of input.
pub fn fill_rules(parser: &mut Parser, rules: &mut Vec<Rule>) {
    while !matches!(parser.current_token_kind(), TokenKind::CloseCurly | TokenKind::EOF) {
        let before = parser.get_position().0;
        if let Some(rule) = parse_rule(parser) {
            rules.push(rule);
        }
        parser.ensure_progress(before);
    }
}

/// Parses declarations until the enclosing `}` or end of input. Later
/// declarations of the same property replace earlier ones.
pub fn fill_declarations(parser: &mut Parser, block: &mut DeclarationBlock, set: PropertySet) {
    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly | TokenKind::EOF => break,
            TokenKind::Semicolon => {
                parser.advance();
            }
            _ => {
                let before = parser.get_position().0;
                if let Some(property) = parse_declaration(parser, set) {
                    block.set(property);
                }
                parser.ensure_progress(before);
            }
        }
    }
}

fn parse_style_rule(parser: &mut Parser) -> Option<Rule> {
    let start = parser.get_position();
    let (selectors, valid) = parse_selector_list(parser);

    if !valid {
        parser.report_at(
            ErrorImpl::InvalidSelector {
                selector: selectors.to_string(),
            },
            start,
        );
    }

    if !open_block(parser) {
        return None;
    }

    let mut rule = StyleRule {
        selectors,
        ..Default::default()
    };
    fill_declarations(parser, &mut rule.declarations, PropertySet::Standard);
    close_block(parser);

    valid.then_some(Rule::Style(rule))
}

fn parse_media_rule(parser: &mut Parser) -> Option<Rule> {
    let mut rule = MediaRule::default();

    if parser.current_token_kind() != TokenKind::OpenCurly {
        fill_media_list(parser, &mut rule.media, TokenKind::OpenCurly);
    }

    match parser.current_token_kind() {
        TokenKind::OpenCurly => {
            parser.advance();
            fill_rules(parser, &mut rule.rules);
            close_block(parser);
        }
        TokenKind::Semicolon => {
            parser.report(ErrorImpl::InvalidBlockStart {
                token: String::from(";"),
            });
            parser.advance();
            return None;
        }
        _ => {
            parser.report(ErrorImpl::InvalidBlockStart {
                token: parser.current_token().value.clone(),
            });
        }
    }

    Some(Rule::Media(rule))
}

fn parse_supports_rule(parser: &mut Parser) -> Option<Rule> {
    let condition = if parser.current_token_kind() == TokenKind::OpenCurly {
        Condition::Empty
    } else {
        match parse_aggregate(parser) {
            Some(condition) => condition,
            None => {
                parser.report(ErrorImpl::InvalidToken {
                    token: parser.current_token().value.clone(),
                });
                skip_rule(parser);
                return None;
            }
        }
    };

    if !open_block(parser) {
        return None;
    }

    let mut rule = SupportsRule {
        condition,
        rules: vec![],
    };
    fill_rules(parser, &mut rule.rules);
    close_block(parser);

    Some(Rule::Supports(rule))
}

fn parse_font_face_rule(parser: &mut Parser) -> Option<Rule> {
    if !open_block(parser) {
        return None;
    }

    let mut rule = FontFaceRule::default();
    fill_declarations(parser, &mut rule.declarations, PropertySet::FontFace);
    close_block(parser);

    Some(Rule::FontFace(rule))
}

fn parse_viewport_rule(parser: &mut Parser) -> Option<Rule> {
    if !open_block(parser) {
        return None;
    }

    let mut rule = ViewportRule::default();
    fill_declarations(parser, &mut rule.declarations, PropertySet::Viewport);
    close_block(parser);

    Some(Rule::Viewport(rule))
}

fn parse_page_rule(parser: &mut Parser) -> Option<Rule> {
    let mut selector = String::new();
    while !matches!(
        parser.current_token_kind(),
        TokenKind::OpenCurly | TokenKind::CloseCurly | TokenKind::Semicolon | TokenKind::EOF
    ) {
        if parser.has_trivia_before() && !selector.is_empty() {
            selector.push(' ');
        }
        selector.push_str(&parser.advance().value);
    }

    if !open_block(parser) {
        return None;
    }

    let mut rule = PageRule {
        selector: (!selector.is_empty()).then_some(selector),
        ..Default::default()
    };
    fill_declarations(parser, &mut rule.declarations, PropertySet::Standard);
    close_block(parser);

    Some(Rule::Page(rule))
}

fn parse_keyframes_rule(parser: &mut Parser) -> Option<Rule> {
    let name = match parser.current_token_kind() {
        TokenKind::Ident => parser.advance().value,
        TokenKind::String => parser.advance().unquoted(),
        _ => {
            parser.report(ErrorImpl::IdentExpected {
                token: parser.current_token().value.clone(),
            });
            skip_rule(parser);
            return None;
        }
    };

    if !open_block(parser) {
        return None;
    }

    let mut rule = KeyframesRule { name, rules: vec![] };
    while !matches!(parser.current_token_kind(), TokenKind::CloseCurly | TokenKind::EOF) {
        let before = parser.get_position().0;
        if let Some(keyframe) = parse_keyframe(parser) {
            rule.rules.push(keyframe);
        }
        parser.ensure_progress(before);
    }
    close_block(parser);

    Some(Rule::Keyframes(rule))
}

/// Parses one `keys { declarations }` block of `@keyframes`.
pub fn parse_keyframe(parser: &mut Parser) -> Option<KeyframeRule> {
    parser.framed(|parser| {
        let start = parser.get_position();
        let mut keys = vec![];
        let mut text = String::new();
        let mut expect_key = true;
        let mut valid = true;

        while !matches!(
            parser.current_token_kind(),
            TokenKind::OpenCurly | TokenKind::CloseCurly | TokenKind::Semicolon | TokenKind::EOF
        ) {
            let token = parser.advance();
            text.push_str(&token.value);

            let is_key = token.kind == TokenKind::Percentage || token.is_ident("from") || token.is_ident("to");
            match token.kind {
                _ if is_key && expect_key => {
                    keys.push(normalize_keyframe_key(&token.value));
                    expect_key = false;
                }
                TokenKind::Comma if !expect_key => expect_key = true,
                _ => valid = false,
            }
        }

        if expect_key {
            valid = false;
        }
        if !valid {
            parser.report_at(ErrorImpl::InvalidSelector { selector: text }, start);
        }

        if !open_block(parser) {
            return None;
        }

        let mut rule = KeyframeRule {
            keys,
            declarations: DeclarationBlock::new(),
        };
        fill_declarations(parser, &mut rule.declarations, PropertySet::Standard);
        close_block(parser);

        valid.then_some(rule)
    })
}

/// Reads `"text"`, `url(text)` or `url("text")`.
fn parse_location(parser: &mut Parser) -> Option<String> {
    match parser.current_token_kind() {
        TokenKind::String => Some(parser.advance().unquoted()),
        TokenKind::Url => Some(parser.advance().url_value()),
        TokenKind::Function if parser.current_token().name().eq_ignore_ascii_case("url") => {
            parser.advance();
            let location = match parser.current_token_kind() {
                TokenKind::String => parser.advance().unquoted(),
                _ => {
                    jump_to_arg_end(parser, 1);
                    return None;
                }
            };
            if parser.current_token_kind() != TokenKind::CloseParen {
                jump_to_arg_end(parser, 1);
                return None;
            }
            parser.advance();
            Some(location)
        }
        _ => None,
    }
}

fn parse_import_rule(parser: &mut Parser) -> Option<Rule> {
    let Some(href) = parse_location(parser) else {
        parser.report(ErrorImpl::InvalidValue {
            value: parser.current_token().value.clone(),
        });
        jump_to_end(parser);
        return None;
    };

    let mut media = MediaList::new();
    if !matches!(parser.current_token_kind(), TokenKind::Semicolon | TokenKind::EOF) {
        fill_media_list(parser, &mut media, TokenKind::Semicolon);
    }
    jump_to_end(parser);

    Some(Rule::Import(ImportRule { href, media }))
}

fn parse_charset_rule(parser: &mut Parser) -> Option<Rule> {
    if parser.current_token_kind() != TokenKind::String {
        parser.report(ErrorImpl::InvalidValue {
            value: parser.current_token().value.clone(),
        });
        jump_to_end(parser);
        return None;
    }

    let encoding = parser.advance().unquoted();
    jump_to_end(parser);

    Some(Rule::Charset(CharsetRule { encoding }))
}

fn parse_namespace_rule(parser: &mut Parser) -> Option<Rule> {
    let prefix = match parser.current_token_kind() {
        TokenKind::Ident => Some(parser.advance().value),
        _ => None,
    };

    let Some(uri) = parse_location(parser) else {
        parser.report(ErrorImpl::InvalidValue {
            value: parser.current_token().value.clone(),
        });
        jump_to_end(parser);
        return None;
    };
    jump_to_end(parser);

    Some(Rule::Namespace(NamespaceRule { prefix, uri }))
}

fn parse_document_function(parser: &mut Parser) -> Option<DocumentFunction> {
    match parser.current_token_kind() {
        TokenKind::Url => Some(DocumentFunction {
            kind: DocumentFunctionKind::Url,
            argument: parser.advance().url_value(),
        }),
        TokenKind::Function => {
            let function = parser.advance();
            let kind = DocumentFunctionKind::from_name(function.name());
            let argument = match parser.current_token_kind() {
                TokenKind::String => Some(parser.advance().unquoted()),
                _ => None,
            };

            if kind.is_none() || argument.is_none() || parser.current_token_kind() != TokenKind::CloseParen {
                jump_to_arg_end(parser, 1);
                return None;
            }
            parser.advance();

            Some(DocumentFunction {
                kind: kind?,
                argument: argument?,
            })
        }
        _ => None,
    }
}

fn parse_document_rule(parser: &mut Parser) -> Option<Rule> {
    let mut rule = DocumentRule::default();

    loop {
        match parse_document_function(parser) {
            Some(function) => rule.functions.push(function),
            None => {
                parser.report(ErrorImpl::InvalidValue {
                    value: parser.current_token().value.clone(),
                });
                skip_rule(parser);
                return None;
            }
        }

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    if !open_block(parser) {
        return None;
    }
    fill_rules(parser, &mut rule.rules);
    close_block(parser);

    Some(Rule::Document(rule))
}

/// Moves the current token into `out`, preceded by a single space token
/// when trivia separated it from the previous one.
fn capture(parser: &mut Parser, out: &mut Vec<Token>, keep_space: bool) {
    if keep_space && parser.has_trivia_before() {
        let span = parser.current_token().span.clone();
        out.push(Token {
            kind: TokenKind::Whitespace,
            value: String::from(" "),
            span,
        });
    }
    out.push(parser.advance());
}

/// Keeps an unrecognised at-rule token for token, or reports and skips it
/// when unknown rules are not allowed.
fn parse_unknown_rule(parser: &mut Parser, name: String, position: Position) -> Option<Rule> {
    if !parser.config().allow_unknown_rules {
        parser.report_at(ErrorImpl::UnknownAtRule { name }, position);
        skip_rule(parser);
        return None;
    }

    let mut prelude = vec![];
    while !matches!(
        parser.current_token_kind(),
        TokenKind::OpenCurly | TokenKind::Semicolon | TokenKind::EOF
    ) {
        let keep_space = !prelude.is_empty();
        capture(parser, &mut prelude, keep_space);
    }

    let block = match parser.current_token_kind() {
        TokenKind::OpenCurly => {
            parser.advance();
            let mut content = vec![];
            let mut depth = 1usize;
            while parser.has_tokens() {
                match parser.current_token_kind() {
                    TokenKind::OpenCurly => depth += 1,
                    TokenKind::CloseCurly => depth -= 1,
                    _ => {}
                }
                capture(parser, &mut content, true);
                if depth == 0 {
                    break;
                }
            }
            Some(content)
        }
        TokenKind::Semicolon => {
            parser.advance();
            None
        }
        _ => None,
    };

    Some(Rule::Unknown(UnknownRule { name, prelude, block }))
}
