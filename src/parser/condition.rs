//! Boolean conditions of `@supports`.
//!
//! Connectors are not allowed to mix at one nesting level without
//! parentheses, so a chain is read into one flat `And` or `Or` node whose
//! connector is fixed by the first one seen. The first differing connector
//! ends the chain and stays under the cursor for the caller to reject.

use crate::{ast::conditions::Condition, ast::declarations::Property, lexer::tokens::TokenKind};

use super::{parser::Parser, value::parse_value_until};

const CONDITION_VALUE_END: [TokenKind; 4] = [
    TokenKind::CloseParen,
    TokenKind::OpenCurly,
    TokenKind::CloseCurly,
    TokenKind::Semicolon,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connector {
    And,
    Or,
}

fn connector_at(parser: &Parser) -> Option<Connector> {
    let token = parser.current_token();
    if token.is_ident("and") {
        Some(Connector::And)
    } else if token.is_ident("or") {
        Some(Connector::Or)
    } else {
        None
    }
}

/// Parses `cond (connector cond)*` with a single connector kind.
pub fn parse_aggregate(parser: &mut Parser) -> Option<Condition> {
    parser.framed(|parser| {
        let first = parse_condition(parser)?;

        let Some(connector) = connector_at(parser) else {
            return Some(first);
        };

        let mut children = vec![first];
        while connector_at(parser) == Some(connector) {
            parser.advance();
            children.push(parse_condition(parser)?);
        }

        tracing::trace!(?connector, children = children.len(), "condition chain");
        Some(match connector {
            Connector::And => Condition::And(children),
            Connector::Or => Condition::Or(children),
        })
    })
}

/// Parses one operand: a parenthesized group, `not` operand, or a bare
/// `name: value` declaration.
pub fn parse_condition(parser: &mut Parser) -> Option<Condition> {
    parser.framed(|parser| {
        // A property literally named `not` is still a declaration.
        let negation = parser.current_token().is_ident("not") && parser.peek_token().kind != TokenKind::Colon;

        match parser.current_token_kind() {
            TokenKind::OpenParen => {
                parser.advance();
                let inner = parse_aggregate(parser)?;
                // An unclosed group ends where its content does.
                if parser.current_token_kind() == TokenKind::CloseParen {
                    parser.advance();
                }
                Some(Condition::Group(Box::new(inner)))
            }
            TokenKind::Ident if negation => {
                parser.advance();
                let inner = parse_condition(parser)?;
                Some(Condition::Not(Box::new(inner)))
            }
            TokenKind::Ident => parse_declaration_condition(parser),
            _ => None,
        }
    })
}

fn parse_declaration_condition(parser: &mut Parser) -> Option<Condition> {
    let name = parser.advance().value;

    let mut property = if parser.config().opaque_declarations() {
        Property::unknown(&name)
    } else {
        parser
            .factory()
            .resolve(&name)
            .unwrap_or_else(|| Property::unknown(&name))
    };

    if parser.current_token_kind() != TokenKind::Colon {
        return None;
    }
    parser.advance();

    let parsed = parse_value_until(parser, &CONDITION_VALUE_END);
    let value = parsed.value?;
    if !parsed.valid && !parser.config().tolerate_invalid_values {
        return None;
    }

    property.set_value(value, parsed.important);
    Some(Condition::Declaration(property))
}
