use crate::{
    ast::declarations::Property,
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    factory::PropertySet,
    parser::Parser,
    recovery::jump_to_decl_end,
    value::parse_value_until,
};

const VALUE_END: [TokenKind; 2] = [TokenKind::Semicolon, TokenKind::CloseCurly];

/// Looks the name up in the table for `set`. Names nothing knows become
/// opaque placeholders; outside of opaque mode that is reported.
fn resolve_property(parser: &mut Parser, name: &str, set: PropertySet, position: Position) -> Property {
    if parser.config().opaque_declarations() {
        return Property::unknown(name);
    }

    match parser.factory().resolve_in(set, name) {
        Some(property) => property,
        None => {
            parser.report_at(
                ErrorImpl::UnknownDeclarationName {
                    name: name.to_string(),
                },
                position,
            );
            Property::unknown(name)
        }
    }
}

fn abandon(parser: &mut Parser) -> Option<Property> {
    jump_to_decl_end(parser);
    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }
    None
}

/// Parses one `name: value [!important]` declaration, consuming its `;`.
///
/// The name is every token up to `:` that is not separated by trivia,
/// so hacks like `*zoom` keep their prefix. A declaration is returned only
/// when it has both a name and a value the value grammar accepts.
pub fn parse_declaration(parser: &mut Parser, set: PropertySet) -> Option<Property> {
    parser.framed(|parser| {
        let start = parser.get_position();
        let mut name = String::new();

        while !matches!(
            parser.current_token_kind(),
            TokenKind::Colon
                | TokenKind::OpenCurly
                | TokenKind::Semicolon
                | TokenKind::CloseCurly
                | TokenKind::EOF
        ) && (name.is_empty() || !parser.has_trivia_before())
        {
            name.push_str(&parser.advance().value);
        }

        if name.is_empty() {
            if parser.has_tokens() {
                parser.report(ErrorImpl::IdentExpected {
                    token: parser.current_token().value.clone(),
                });
            }
            return abandon(parser);
        }

        let mut property = resolve_property(parser, &name, set, start);

        if parser.current_token_kind() != TokenKind::Colon {
            parser.report(ErrorImpl::ColonMissing { property: name });
            return abandon(parser);
        }
        parser.advance();

        let parsed = parse_value_until(parser, &VALUE_END);
        let Some(value) = parsed.value else {
            parser.report(ErrorImpl::ValueMissing { property: name });
            return abandon(parser);
        };

        if !parsed.valid && !parser.config().tolerate_invalid_values {
            parser.report(ErrorImpl::InvalidValue {
                value: value.to_string(),
            });
            return abandon(parser);
        }

        if parser.current_token_kind() == TokenKind::Semicolon {
            parser.advance();
        }

        property.set_value(value, parsed.important);
        Some(property)
    })
}
