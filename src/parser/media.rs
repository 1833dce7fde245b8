use crate::{
    ast::media::{Feature, MediaList, Medium},
    lexer::tokens::TokenKind,
};

use super::{parser::Parser, recovery::jump_to_media_end, value::parse_value_until};

const FEATURE_VALUE_END: [TokenKind; 4] = [
    TokenKind::CloseParen,
    TokenKind::OpenCurly,
    TokenKind::CloseCurly,
    TokenKind::Semicolon,
];

/// Parses `( name [: value] )`.
pub fn parse_feature(parser: &mut Parser) -> Option<Feature> {
    parser.framed(|parser| {
        if parser.current_token_kind() != TokenKind::OpenParen {
            return None;
        }
        parser.advance();

        if parser.current_token_kind() != TokenKind::Ident {
            return None;
        }
        let name = parser.advance().value;

        let mut feature = match parser.factory().resolve_feature(&name) {
            Some(feature) => feature,
            None if parser.config().tolerate_invalid_constraints => Feature::new(name.to_ascii_lowercase()),
            None => return None,
        };

        if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            let parsed = parse_value_until(parser, &FEATURE_VALUE_END);
            if !parsed.valid || parsed.important {
                return None;
            }
            feature.value = parsed.value;
        }

        if parser.current_token_kind() != TokenKind::CloseParen {
            return None;
        }
        parser.advance();

        Some(feature)
    })
}

fn parse_constraints(parser: &mut Parser, medium: &mut Medium) -> Option<()> {
    while parser.current_token().is_ident("and") {
        parser.advance();
        medium.constraints.push(parse_feature(parser)?);
    }
    Some(())
}

/// Parses one query: `[not|only] type [and feature]*` or
/// `feature [and feature]*`.
pub fn parse_medium(parser: &mut Parser) -> Option<Medium> {
    parser.framed(|parser| match parser.current_token_kind() {
        TokenKind::Ident => {
            let mut is_inverse = false;
            let mut is_exclusive = false;

            if parser.current_token().is_ident("not") {
                is_inverse = true;
                parser.advance();
            } else if parser.current_token().is_ident("only") {
                is_exclusive = true;
                parser.advance();
            }

            if parser.current_token_kind() != TokenKind::Ident || parser.current_token().is_ident("and") {
                return None;
            }

            let mut medium = Medium {
                is_inverse,
                is_exclusive,
                ..Medium::new(parser.advance().value.to_ascii_lowercase())
            };
            parse_constraints(parser, &mut medium)?;
            Some(medium)
        }
        TokenKind::OpenParen => {
            let mut medium = Medium::new("all");
            medium.constraints.push(parse_feature(parser)?);
            parse_constraints(parser, &mut medium)?;
            Some(medium)
        }
        _ => None,
    })
}

/// Fills `list` with the comma separated queries ending at `terminator`,
/// which is left unconsumed.
///
/// A list with any malformed member, or one not followed by `terminator`,
/// is skipped to its end and collapses to `not all`.
pub fn fill_media_list(parser: &mut Parser, list: &mut MediaList, terminator: TokenKind) {
    let parsed = parser.framed(|parser| {
        let start = parser.get_position();
        let mut media = vec![];
        let mut complete = true;

        loop {
            match parse_medium(parser) {
                Some(medium) => media.push(medium),
                None => {
                    complete = false;
                    break;
                }
            }

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }

        let mut list = MediaList::new();
        if complete && !media.is_empty() && parser.current_token_kind() == terminator {
            list.set(media);
        } else {
            tracing::debug!(offset = start.0, "malformed media list, using `not all`");
            jump_to_media_end(parser, terminator);
            list.replace_with_fallback();
        }
        Some(list)
    });

    if let Some(parsed) = parsed {
        *list = parsed;
    }
}
