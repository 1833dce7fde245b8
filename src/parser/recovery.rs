//! Resynchronization scans used after a diagnostic.
//!
//! Every scan stops at end of input; none of them reports anything.

use crate::lexer::tokens::TokenKind;

use super::parser::Parser;

/// Skips the rest of a malformed rule: through the first `;` or `}` met at
/// brace depth zero or below, both consumed.
pub fn skip_rule(parser: &mut Parser) {
    let mut depth: i32 = 0;
    let mut skipped = 0usize;

    while parser.has_tokens() {
        let kind = parser.current_token_kind();
        match kind {
            TokenKind::OpenCurly => depth += 1,
            TokenKind::CloseCurly => depth -= 1,
            _ => {}
        }

        parser.advance();
        skipped += 1;

        if depth <= 0 && matches!(kind, TokenKind::Semicolon | TokenKind::CloseCurly) {
            break;
        }
    }

    tracing::trace!(skipped, "skip rule");
}

/// Skips to the end of a statement at-rule, consuming its `;`. Braces are
/// not balanced.
pub fn jump_to_end(parser: &mut Parser) {
    let mut skipped = 0usize;

    while parser.has_tokens() {
        let token = parser.advance();
        skipped += 1;
        if token.kind == TokenKind::Semicolon {
            break;
        }
    }

    tracing::trace!(skipped, "jump to statement end");
}

/// Skips the rest of a declaration. Stops before the `;` or the `}` that
/// closes the enclosing block; nested blocks are stepped over.
pub fn jump_to_decl_end(parser: &mut Parser) {
    let mut depth: i32 = 0;
    let mut skipped = 0usize;

    while parser.has_tokens() {
        match parser.current_token_kind() {
            TokenKind::Semicolon if depth <= 0 => break,
            TokenKind::CloseCurly if depth <= 0 => break,
            TokenKind::OpenCurly => depth += 1,
            TokenKind::CloseCurly => depth -= 1,
            _ => {}
        }
        parser.advance();
        skipped += 1;
    }

    tracing::trace!(skipped, "jump to declaration end");
}

/// Skips the rest of a function argument list. `depth` is the number of
/// parentheses already open; the one that closes the outermost is consumed.
pub fn jump_to_arg_end(parser: &mut Parser, mut depth: usize) {
    let mut skipped = 0usize;

    while parser.has_tokens() && depth > 0 {
        match parser.current_token_kind() {
            TokenKind::OpenParen | TokenKind::Function => depth += 1,
            TokenKind::CloseParen => depth -= 1,
            _ => {}
        }
        parser.advance();
        skipped += 1;
    }

    tracing::trace!(skipped, "jump to argument end");
}

/// Skips a malformed media query list up to (not including) `terminator`,
/// `;`, `{` or `}` outside parentheses.
pub fn jump_to_media_end(parser: &mut Parser, terminator: TokenKind) {
    let mut depth = 0usize;
    let mut skipped = 0usize;

    while parser.has_tokens() {
        let kind = parser.current_token_kind();
        if depth == 0
            && (kind == terminator
                || matches!(kind, TokenKind::Semicolon | TokenKind::OpenCurly | TokenKind::CloseCurly))
        {
            break;
        }

        match kind {
            TokenKind::OpenParen | TokenKind::Function => depth += 1,
            TokenKind::CloseParen => depth = depth.saturating_sub(1),
            _ => {}
        }
        parser.advance();
        skipped += 1;
    }

    tracing::trace!(skipped, "jump to media list end");
}
