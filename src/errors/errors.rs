use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A diagnostic tagged with the source offset it was reported at.
///
/// Parse diagnostics are non-fatal: the parser collects them and recovers.
/// Only caller-level misuse (e.g. assigning unparseable condition text) is
/// returned through `Result`.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InvalidBlockStart { .. } => "InvalidBlockStart",
            ErrorImpl::InvalidToken { .. } => "InvalidToken",
            ErrorImpl::UnknownAtRule { .. } => "UnknownAtRule",
            ErrorImpl::InvalidSelector { .. } => "InvalidSelector",
            ErrorImpl::UnknownDeclarationName { .. } => "UnknownDeclarationName",
            ErrorImpl::ValueMissing { .. } => "ValueMissing",
            ErrorImpl::ColonMissing { .. } => "ColonMissing",
            ErrorImpl::IdentExpected { .. } => "IdentExpected",
            ErrorImpl::InvalidValue { .. } => "InvalidValue",
            ErrorImpl::SyntaxError { .. } => "SyntaxError",
            ErrorImpl::IndexSizeError { .. } => "IndexSizeError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::InvalidBlockStart { token } => ErrorTip::Suggestion(format!(
                "Expected `{{` to open a block, found `{}`",
                token
            )),
            ErrorImpl::InvalidToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, a rule cannot start here",
                token
            )),
            ErrorImpl::UnknownAtRule { name } => {
                ErrorTip::Suggestion(format!("At-rule `@{}` is not supported and was skipped", name))
            }
            ErrorImpl::InvalidSelector { selector } => {
                ErrorTip::Suggestion(format!("Selector `{}` is not valid, the rule was dropped", selector))
            }
            ErrorImpl::UnknownDeclarationName { name } => {
                ErrorTip::Suggestion(format!("Unknown property `{}`", name))
            }
            ErrorImpl::ValueMissing { property } => {
                ErrorTip::Suggestion(format!("Property `{}` has no value", property))
            }
            ErrorImpl::ColonMissing { property } => {
                ErrorTip::Suggestion(format!("Expected `:` after property name `{}`", property))
            }
            ErrorImpl::IdentExpected { token } => ErrorTip::Suggestion(format!(
                "Expected a property name, found `{}`",
                token
            )),
            ErrorImpl::InvalidValue { value } => {
                ErrorTip::Suggestion(format!("Value `{}` could not be parsed", value))
            }
            ErrorImpl::SyntaxError { text } => {
                ErrorTip::Suggestion(format!("`{}` is not valid here", text))
            }
            ErrorImpl::IndexSizeError { index, length } => ErrorTip::Suggestion(format!(
                "Index {} is out of range for a list of {} rules",
                index, length
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.internal_error, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("invalid block start: {token:?}")]
    InvalidBlockStart { token: String },
    #[error("invalid token: {token:?}")]
    InvalidToken { token: String },
    #[error("unknown at-rule: @{name}")]
    UnknownAtRule { name: String },
    #[error("invalid selector: {selector:?}")]
    InvalidSelector { selector: String },
    #[error("unknown declaration name: {name:?}")]
    UnknownDeclarationName { name: String },
    #[error("value missing for property {property:?}")]
    ValueMissing { property: String },
    #[error("colon missing after property {property:?}")]
    ColonMissing { property: String },
    #[error("identifier expected, found {token:?}")]
    IdentExpected { token: String },
    #[error("invalid value: {value:?}")]
    InvalidValue { value: String },
    #[error("syntax error: {text:?}")]
    SyntaxError { text: String },
    #[error("index {index} out of range for {length} rules")]
    IndexSizeError { index: usize, length: usize },
}
