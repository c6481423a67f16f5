use thiserror::Error;

use crate::path::NodePath;

pub type JsonOutcome<T> = Result<T, JsonError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token stream or unexpected token. Aborts the parse.
    Syntax,
    /// Node variant does not match what the codec expects.
    WrongType,
    /// Mandatory field absent from a decoded object node.
    MissingField,
    /// A constructor function rejected an otherwise well-typed value.
    InvalidValue,
    /// Aggregate of two or more field-level errors from one object decode.
    Multiple,
    /// No codec registered for a discriminator value.
    UnknownSubtype,
}

/// Error raised anywhere in the lex/parse/decode/encode pipeline.
///
/// `location` is the slash-separated path of the offending node, or the
/// literal `parsing` when the failure happened before any tree node existed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error at {location}: {reason}")]
pub struct JsonError {
    pub kind: ErrorKind,
    pub location: String,
    pub reason: String,
}

impl JsonError {
    /// Error attached to a known tree position.
    pub fn at(path: &NodePath, kind: ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            location: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Fatal token-level failure while a value was being parsed.
    pub fn syntax(position: usize, expected: &str, found: &str, path: &NodePath) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            location: "parsing".to_string(),
            reason: format!(
                "expected {expected} at position {position} but found '{found}' while parsing <{path}>"
            ),
        }
    }

    /// Fatal character-level failure inside the lexer, before any token exists.
    pub fn lexing(position: usize, reason: &str) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            location: "parsing".to_string(),
            reason: format!("{reason} at position {position}"),
        }
    }

    pub fn wrong_type(path: &NodePath, expected: &str, found: &str) -> Self {
        Self::at(
            path,
            ErrorKind::WrongType,
            format!("expected {expected} but found {found}"),
        )
    }

    pub fn missing_field(path: &NodePath, name: &str) -> Self {
        Self::at(
            path,
            ErrorKind::MissingField,
            format!("field '{name}' not found"),
        )
    }

    pub fn invalid_value(path: &NodePath, reason: impl Into<String>) -> Self {
        Self::at(path, ErrorKind::InvalidValue, reason)
    }

    pub fn unknown_subtype(path: &NodePath, subtype: &str) -> Self {
        Self::at(
            path,
            ErrorKind::UnknownSubtype,
            format!("subtype not known: {subtype}"),
        )
    }

    /// Combine field-level errors collected from one object decode.
    /// Reasons keep registration order.
    pub fn multiple(path: &NodePath, errors: Vec<JsonError>) -> Self {
        let reasons = errors
            .iter()
            .map(|error| format!("<{}> {}", error.location, error.reason))
            .collect::<Vec<_>>()
            .join("; ");
        Self::at(
            path,
            ErrorKind::Multiple,
            format!("multiple errors: {reasons}"),
        )
    }
}
