//! Error types for figura encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur while decoding JSON or XML text into a [`Value`](crate::Value).
///
/// Unrecognized top-level input and unrepresentable values are not errors: the former
/// decodes to `Null`, the latter degrades to an inline marker reported through an
/// [`Observer`](crate::Observer).
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input started like a JSON document but was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A numeric field inside an extended-type payload could not be parsed,
    /// or the payload had the wrong number of fields.
    #[error("Malformed number literal '{literal}' in {context}")]
    MalformedNumberLiteral {
        literal: String,
        context: &'static str,
    },

    /// A color payload was neither a known color name nor a hex color.
    #[error("Invalid color: '{0}'")]
    InvalidColor(String),

    /// A guarded point was given coordinates outside the accepted bound.
    #[error("Point ({x}, {y}) is out of range")]
    OutOfRange { x: i32, y: i32 },
}

impl CodecError {
    pub(crate) fn malformed(literal: impl Into<String>, context: &'static str) -> Self {
        CodecError::MalformedNumberLiteral {
            literal: literal.into(),
            context,
        }
    }
}

/// Convenience alias used throughout figura-core.
pub type Result<T> = std::result::Result<T, CodecError>;
