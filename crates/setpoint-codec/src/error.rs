//! Error types for setpoint-codec.

use thiserror::Error;

/// Result type for setpoint-codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a payload.
///
/// Every variant means the payload is malformed: the text that remained
/// after normalization was not a valid numeric sequence literal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The payload is not a bracketed sequence at the top level.
    #[error("payload is not a bracketed sequence")]
    NotASequence,

    /// A character that fits no grammar rule at this position.
    #[error("unexpected character `{found}` at byte {at}")]
    UnexpectedChar { found: char, at: usize },

    /// The payload ended before every open bracket was closed.
    #[error("payload ended before the sequence was closed")]
    UnexpectedEnd,

    /// A leaf token that is neither a number nor a recognized literal.
    #[error("non-numeric leaf `{token}` at byte {at}")]
    NonNumericLeaf { token: String, at: usize },

    /// A boolean or null leaf rejected by the strict policy.
    #[error("leaf `{token}` at byte {at} has no numeric value under the strict policy")]
    StrictLeaf { token: String, at: usize },

    /// Text remained after the top-level sequence closed.
    #[error("trailing content after the sequence at byte {at}")]
    TrailingContent { at: usize },
}
