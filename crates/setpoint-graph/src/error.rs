//! Error types for setpoint-graph.

use thiserror::Error;

/// Result type for setpoint-graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a workflow graph.
#[derive(Debug, Error)]
pub enum Error {
    /// The document could not be read.
    #[error("failed to read graph file: {0}")]
    Io(#[from] std::io::Error),

    /// The document does not match the accepted graph shape.
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A gain attribute carried a non-numeric value.
    #[error("node {node}: attribute {key}={value} is not a decimal literal")]
    Attribute {
        node: String,
        key: String,
        value: String,
    },
}
