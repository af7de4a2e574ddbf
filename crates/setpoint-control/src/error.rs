//! Error types for setpoint-control.

use thiserror::Error;

/// Result type for setpoint-control operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while executing a control node.
#[derive(Debug, Error)]
pub enum Error {
    /// A node step was asked to divide by a zero timestep.
    #[error("zero timestep: the derivative term divides by dt")]
    DivisionByZero,

    /// A channel message carried a timestamp but no signal value.
    #[error("message carried no signal values")]
    MissingSignal,

    /// Mailbox I/O failed.
    #[error("mailbox error: {0}")]
    Mailbox(#[from] setpoint_mailbox::Error),
}
