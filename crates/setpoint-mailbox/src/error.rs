//! Error types for setpoint-mailbox.

use thiserror::Error;

use crate::address::ChannelAddress;

/// Result type for setpoint-mailbox operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during mailbox channel operations.
///
/// Transient read-side failures never appear here: a missing or unreadable
/// channel is absorbed into the fallback literal, and an empty channel is
/// retried. What does surface is malformed *existing* data, fatal write-side
/// filesystem failures, and exhausted bounded retry policies.
#[derive(Debug, Error)]
pub enum Error {
    /// The channel carried text that does not decode as a message.
    #[error("malformed payload: {0}")]
    Payload(#[from] setpoint_codec::Error),

    /// A decoded message carried no elements, so there is no timestamp.
    #[error("message carried no timestamp (decoded payload was empty)")]
    EmptyMessage,

    /// Fatal filesystem failure while writing a channel.
    #[error("channel {channel} is not writable: {source}")]
    ChannelAccess {
        channel: ChannelAddress,
        #[source]
        source: std::io::Error,
    },

    /// A bounded retry policy gave up waiting for channel content.
    #[error("channel {channel} still empty after {attempts} retries")]
    Timeout {
        channel: ChannelAddress,
        attempts: u32,
    },
}

impl Error {
    /// Fatal write-side filesystem failure on `channel`.
    pub(crate) fn access(channel: &ChannelAddress, source: std::io::Error) -> Self {
        Self::ChannelAccess {
            channel: channel.clone(),
            source,
        }
    }
}
