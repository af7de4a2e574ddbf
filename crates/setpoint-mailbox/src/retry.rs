//! Retry policy for the blocking read loop.

use std::time::Duration;

/// Default polling interval between read attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Pacing and bounds for channel polling.
///
/// Every read sleeps `interval` before its first attempt and between
/// retries; the interval is fixed, with no backoff growth. The default
/// policy polls forever, matching the protocol's original blocking
/// discipline; a bounded policy makes the read fail with
/// [`Error::Timeout`](crate::Error::Timeout) once the ceiling is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Interval slept before every read attempt.
    pub interval: Duration,
    /// Retry ceiling for empty channels; `None` polls forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(DEFAULT_POLL_INTERVAL)
    }
}

impl RetryPolicy {
    /// Poll forever at `interval`.
    #[must_use]
    pub const fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    /// Poll at `interval`, giving up after `max_attempts` retries.
    #[must_use]
    pub const fn bounded(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: Some(max_attempts),
        }
    }

    /// Create a policy optimized for tests: short sleeps, generous ceiling.
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            interval: Duration::from_millis(2),
            max_attempts: Some(500),
        }
    }

    /// True once `attempts` retries have used up the ceiling.
    pub(crate) fn exhausted(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts >= max,
            None => false,
        }
    }
}
