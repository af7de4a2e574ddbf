//! Setpoint Mailbox - filesystem channels for co-simulated control nodes
//!
//! Independently-scheduled control nodes exchange numeric signal vectors
//! through files, each message tagged with a simulated time. The filesystem
//! gives no transport guarantees, so correctness rests entirely on this
//! crate's protocol rules:
//!
//! - **Blocking reads** poll at a fixed interval until content appears,
//!   absorbing access failures into a fallback literal. Missing data is
//!   normal; only malformed data is an error.
//! - **Clock merge**: every message carries a timestamp; readers merge it
//!   into the session clock via `max`, writers advance the clock by an
//!   explicit delta. Simulated time never regresses.
//! - **Convergence barrier**: reads append their raw text to an
//!   accumulator, and a two-snapshot comparison detects rounds in which no
//!   new messages arrived.
//!
//! # Example
//!
//! ```rust,ignore
//! use setpoint_mailbox::{ChannelAddress, RetryPolicy, Session};
//!
//! let mut session = Session::new("mailbox/in", "mailbox/out")
//!     .with_retry_policy(RetryPolicy::unbounded(std::time::Duration::from_millis(100)));
//!
//! let error_in = ChannelAddress::new(1, "error");
//! let control_out = ChannelAddress::new(1, "control");
//!
//! loop {
//!     let values = session.read(&error_in, "[0.0, 0.0]")?;
//!     let output = compute(&values);
//!     session.write_advancing(&control_out, &[output], 1)?;
//!     if session.has_converged() {
//!         break;
//!     }
//! }
//! ```

pub mod address;
pub mod convergence;
pub mod error;
pub mod retry;
pub mod session;

pub use address::ChannelAddress;
pub use convergence::ConvergenceTracker;
pub use error::{Error, Result};
pub use retry::{RetryPolicy, DEFAULT_POLL_INTERVAL};
pub use session::Session;

// Re-export the codec surface sessions are configured with
pub use setpoint_codec::LeafPolicy;
