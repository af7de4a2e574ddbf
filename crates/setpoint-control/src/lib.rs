//! Deterministic PID control nodes and their execution drivers.
//!
//! A [`PidNode`] carries private integral and previous-error state and
//! advances through explicit [`step`](PidNode::step) calls; nothing about a
//! node is global or implicit. Three drivers run the same node:
//!
//! - [`run_batch`] replays a fixed error slice with a unit timestep
//! - [`reactive_loop`] steps on demand from an injected [`TriggerSource`]
//! - [`run_channel`] closes the loop through mailbox channels on disk
//!
//! A zero timestep is rejected before any state changes, so a failed step
//! leaves its node untouched.

pub mod error;
pub mod pid;
pub mod runner;
pub mod trigger;

pub use error::{Error, Result};
pub use pid::{PidGains, PidNode};
pub use runner::{reactive_loop, run_batch, run_channel, ChannelLoopConfig};
pub use trigger::{ChannelTrigger, TriggerSource};
