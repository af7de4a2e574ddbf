//! Execution drivers for control nodes.
//!
//! Three ways to run the same node: [`run_batch`] over a fixed error slice,
//! [`reactive_loop`] over an injected [`TriggerSource`], and [`run_channel`]
//! closing the loop through mailbox channels on disk.

use setpoint_mailbox::{ChannelAddress, Session};
use tracing::debug;

use crate::error::{Error, Result};
use crate::pid::PidNode;
use crate::trigger::TriggerSource;

/// Step a node over a batch of error samples with a unit timestep.
///
/// Outputs keep the order of the inputs. The first failing step aborts the
/// batch.
pub fn run_batch(node: &mut PidNode, errors: &[f64]) -> Result<Vec<f64>> {
    errors.iter().map(|&error| node.step(error, 1.0)).collect()
}

/// Step a node on demand until the source ends or `max_steps` is reached.
///
/// Each trigger sample is treated as an error with a unit timestep.
pub fn reactive_loop<S>(node: &mut PidNode, source: &mut S, max_steps: usize) -> Result<Vec<f64>>
where
    S: TriggerSource,
{
    let mut outputs = Vec::new();
    while outputs.len() < max_steps {
        let Some(error) = source.next_trigger() else {
            debug!(steps = outputs.len(), "Trigger source closed");
            break;
        };
        let output = node.step(error, 1.0)?;
        debug!(step = outputs.len(), error, output, "Reactive step");
        outputs.push(output);
    }
    Ok(outputs)
}

/// Wiring for a channel-driven control loop.
#[derive(Debug, Clone)]
pub struct ChannelLoopConfig {
    /// Channel the error signal arrives on.
    pub input: ChannelAddress,
    /// Channel the control output is published to.
    pub output: ChannelAddress,
    /// Number of read-step-write rounds.
    pub steps: usize,
    /// Timestep fed to the controller each round.
    pub dt: f64,
    /// Clock increment applied by each outgoing write.
    pub delta: u32,
    /// Literal substituted when the input channel is unreadable.
    pub fallback: String,
}

impl ChannelLoopConfig {
    /// A loop with unit timestep and unit clock increment.
    pub fn new(input: ChannelAddress, output: ChannelAddress, steps: usize) -> Self {
        Self {
            input,
            output,
            steps,
            dt: 1.0,
            delta: 1,
            fallback: String::new(),
        }
    }

    #[must_use]
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    #[must_use]
    pub fn with_delta(mut self, delta: u32) -> Self {
        self.delta = delta;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

/// Drive a node through mailbox channels for a fixed number of rounds.
///
/// Each round reads one message from the input channel (the first value is
/// the error, extra values are ignored), steps the node, and writes the
/// output back out, advancing the session clock by `delta`.
///
/// # Errors
///
/// Fails on mailbox errors, on [`Error::MissingSignal`] when a message
/// carries a timestamp but no values, and on [`Error::DivisionByZero`] when
/// the configured timestep is zero.
pub fn run_channel(
    node: &mut PidNode,
    session: &mut Session,
    config: &ChannelLoopConfig,
) -> Result<Vec<f64>> {
    let mut outputs = Vec::with_capacity(config.steps);
    for round in 0..config.steps {
        let values = session.read(&config.input, &config.fallback)?;
        let error = match values.first() {
            Some(&error) => error,
            None => return Err(Error::MissingSignal),
        };
        let output = node.step(error, config.dt)?;
        session.write_advancing(&config.output, &[output], config.delta)?;
        debug!(
            round,
            error,
            output,
            simtime = session.simtime(),
            "Channel round"
        );
        outputs.push(output);
    }
    Ok(outputs)
}
