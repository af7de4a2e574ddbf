//! Trigger sources for reactive execution.
//!
//! A reactive node does not poll for work; something hands it the next error
//! sample. [`TriggerSource`] is that seam. Production wiring uses
//! [`ChannelTrigger`] fed from another thread; tests inject closures.

use std::sync::mpsc::Receiver;

/// Yields error samples until the source is exhausted.
pub trait TriggerSource {
    /// Block for the next sample, or `None` when no more will arrive.
    fn next_trigger(&mut self) -> Option<f64>;
}

/// Trigger source backed by an mpsc channel.
///
/// Yields samples as they arrive and ends when every sender is dropped.
#[derive(Debug)]
pub struct ChannelTrigger {
    receiver: Receiver<f64>,
}

impl ChannelTrigger {
    pub fn new(receiver: Receiver<f64>) -> Self {
        Self { receiver }
    }
}

impl TriggerSource for ChannelTrigger {
    fn next_trigger(&mut self) -> Option<f64> {
        self.receiver.recv().ok()
    }
}

impl<F> TriggerSource for F
where
    F: FnMut() -> Option<f64>,
{
    fn next_trigger(&mut self) -> Option<f64> {
        self()
    }
}
