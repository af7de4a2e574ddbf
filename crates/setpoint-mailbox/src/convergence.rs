//! Convergence detection over accumulated read text.
//!
//! The barrier is a two-snapshot comparison: every successful read appends
//! its raw content to an accumulator, and a check compares the accumulator
//! against the previous check's snapshot. Equal snapshots mean no read
//! activity happened in between: the exchange has stabilized.
//!
//! The barrier never blocks; callers drive their own loop around it.

use tracing::trace;

/// The accumulator pair behind the convergence barrier.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceTracker {
    accumulated: String,
    previous: String,
}

impl ConvergenceTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the raw text of one successful read.
    pub fn record(&mut self, content: &str) {
        self.accumulated.push_str(content);
    }

    /// Two-phase convergence check.
    ///
    /// The first check after a burst of reads typically snapshots the
    /// accumulator and reports `false`; the next check, if no reads
    /// happened in between, finds the snapshots equal and reports `true`.
    /// On convergence both snapshots clear, so a converged tracker stays
    /// converged until the next read re-arms it.
    pub fn check(&mut self) -> bool {
        if self.accumulated == self.previous {
            self.accumulated.clear();
            self.previous.clear();
            trace!("read exchange converged");
            true
        } else {
            self.previous = self.accumulated.clone();
            trace!(
                accumulated = self.accumulated.len(),
                "snapshot taken, not converged"
            );
            false
        }
    }

    /// Discard both snapshots.
    pub fn clear(&mut self) {
        self.accumulated.clear();
        self.previous.clear();
    }

    /// The text accumulated since the last convergence.
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }
}
