//! Mailbox session - blocking channel I/O over a shared filesystem.
//!
//! A [`Session`] is the explicit context for one control node's side of the
//! mailbox protocol: the simulated clock, the retry policy, the cumulative
//! retry counter, the convergence accumulators, and the base directories
//! for channel resolution. Nothing here is process-global; independent
//! sessions never interfere.
//!
//! # Read discipline
//!
//! Every read sleeps one poll interval first, even when data is already
//! waiting - uniform pacing trades latency for reduced filesystem
//! contention. Access failures (missing file, permissions, transient I/O)
//! are absorbed into a caller-supplied fallback literal; empty content is
//! polled at a fixed interval. Only malformed *existing* data is an error.
//!
//! # Write discipline
//!
//! Writes encode `[simtime + delta, values...]`, replace the channel file
//! atomically (staged write, then rename), and advance the clock by `delta`
//! afterwards. The header and the post-call clock always agree.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use setpoint_codec::{decode_with_policy, encode, LeafPolicy};
use tracing::{debug, trace};

use crate::address::ChannelAddress;
use crate::convergence::ConvergenceTracker;
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;

/// One node's mailbox context: clock, accumulators, retry state, and paths.
///
/// A session lives for the duration of a control run. Independent runs in
/// one process either build a fresh session or call [`reset`](Self::reset);
/// nothing resets implicitly. Sessions are single-context state - callers
/// that share one across threads wrap it in their own synchronization.
#[derive(Debug)]
pub struct Session {
    simtime: f64,
    retry: RetryPolicy,
    leaf_policy: LeafPolicy,
    retry_count: u64,
    convergence: ConvergenceTracker,
    inpath: PathBuf,
    outpath: PathBuf,
}

impl Session {
    /// Create a session reading under `inpath` and writing under `outpath`.
    ///
    /// The clock starts at zero, the accumulators empty, and the retry
    /// policy at its unbounded default.
    pub fn new(inpath: impl Into<PathBuf>, outpath: impl Into<PathBuf>) -> Self {
        let session = Self {
            simtime: 0.0,
            retry: RetryPolicy::default(),
            leaf_policy: LeafPolicy::default(),
            retry_count: 0,
            convergence: ConvergenceTracker::new(),
            inpath: inpath.into(),
            outpath: outpath.into(),
        };
        debug!(
            inpath = %session.inpath.display(),
            outpath = %session.outpath.display(),
            "Created mailbox session"
        );
        session
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Set how boolean/null payload leaves decode.
    #[must_use]
    pub fn with_leaf_policy(mut self, policy: LeafPolicy) -> Self {
        self.leaf_policy = policy;
        self
    }

    /// Current simulated time.
    #[must_use]
    pub const fn simtime(&self) -> f64 {
        self.simtime
    }

    /// Cumulative retry count across all reads of this session.
    #[must_use]
    pub const fn retry_count(&self) -> u64 {
        self.retry_count
    }

    /// Current polling interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.retry.interval
    }

    /// Raw text accumulated by reads since the last convergence.
    pub fn accumulated(&self) -> &str {
        self.convergence.accumulated()
    }

    /// Base directory for channel reads.
    pub fn inpath(&self) -> &Path {
        &self.inpath
    }

    /// Base directory for channel writes.
    pub fn outpath(&self) -> &Path {
        &self.outpath
    }

    /// Change the polling interval, keeping the retry ceiling.
    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.retry.interval = interval;
    }

    /// Change the base directory for reads.
    pub fn set_inpath(&mut self, inpath: impl Into<PathBuf>) {
        self.inpath = inpath.into();
    }

    /// Change the base directory for writes.
    pub fn set_outpath(&mut self, outpath: impl Into<PathBuf>) {
        self.outpath = outpath.into();
    }

    /// Restore the initial clock, counters, and accumulators.
    ///
    /// Paths and policies are kept. Independent control runs sharing one
    /// session must call this between runs; nothing resets implicitly.
    pub fn reset(&mut self) {
        self.simtime = 0.0;
        self.retry_count = 0;
        self.convergence.clear();
        debug!("Session reset");
    }

    /// Seed the session from a literal payload.
    ///
    /// Decodes `raw`; the first element *assigns* the simulated clock (no
    /// merge), and the remaining elements are returned as the initial value
    /// vector.
    pub fn initialize_from_literal(&mut self, raw: &str) -> Result<Vec<f64>> {
        let decoded = decode_with_policy(raw, self.leaf_policy)?;
        let (timestamp, values) = match decoded.split_first() {
            Some((&timestamp, values)) => (timestamp, values),
            None => return Err(Error::EmptyMessage),
        };
        self.simtime = timestamp;
        debug!(
            simtime = self.simtime,
            values = values.len(),
            "Session initialized from literal"
        );
        Ok(values.to_vec())
    }

    /// Blocking read of one channel message.
    ///
    /// Sleeps one poll interval, reads the channel file (any access failure
    /// substitutes `fallback`), and keeps polling while the content is
    /// empty, counting every retry. The raw content is appended to the
    /// convergence accumulator, then decoded: the first element merges into
    /// the clock via `max`, and the remaining elements are returned.
    ///
    /// # Errors
    ///
    /// [`Error::Payload`] when existing content is malformed,
    /// [`Error::EmptyMessage`] when a message decodes to nothing, and
    /// [`Error::Timeout`] when a bounded retry policy is exhausted. Access
    /// failures are never errors here.
    pub fn read(&mut self, address: &ChannelAddress, fallback: &str) -> Result<Vec<f64>> {
        let path = address.path_under(&self.inpath);
        trace!(channel = %address, path = %path.display(), "Channel read");

        thread::sleep(self.retry.interval);
        let mut content = read_or_fallback(&path, fallback);

        let mut attempts: u32 = 0;
        while content.is_empty() {
            if self.retry.exhausted(attempts) {
                return Err(Error::Timeout {
                    channel: address.clone(),
                    attempts,
                });
            }
            trace!(channel = %address, attempts, "Channel empty, polling again");
            thread::sleep(self.retry.interval);
            content = read_or_fallback(&path, fallback);
            attempts += 1;
            self.retry_count += 1;
        }

        // raw text feeds the barrier even when decoding fails below
        self.convergence.record(&content);

        let decoded = decode_with_policy(&content, self.leaf_policy)?;
        let (timestamp, values) = match decoded.split_first() {
            Some((&timestamp, values)) => (timestamp, values),
            None => return Err(Error::EmptyMessage),
        };
        if timestamp > self.simtime {
            debug!(
                channel = %address,
                from = self.simtime,
                to = timestamp,
                "Clock advanced by read"
            );
            self.simtime = timestamp;
        }
        Ok(values.to_vec())
    }

    /// Write a message without advancing the clock.
    ///
    /// Equivalent to [`write_advancing`](Self::write_advancing) with a zero
    /// delta.
    pub fn write(&mut self, address: &ChannelAddress, values: &[f64]) -> Result<()> {
        self.write_advancing(address, values, 0)
    }

    /// Write a message, then advance the clock by `delta`.
    ///
    /// The channel directory is created if absent. The message header is
    /// `simtime + delta` - a preview of the post-advance time - so the
    /// written timestamp and the clock observed after this call agree. The
    /// file is replaced atomically: content goes to a staging file in the
    /// channel directory, which is then renamed over the target, so a
    /// concurrent reader sees either the old message or the new one, never
    /// a partial write.
    ///
    /// # Errors
    ///
    /// Any filesystem failure is fatal and surfaces as
    /// [`Error::ChannelAccess`]; the clock does not advance on failure.
    pub fn write_advancing(
        &mut self,
        address: &ChannelAddress,
        values: &[f64],
        delta: u32,
    ) -> Result<()> {
        let dir = address.dir_under(&self.outpath);
        fs::create_dir_all(&dir).map_err(|source| Error::access(address, source))?;

        let header = self.simtime + f64::from(delta);
        let mut message = Vec::with_capacity(values.len() + 1);
        message.push(header);
        message.extend_from_slice(values);
        let payload = encode(&message);

        let staged = dir.join(format!(".{}.tmp", address.name));
        let target = dir.join(&address.name);
        fs::write(&staged, payload.as_bytes()).map_err(|source| Error::access(address, source))?;
        fs::rename(&staged, &target).map_err(|source| Error::access(address, source))?;

        self.simtime += f64::from(delta);
        debug!(
            channel = %address,
            simtime = self.simtime,
            values = values.len(),
            "Channel write"
        );
        Ok(())
    }

    /// Two-phase convergence check over the read accumulators.
    ///
    /// Returns `true` when no read activity happened since the previous
    /// check; see [`ConvergenceTracker::check`] for the exact snapshot
    /// discipline. Never blocks.
    pub fn has_converged(&mut self) -> bool {
        self.convergence.check()
    }
}

/// Read the whole channel file, absorbing any access failure into the
/// fallback literal.
fn read_or_fallback(path: &Path, fallback: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            trace!(path = %path.display(), error = %err, "Channel unreadable, using fallback");
            fallback.to_string()
        }
    }
}
