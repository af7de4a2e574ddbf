//! Channel addressing.

use std::path::{Path, PathBuf};

/// A mailbox channel address: the pair `(port, name)`.
///
/// An address maps deterministically to a filesystem path
/// `base / port / name`, with the port rendered in decimal. Reads resolve
/// under a session's `inpath`, writes under its `outpath`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelAddress {
    /// Port number.
    pub port: u32,
    /// Channel file name.
    pub name: String,
}

impl ChannelAddress {
    /// Create a new channel address.
    pub fn new(port: u32, name: impl Into<String>) -> Self {
        Self {
            port,
            name: name.into(),
        }
    }

    /// Directory holding this channel under `base`.
    pub fn dir_under(&self, base: &Path) -> PathBuf {
        base.join(self.port.to_string())
    }

    /// Full file path of this channel under `base`.
    pub fn path_under(&self, base: &Path) -> PathBuf {
        self.dir_under(base).join(&self.name)
    }
}

impl std::fmt::Display for ChannelAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.port, self.name)
    }
}
