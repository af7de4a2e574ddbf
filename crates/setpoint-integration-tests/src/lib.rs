//! Cross-crate scenarios for the Setpoint workspace.
//!
//! The crates under test compose: graph documents configure control nodes,
//! control nodes exchange signals through mailbox channels, and channels
//! speak the annotated payload dialect. The scenarios under `tests/`
//! exercise those seams end to end over real files.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install an env-filtered fmt subscriber for a test run.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "setpoint_mailbox=debug,setpoint_control=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
