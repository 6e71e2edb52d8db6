//! Log output
//!
//! Logs go to stderr, filtered through `RUST_LOG` (default `info`). Once a
//! daemon detaches, stderr points at `/dev/null` and the logs are dropped.

use std::io;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// Calling this more than once keeps the first subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
