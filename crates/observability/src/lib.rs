//! Process-wide tracing setup shared by binaries and integration tests.

use tracing_subscriber::EnvFilter;

/// Install the global JSON subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Calling this more
/// than once is fine; only the first call installs a subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init();
}
