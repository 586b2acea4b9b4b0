//! Logging initialization for the portal client.

use tracing_subscriber::EnvFilter;

/// Initialize the logging system.
///
/// Sets up tracing with a compact stderr writer. The filter comes from the
/// `RUST_LOG` env var when set, otherwise from the provided default level.
///
/// # Example
///
/// ```ignore
/// init_logging("info");
/// tracing::info!("client started");
/// ```
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // try_init: a second call (e.g. from tests) is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
