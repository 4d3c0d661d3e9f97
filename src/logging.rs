//! Logging configuration for askdb.
//!
//! Logs go to stderr so they never interleave with rendered results on
//! stdout. The level is controlled by `RUST_LOG` and defaults to `info`.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging with an environment-controlled filter.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
