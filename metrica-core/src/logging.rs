//! Logging infrastructure for metrica
//!
//! The core library only emits `tracing` events; embedding applications call
//! [`init`] once to install a subscriber, or bring their own.

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Initialize the logging system
///
/// Sets up a stderr `tracing` subscriber with the given default level,
/// overridable via the `RUST_LOG` env var.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();

    tracing::info!(level, "Logging initialized");
}

/// Initialize logging for tests (logs to the test writer)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}
