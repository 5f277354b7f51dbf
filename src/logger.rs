//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The default level applies to this crate only; `RUST_LOG` overrides
/// everything when set.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level)));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::debug!("logger initialized for {}", bin_name);
}
