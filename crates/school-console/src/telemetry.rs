//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (wins over the config file)
/// - `RUST_LOG=school_core=trace` - Trace for the kernel only
/// - Otherwise `logging.filter` from [`LoggingConfig`]
///
/// Returns `false` if a global subscriber was already installed, which is
/// expected when the host app or a test harness set one up first.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
