//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages, including pipeline transitions
/// - `RUST_LOG=cafemat_engine=trace` - Engine only
/// - Default: `[log] level` from config
///
/// Logs go to stderr; stdout carries command output only.
pub fn init_tracing(settings: &LogSettings) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(settings.ansi)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialise logging: {}", err))
}
