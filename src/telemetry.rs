//! Structured logging setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log directive when neither RUST_LOG nor --log-level is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialize logging.
///
/// RUST_LOG wins when set; otherwise `level` is used as the filter
/// directive. Safe to call once per process.
pub fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let fallback = level.unwrap_or(DEFAULT_LOG_LEVEL);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;

    Ok(())
}
