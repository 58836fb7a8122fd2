use crate::error::{BoardError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVEL_ENV: &str = "TASKBOARD_LOG_LEVEL";

/// Installs a stderr subscriber filtered by `TASKBOARD_LOG_LEVEL`
///
/// Fails if a global subscriber is already set.
pub fn init_logging() -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_log_filter())
        .with(stderr_layer)
        .try_init()
        .map_err(|e| BoardError::Other(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!("Logging initialized");
    Ok(())
}

fn build_log_filter() -> EnvFilter {
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|raw| normalize_log_level(&raw))
        .unwrap_or("warn");
    EnvFilter::new(format!("{level},taskboard_core={level}"))
}

fn normalize_log_level(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}
