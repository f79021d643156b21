//! Shared logging utilities for consistent tracing across processes

use chrono::{DateTime, Utc};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber with an optional base log level
///
/// `RUST_LOG` takes precedence when set, so operators can still raise or
/// lower individual targets at runtime.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    let base_level = log_level.unwrap_or("info");
    let filter = format!(
        "webserver={base_level},orchestrator={base_level},shared={base_level},tower=warn,hyper=warn"
    );

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Initialize tracing with the default info level
pub fn init_tracing() {
    init_tracing_with_level(None);
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Contextual logging helper for startup messages
pub fn log_startup(details: &str) {
    info!(timestamp = format_timestamp(), "Starting {}", details);
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(reason: &str) {
    info!(timestamp = format_timestamp(), "Shutting down: {}", reason);
}

/// Contextual logging helper for error conditions
pub fn log_error(context: &str, err: &dyn std::fmt::Display) {
    error!(
        timestamp = format_timestamp(),
        error = %err,
        "{} failed: {}",
        context,
        err
    );
}
