//! Logging Infrastructure
//!
//! Structured logging setup. Level comes from `RUST_LOG` when set,
//! otherwise the provided default.

use tracing_subscriber::EnvFilter;

/// Initialize the logger with the default `info` level
pub fn init_logger() {
    init_logger_with_level("info");
}

/// Initialize the logger with an explicit default level
pub fn init_logger_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .init();
}
