//! Logging initialization.
//!
//! Logs go to stderr: stdout carries the STDIO transport.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Parse a log level name, defaulting to `INFO`.
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize the logging subsystem once.
///
/// Returns `false` when logging was already configured.
pub fn init_logging(level: &str) -> bool {
    if LOGGING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return false;
    }

    let filter = EnvFilter::from_default_env().add_directive(parse_level(level).into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging("info");
        assert!(!init_logging("debug"));
    }
}
