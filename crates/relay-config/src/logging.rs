//! Logging initialization for relay client binaries.
//!
//! Thin wrapper over the observability package so every binary writes the
//! same structured JSONL to `~/.developer-relay/logs/relay.jsonl`.

use crate::Paths;

/// Initialize the logging system for a relay client process.
///
/// * `service_name` - Name stamped on every log line (e.g. "relay-cli")
/// * `level` - Default log level, used when `RUST_LOG` is not set
/// * `also_stderr` - Mirror log lines to stderr
pub fn init_logging(service_name: &str, level: &str, also_stderr: bool) {
    let log_path = Paths::new().ok().map(|paths| paths.log_file());

    observability::init_with_config(observability::LogConfig {
        service_name: service_name.into(),
        default_level: parse_level(level).to_string().to_lowercase(),
        log_path,
        also_stderr,
    });
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
