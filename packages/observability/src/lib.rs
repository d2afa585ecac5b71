//! # Observability
//!
//! Structured logging for developer relay binaries.
//!
//! Binaries call [`init_with_config`] once at startup and use plain `tracing`
//! macros everywhere else. Library crates never install a subscriber; they
//! only emit events.
//!
//! Output is JSONL, one object per event, appended to the configured log
//! file. Multiple processes may append to the same file; every line is
//! written and flushed as a unit.
//!
//! ```rust,ignore
//! fn main() {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "relay-cli".into(),
//!         default_level: "debug".into(),
//!         log_path: Some("/tmp/relay.jsonl".into()),
//!         also_stderr: true,
//!     });
//!     tracing::info!("ready");
//! }
//! ```

mod file;
mod json_layer;

use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use file::{AppendLogWriter, AppendWriterFactory};
pub use json_layer::{JsonLayer, LogEntry};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service, included in every log line for filtering.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Overridden by the `RUST_LOG` environment variable.
    pub default_level: String,

    /// JSONL log file. When `None`, only the stderr layer is installed
    /// (and only if `also_stderr` is set).
    pub log_path: Option<PathBuf>,

    /// Also emit human-readable logs to stderr.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Initialize logging, ignoring failures.
///
/// If the log file cannot be opened the process keeps running with the
/// stderr layer only; a subscriber that is already installed is left alone.
pub fn init_with_config(config: LogConfig) {
    if try_init_with_config(config.clone()).is_err() {
        let _ = try_init_with_config(LogConfig {
            log_path: None,
            ..config
        });
    }
}

/// Initialize logging, reporting a log file that cannot be opened.
pub fn try_init_with_config(config: LogConfig) -> io::Result<()> {
    let json_layer = match &config.log_path {
        Some(path) => {
            let writer = AppendLogWriter::new(path)?;
            Some(JsonLayer::new(
                config.service_name.clone(),
                AppendWriterFactory::new(writer),
            ))
        }
        None => None,
    };

    let stderr_layer = config.also_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .compact()
            .with_writer(io::stderr)
    });

    let registry = tracing_subscriber::registry()
        .with(json_layer.map(|layer| layer.with_filter(env_filter(&config.default_level))))
        .with(stderr_layer.map(|layer| layer.with_filter(env_filter(&config.default_level))));

    if registry.try_init().is_err() {
        // Another subscriber already owns the process.
        return Ok(());
    }

    if let Some(path) = &config.log_path {
        tracing::debug!(
            service = %config.service_name,
            log_path = %path.display(),
            "observability initialized"
        );
    }
    Ok(())
}

/// Build a filter from `RUST_LOG`, falling back to the given level.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, instrument, trace, warn};

/// Re-export Level for advanced filtering.
pub use tracing::Level;
