//! Configuration, filesystem paths, and logging setup for the developer relay client.
//!
//! The relay client itself never reads the environment. A composition root
//! (the `relay` CLI, or any embedding application) loads a [`Config`] once
//! and hands the resolved values to the client constructor.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, API_URL_ENV, DEFAULT_API_URL, DEFAULT_LOG_LEVEL, LOG_LEVEL_ENV};
pub use error::{ConfigError, ConfigResult};
pub use logging::{init_logging, parse_level};
pub use paths::Paths;
