//! Configuration and filesystem paths for the portal client.
//!
//! This crate provides:
//! - Client configuration (API base URL, versioned prefix, log level)
//! - Filesystem paths for the config file and the persisted session store
//! - Logging initialization

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, DEFAULT_API_BASE_URL, DEFAULT_API_PREFIX, DEFAULT_LOG_LEVEL};
pub use error::{ConfigError, ConfigResult};
pub use logging::init_logging;
pub use paths::Paths;
