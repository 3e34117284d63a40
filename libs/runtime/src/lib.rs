//! Process bootstrap: layered configuration and logging initialization.

pub mod config;
pub mod logging;

pub use config::{AppConfig, DatabaseConfig, LoggingConfig, ServerConfig};
