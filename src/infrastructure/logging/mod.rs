//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON formatting on stderr
//! - Level and format taken from the resolved configuration

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::{error, to_tracing_level, LoggerImpl};
