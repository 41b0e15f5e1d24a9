use super::config::LogConfig;
use anyhow::{anyhow, Result};
use std::io;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::models::{LogFormat, LogLevel};

/// Logger implementation using tracing
#[derive(Debug)]
pub struct LoggerImpl;

impl LoggerImpl {
    /// Initialize the global subscriber with the given configuration
    ///
    /// Events go to stderr so command output on stdout stays clean. The
    /// filter comes from the resolved configuration only; `RUST_LOG` is not
    /// consulted.
    ///
    /// # Errors
    /// Returns an error if a global subscriber is already installed
    pub fn init(config: &LogConfig) -> Result<Self> {
        let level = LevelFilter::from_level(to_tracing_level(config.level));
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .parse_lossy("");

        let layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(config.with_location)
                .with_line_number(config.with_location)
                .with_filter(filter)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(config.with_location)
                .with_line_number(config.with_location)
                .with_filter(filter)
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(layer)
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize logger: {e}"))?;

        tracing::debug!(
            level = config.level.as_str(),
            format = config.format.as_str(),
            "logger initialized"
        );

        Ok(Self)
    }
}

/// Map a configured log level onto tracing's
pub const fn to_tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

// Re-exported for the binary
pub use tracing::error;
