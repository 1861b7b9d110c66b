//! Logging utilities for the gridway legacy transaction crates.
//!
//! Re-exports the `tracing` macros used across the workspace and installs the
//! global subscriber from a [`LogConfig`].

use serde::{Deserialize, Serialize};

pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};
pub use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the global subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Structured JSON lines
    #[default]
    Json,
    /// Human readable text
    Plain,
}

/// Logging section of the node configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, overridden by `RUST_LOG` when set
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LogConfig {
    /// Build the filter, preferring the environment over the configured level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Initialize the global tracing subscriber from configuration
pub fn init_tracing(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (json, plain) = match config.format {
        LogFormat::Json => (
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json(),
            ),
            None,
        ),
        LogFormat::Plain => (None, Some(fmt::layer().with_target(true))),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(json)
        .with(plain)
        .try_init()?;

    Ok(())
}

/// Initialize tracing for testing with simplified output
pub fn init_tracing_test() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init()?;

    Ok(())
}
