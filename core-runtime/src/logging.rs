//! # Logging Infrastructure
//!
//! Configures the `tracing-subscriber` pipeline for the viewer core:
//! - Pretty, compact, or JSON output formats
//! - Module-level filtering via `RUST_LOG` or a configured default directive
//!
//! ## Usage
//!
//! ```no_run
//! use core_runtime::logging::{init_logging, LoggingConfig, LogFormat};
//!
//! let config = LoggingConfig::default().with_format(LogFormat::Compact);
//! init_logging(config).expect("Failed to initialize logging");
//!
//! tracing::info!("viewer core started");
//! ```

use crate::error::{Error, Result};
use tracing_subscriber::{
    filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Compact;
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Default filter directive, used when `RUST_LOG` is unset
    pub default_directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            default_directive: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured default directive.
/// Calling this twice returns `Error::LoggingInit`; the first subscriber
/// stays installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
    };

    result.map_err(|e| Error::LoggingInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_info_directive() {
        let config = LoggingConfig::default();
        assert_eq!(config.default_directive, "info");
    }

    #[test]
    fn builder_overrides() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Json)
            .with_default_directive("core_sync=debug");

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.default_directive, "core_sync=debug");
    }

    #[test]
    fn double_init_reports_error() {
        // Whichever test initializes first wins; the second call must fail
        // cleanly instead of panicking.
        let first = init_logging(LoggingConfig::default());
        let second = init_logging(LoggingConfig::default());

        assert!(first.is_ok() || matches!(first, Err(Error::LoggingInit(_))));
        assert!(matches!(second, Err(Error::LoggingInit(_))));
    }
}
