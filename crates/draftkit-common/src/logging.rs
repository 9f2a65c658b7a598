//! Logging initialisation for draftkit
//!
//! - One `tracing-subscriber` fmt subscriber per process, written to stderr
//! - Minimum level from configuration, overridden by `RUST_LOG` when set
//! - Error cause-chain formatting

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Log levels accepted in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Parse log level from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "TRACE" => Some(LogLevel::Trace),
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARN" => Some(LogLevel::Warn),
            "ERROR" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration options
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Whether to print to stderr
    pub print: bool,
    /// Minimum log level, `Info` when unset
    pub level: Option<LogLevel>,
}

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter { directive: String, message: String },
}

/// Install the global subscriber.
///
/// Returns `Ok(())` when a subscriber is already installed, so callers
/// (tests in particular) can call this more than once.
pub fn init(options: LogOptions) -> Result<(), LoggingError> {
    if !options.print {
        return Ok(());
    }

    let directive = options.level.unwrap_or_default().as_directive();
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter {
            directive: directive.to_string(),
            message: e.to_string(),
        })?,
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();

    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }

    Ok(())
}

/// Format an error with cause chain
pub fn format_error(error: &dyn std::error::Error) -> String {
    format_error_recursive(error, 0)
}

fn format_error_recursive(error: &dyn std::error::Error, depth: usize) -> String {
    const MAX_DEPTH: usize = 10;

    if depth >= MAX_DEPTH {
        return error.to_string();
    }

    let base = error.to_string();

    if let Some(source) = error.source() {
        format!("{} Caused by: {}", base, format_error_recursive(source, depth + 1))
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer failure")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_str("Trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_str("WARN"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_str("invalid"), None);
    }

    #[test]
    fn test_log_level_round_trips_through_as_str() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            assert_eq!(LogLevel::from_str(level.as_str()), Some(level));
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        let options = LogOptions {
            print: true,
            level: Some(LogLevel::Debug),
        };
        assert!(init(options).is_ok());
        assert!(init(options).is_ok());
    }

    #[test]
    fn test_init_without_print_is_noop() {
        assert!(init(LogOptions::default()).is_ok());
    }

    #[test]
    fn test_error_formatting_includes_cause() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let formatted = format_error(&Outer(inner));
        assert_eq!(formatted, "outer failure Caused by: file not found");
    }

    #[test]
    fn test_error_formatting_without_cause() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "plain");
        assert_eq!(format_error(&err), "plain");
    }
}
