//! Change stack configuration
//!
//! Loaded from an optional TOML file layered under `DRAFTKIT_*` environment
//! variables, e.g. `DRAFTKIT_EVENT_CAPACITY=64`.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use draftkit_common::logging::{self, LogLevel, LogOptions};
use serde::{Deserialize, Serialize};

use crate::error::UndoRedoError;
use crate::events::{DEFAULT_EVENT_CAPACITY, MAX_EVENT_CAPACITY};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DRAFTKIT";

/// Configuration for a [`ChangeStack`](crate::ChangeStack)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeStackConfig {
    /// Publish an event after every successful transition
    pub emit_events: bool,
    /// Buffered events per subscriber before the oldest are dropped
    pub event_capacity: usize,
    /// Minimum level for [`init_logging`](Self::init_logging)
    pub log_level: LogLevel,
}

impl Default for ChangeStackConfig {
    fn default() -> Self {
        ChangeStackConfig {
            emit_events: true,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            log_level: LogLevel::Info,
        }
    }
}

impl ChangeStackConfig {
    /// Load from `path` (missing file is fine) and the environment, then validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, UndoRedoError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: ChangeStackConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document, without environment overrides
    pub fn from_toml_str(contents: &str) -> Result<Self, UndoRedoError> {
        let config: ChangeStackConfig = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Write as TOML, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), UndoRedoError> {
        let path = path.as_ref();
        let contents = toml::to_string(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), UndoRedoError> {
        if self.emit_events && self.event_capacity == 0 {
            return Err(UndoRedoError::validation_error(
                "event_capacity must be greater than 0 when emit_events is set",
            ));
        }
        if self.emit_events && self.event_capacity > MAX_EVENT_CAPACITY {
            return Err(UndoRedoError::validation_error(format!(
                "event_capacity must be at most {}, got {}",
                MAX_EVENT_CAPACITY, self.event_capacity
            )));
        }
        Ok(())
    }

    /// Install the stderr subscriber at `log_level`
    pub fn init_logging(&self) -> Result<(), UndoRedoError> {
        logging::init(LogOptions {
            print: true,
            level: Some(self.log_level),
        })?;
        Ok(())
    }
}
