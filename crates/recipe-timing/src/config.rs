//! Engine configuration loading.
//!
//! The engine ships with one `engine.toml` per installation. Raw sections
//! are deserialized as written and then promoted into [`EngineConfig`],
//! which is where range checks and enum parsing live; a file that
//! deserializes but fails promotion is rejected with a message naming the
//! offending key.

#![allow(missing_docs)]

use std::path::Path;

use serde::Deserialize;
use smol_str::SmolStr;

use recipe_model::Duration;

use crate::error::EngineError;

/// Validated engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Resource name used for thread and log labelling.
    pub name: SmolStr,
    pub poll_interval: Duration,
    pub log_level: LogLevel,
    pub event_channel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: SmolStr::new_static("recipe"),
            poll_interval: Duration::from_millis(250),
            log_level: LogLevel::Info,
            event_channel: false,
        }
    }
}

impl EngineConfig {
    /// Loads and validates `engine.toml` at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|err| EngineError::InvalidConfig(format!("engine.toml: {err}").into()))?;
        Self::parse(&text)
    }

    /// Parses and validates configuration text.
    pub fn parse(text: &str) -> Result<Self, EngineError> {
        let raw: EngineToml = toml::from_str(text)
            .map_err(|err| EngineError::InvalidConfig(format!("engine.toml: {err}").into()))?;
        raw.into_config()
    }
}

/// Log verbosity as configured, mapped onto `tracing` levels by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn parse(text: &str) -> Result<Self, EngineError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(EngineError::InvalidConfig(
                format!("invalid engine.log.level '{text}'").into(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EngineToml {
    engine: EngineSection,
}

#[derive(Debug, Deserialize)]
struct EngineSection {
    name: Option<String>,
    poll: PollSection,
    log: Option<LogSection>,
}

#[derive(Debug, Deserialize)]
struct PollSection {
    interval_ms: u64,
    event_channel: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct LogSection {
    level: String,
}

impl EngineToml {
    fn into_config(self) -> Result<EngineConfig, EngineError> {
        if self.engine.poll.interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "engine.poll.interval_ms must be at least 1".into(),
            ));
        }
        let interval_ms = i64::try_from(self.engine.poll.interval_ms).map_err(|_| {
            EngineError::InvalidConfig("engine.poll.interval_ms out of range".into())
        })?;

        let log_level = match self.engine.log {
            Some(section) => LogLevel::parse(&section.level)?,
            None => LogLevel::default(),
        };
        let name = self
            .engine
            .name
            .map_or_else(|| SmolStr::new_static("recipe"), SmolStr::from);

        Ok(EngineConfig {
            name,
            poll_interval: Duration::from_millis(interval_ms),
            log_level,
            event_channel: self.engine.poll.event_channel.unwrap_or(false),
        })
    }
}
