//! # Eventing Configuration
//!
//! JSON configuration with per-field defaults. Every field is optional;
//! `{}` is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{EventingError, EventingResult};
use super::targets::{NONE, THIS};

/// What to do with dispatched event names that have no channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownEventPolicy {
    /// Skip silently
    #[default]
    Ignore,
    /// Skip and emit a diagnostic
    Log,
}

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventingConfig {
    /// Group used when an observer names none (default: "global")
    #[serde(default = "default_group")]
    pub default_group: String,

    /// Execute list when an observed event names none (default: "@this")
    #[serde(default = "default_execute")]
    pub default_execute: String,

    /// Render list when an observed event names none (default: "@none")
    #[serde(default = "default_render")]
    pub default_render: String,

    /// Handling of unknown event names during dispatch (default: ignore)
    #[serde(default)]
    pub unknown_events: UnknownEventPolicy,

    /// Log missing and stale clients at warn level instead of debug
    #[serde(default = "default_log_missing_clients")]
    pub log_missing_clients: bool,
}

fn default_group() -> String {
    "global".to_string()
}
fn default_execute() -> String {
    THIS.to_string()
}
fn default_render() -> String {
    NONE.to_string()
}
fn default_log_missing_clients() -> bool {
    true
}

impl Default for EventingConfig {
    fn default() -> Self {
        Self {
            default_group: default_group(),
            default_execute: default_execute(),
            default_render: default_render(),
            unknown_events: UnknownEventPolicy::default(),
            log_missing_clients: default_log_missing_clients(),
        }
    }
}

impl EventingConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> EventingResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EventingError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> EventingResult<Self> {
        let config: EventingConfig = serde_json::from_str(content)
            .map_err(|e| EventingError::Config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> EventingResult<()> {
        if self.default_group.is_empty() || self.default_group.contains(char::is_whitespace) {
            return Err(EventingError::Config(format!(
                "Invalid default_group: '{}'. Must be a single non-empty name.",
                self.default_group
            )));
        }

        if self.default_execute.trim().is_empty() {
            return Err(EventingError::Config(
                "default_execute must name at least one target".to_string(),
            ));
        }

        if self.default_render.trim().is_empty() {
            return Err(EventingError::Config(
                "default_render must name at least one target".to_string(),
            ));
        }

        Ok(())
    }
}
