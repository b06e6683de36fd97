//! # Observer Registrations
//!
//! What a client wants done when an event it observes fires.

use serde::{Deserialize, Serialize};

use super::config::EventingConfig;
use super::targets::TargetList;

/// Execute and render targets for one (event, client) pair
///
/// Immutable once built; re-registering replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverRegistration {
    execute: TargetList,
    render: TargetList,
}

impl ObserverRegistration {
    /// Create a registration
    pub fn new(execute: impl Into<TargetList>, render: impl Into<TargetList>) -> Self {
        Self {
            execute: execute.into(),
            render: render.into(),
        }
    }

    /// Identifiers to execute during the partial update
    pub fn execute(&self) -> &TargetList {
        &self.execute
    }

    /// Identifiers to render after the partial update
    pub fn render(&self) -> &TargetList {
        &self.render
    }
}

/// Declarative form of a registration, as written next to an observer
///
/// Missing or empty target lists fall back to the configured defaults
/// (`@this` to execute, `@none` to render).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedEvent {
    /// Name of the event to observe
    pub event: String,

    /// Identifiers to execute (None = default)
    #[serde(default)]
    pub execute: Option<TargetList>,

    /// Identifiers to render (None = default)
    #[serde(default)]
    pub render: Option<TargetList>,
}

impl ObservedEvent {
    /// Observe `event` with default targets
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            execute: None,
            render: None,
        }
    }

    /// Set the execute targets
    pub fn with_execute(mut self, execute: impl Into<TargetList>) -> Self {
        self.execute = Some(execute.into());
        self
    }

    /// Set the render targets
    pub fn with_render(mut self, render: impl Into<TargetList>) -> Self {
        self.render = Some(render.into());
        self
    }

    /// Resolve defaults into a registration
    pub fn to_registration(&self, config: &EventingConfig) -> ObserverRegistration {
        let execute = self
            .execute
            .clone()
            .unwrap_or_default()
            .or_keyword(&config.default_execute);
        let render = self
            .render
            .clone()
            .unwrap_or_default()
            .or_keyword(&config.default_render);

        ObserverRegistration::new(execute, render)
    }
}
