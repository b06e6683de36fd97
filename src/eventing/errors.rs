//! # Eventing Errors
//!
//! Error types for the eventing module.
//!
//! None of these are fatal. The public register/dispatch API contains them
//! and reports them through logging and [`DispatchReport`](super::DispatchReport).

use thiserror::Error;

/// Result type for eventing operations
pub type EventingResult<T> = Result<T, EventingError>;

/// Eventing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventingError {
    /// The client is not present in the UI tree
    #[error("Client not found: {0}")]
    MissingClient(String),

    /// Dispatch targeted a group nobody registered in
    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    /// Dispatch named an event with no channel in its group
    #[error("Unknown event '{event}' in group '{group}'")]
    UnknownEvent { group: String, event: String },

    /// A socket message was not a string
    #[error("Message must be a string, got {0}")]
    MalformedMessage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EventingError {
    /// Returns the stable diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            EventingError::MissingClient(_) => "EVENTING_MISSING_CLIENT",
            EventingError::UnknownGroup(_) => "EVENTING_UNKNOWN_GROUP",
            EventingError::UnknownEvent { .. } => "EVENTING_UNKNOWN_EVENT",
            EventingError::MalformedMessage(_) => "EVENTING_MALFORMED_MESSAGE",
            EventingError::Config(_) => "EVENTING_CONFIG_ERROR",
        }
    }
}
