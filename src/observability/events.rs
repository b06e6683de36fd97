//! Diagnostic event codes
//!
//! Every log line emitted by the registry carries one of these as its
//! `code` field, so logs can be filtered without matching on messages.

use std::fmt;

/// Observable events in the eventing registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Registration
    /// Observer stored or replaced in a channel
    ObserverRegistered,
    /// Registration skipped: client not in the UI tree
    ClientMissing,
    /// Group created on first registration
    GroupCreated,
    /// Channel created on first registration
    ChannelCreated,

    // Dispatch
    /// Dispatch targeted a group with no observers
    UnknownGroup,
    /// Dispatched event name has no channel
    UnknownEvent,
    /// Registered client vanished from the UI tree
    StaleClient,
    /// Partial update handed to the transport
    UpdateRequested,
    /// Render target of an update is not in the UI tree
    RenderTargetMissing,
    /// Socket payload was not a string
    MessageRejected,

    // Configuration
    /// Configuration loaded
    ConfigLoaded,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ObserverRegistered => "OBSERVER_REGISTERED",
            Event::ClientMissing => "CLIENT_MISSING",
            Event::GroupCreated => "GROUP_CREATED",
            Event::ChannelCreated => "CHANNEL_CREATED",

            Event::UnknownGroup => "UNKNOWN_GROUP",
            Event::UnknownEvent => "UNKNOWN_EVENT",
            Event::StaleClient => "STALE_CLIENT",
            Event::UpdateRequested => "UPDATE_REQUESTED",
            Event::RenderTargetMissing => "RENDER_TARGET_MISSING",
            Event::MessageRejected => "MESSAGE_REJECTED",

            Event::ConfigLoaded => "CONFIG_LOADED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
