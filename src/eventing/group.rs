//! # Event Groups
//!
//! A named namespace of event channels, e.g. one push channel. Resolves a
//! whitespace separated list of event names to the channels to fire.

use indexmap::IndexMap;
use tracing::{trace, warn};

use super::channel::EventChannel;
use super::collaborators::ClientLookup;
use super::config::UnknownEventPolicy;
use super::errors::{EventingError, EventingResult};
use super::registration::ObserverRegistration;
use crate::observability::Event;

/// Channels of one group, keyed by event name
#[derive(Debug, Clone, Default)]
pub struct EventGroup {
    name: String,
    channels: IndexMap<String, EventChannel>,
    unknown_events: UnknownEventPolicy,
}

impl EventGroup {
    /// Create an empty group
    pub fn new(name: impl Into<String>, unknown_events: UnknownEventPolicy) -> Self {
        Self {
            name: name.into(),
            channels: IndexMap::new(),
            unknown_events,
        }
    }

    /// Register a client on `event`, creating the channel on first use
    pub fn register(
        &mut self,
        lookup: &impl ClientLookup,
        event: &str,
        client_id: &str,
        registration: ObserverRegistration,
    ) -> EventingResult<()> {
        let group = &self.name;
        let channel = self.channels.entry(event.to_string()).or_insert_with(|| {
            trace!(code = %Event::ChannelCreated, group = %group, event, "channel created");
            EventChannel::new(event)
        });

        channel.register(lookup, client_id, registration)
    }

    /// Channels matched by `events`, in token order, without duplicates
    ///
    /// Tokens with no channel are skipped; the configured policy decides
    /// whether that is logged.
    pub fn dispatch(&self, events: &str) -> Vec<&EventChannel> {
        let mut matched: Vec<&EventChannel> = Vec::new();

        for token in events.split_whitespace() {
            match self.channels.get(token) {
                Some(channel) => {
                    if !matched.iter().any(|c| c.name() == token) {
                        matched.push(channel);
                    }
                }
                None => {
                    if self.unknown_events == UnknownEventPolicy::Log {
                        let err = EventingError::UnknownEvent {
                            group: self.name.clone(),
                            event: token.to_string(),
                        };
                        warn!(code = %Event::UnknownEvent, error = %err, "no observer for event");
                    }
                }
            }
        }

        matched
    }

    /// Channel for `event`, if one was created
    pub fn channel(&self, event: &str) -> Option<&EventChannel> {
        self.channels.get(event)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eventing::collaborators::MemoryUiTree;

    fn group_with(events: &[&str]) -> EventGroup {
        let ui: MemoryUiTree = ["obs"].into_iter().collect();
        let mut group = EventGroup::new("chat", UnknownEventPolicy::Ignore);
        for event in events {
            group
                .register(&ui, event, "obs", ObserverRegistration::new("@this", "@none"))
                .unwrap();
        }
        group
    }

    fn names<'a>(channels: &[&'a EventChannel]) -> Vec<&'a str> {
        channels.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_dispatch_token_order() {
        let group = group_with(&["a", "b", "c"]);
        assert_eq!(names(&group.dispatch("c a")), vec!["c", "a"]);
    }

    #[test]
    fn test_dispatch_skips_unknown_and_duplicates() {
        let group = group_with(&["a", "b"]);
        assert_eq!(names(&group.dispatch("a  x\tb a")), vec!["a", "b"]);
    }

    #[test]
    fn test_dispatch_empty_string() {
        let group = group_with(&["a"]);
        assert!(group.dispatch("").is_empty());
        assert!(group.dispatch("   ").is_empty());
    }

    #[test]
    fn test_channel_created_even_for_missing_client() {
        let ui = MemoryUiTree::new();
        let mut group = EventGroup::new("chat", UnknownEventPolicy::Log);
        assert!(group
            .register(&ui, "a", "ghost", ObserverRegistration::new("x", "y"))
            .is_err());

        assert_eq!(group.len(), 1);
        assert!(group.channel("a").unwrap().is_empty());
        assert_eq!(names(&group.dispatch("a")), vec!["a"]);
    }
}
