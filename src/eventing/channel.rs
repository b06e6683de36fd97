//! # Event Channels
//!
//! The registrations of every client observing one (group, event) pair.

use indexmap::IndexMap;
use tracing::debug;

use super::collaborators::ClientLookup;
use super::errors::{EventingError, EventingResult};
use super::registration::ObserverRegistration;
use super::targets::ClientId;
use crate::observability::Event;

/// Registrations for one event, in first-registration order
#[derive(Debug, Clone, Default)]
pub struct EventChannel {
    /// Event name
    name: String,

    /// Registration by client. Replacing an entry keeps its position.
    registrations: IndexMap<ClientId, ObserverRegistration>,
}

impl EventChannel {
    /// Create an empty channel
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registrations: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store or replace the registration of `client_id`
    ///
    /// Fails without storing anything if the client is not in the UI tree.
    pub fn register(
        &mut self,
        lookup: &impl ClientLookup,
        client_id: &str,
        registration: ObserverRegistration,
    ) -> EventingResult<()> {
        if !lookup.contains(client_id) {
            return Err(EventingError::MissingClient(client_id.to_string()));
        }

        let replaced = self
            .registrations
            .insert(client_id.to_string(), registration)
            .is_some();

        debug!(
            code = %Event::ObserverRegistered,
            event = %self.name,
            client_id,
            replaced,
            "observer registered"
        );

        Ok(())
    }

    /// Registrations whose client is still present, in stored order
    ///
    /// Presence is checked now, not at registration. Vanished clients are
    /// skipped but kept; `stale` receives each skipped id.
    pub fn dispatch<'a>(
        &'a self,
        lookup: &impl ClientLookup,
        mut stale: impl FnMut(&'a str),
    ) -> Vec<(&'a str, &'a ObserverRegistration)> {
        let mut live = Vec::with_capacity(self.registrations.len());

        for (client_id, registration) in &self.registrations {
            if lookup.contains(client_id) {
                live.push((client_id.as_str(), registration));
            } else {
                stale(client_id.as_str());
            }
        }

        live
    }

    /// Registration currently stored for `client_id`
    pub fn get(&self, client_id: &str) -> Option<&ObserverRegistration> {
        self.registrations.get(client_id)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
