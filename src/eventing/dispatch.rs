//! # Dispatch Results
//!
//! Per-client merging of matched registrations into update requests, and
//! the report returned by every dispatch.
//!
//! A client observing several co-dispatched events gets exactly one
//! request whose lists are the ordered union of its registrations.

use indexmap::IndexMap;
use serde::Serialize;

use super::errors::EventingError;
use super::registration::ObserverRegistration;
use super::targets::{ClientId, TargetList};

/// One merged partial update for one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRequest {
    /// Client issuing the update
    pub client_id: ClientId,
    /// Identifiers to execute
    pub execute: TargetList,
    /// Identifiers to render
    pub render: TargetList,
}

impl UpdateRequest {
    pub fn new(client_id: impl Into<ClientId>, execute: TargetList, render: TargetList) -> Self {
        Self {
            client_id: client_id.into(),
            execute,
            render,
        }
    }

    /// Whitespace-joined execute list
    pub fn execute_list(&self) -> String {
        self.execute.to_wire()
    }

    /// Whitespace-joined render list
    pub fn render_list(&self) -> String {
        self.render.to_wire()
    }

    fn absorb(&mut self, registration: &ObserverRegistration) {
        self.execute.merge(registration.execute());
        self.render.merge(registration.render());
    }
}

/// Accumulates update requests for one dispatch round, keyed by client in
/// first-seen order
#[derive(Debug, Default)]
pub(crate) struct UpdateBatch {
    requests: IndexMap<ClientId, UpdateRequest>,
}

impl UpdateBatch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, client_id: &str, registration: &ObserverRegistration) {
        match self.requests.get_mut(client_id) {
            Some(request) => request.absorb(registration),
            None => {
                self.requests.insert(
                    client_id.to_string(),
                    UpdateRequest::new(
                        client_id,
                        registration.execute().clone(),
                        registration.render().clone(),
                    ),
                );
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.requests.len()
    }

    pub(crate) fn into_requests(self) -> Vec<UpdateRequest> {
        self.requests.into_values().collect()
    }
}

/// Outcome of one dispatch
///
/// Informational only. Dispatch never fails; `skipped` carries the reason
/// when the whole call was a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Number of distinct events that had a channel in the group
    pub matched_events: usize,
    /// Number of update requests issued (one per client)
    pub updates: usize,
    /// Registrations skipped because their client left the UI tree
    pub stale_clients: usize,
    /// Why the dispatch did nothing, if it did nothing
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_skip")]
    pub skipped: Option<EventingError>,
}

impl DispatchReport {
    pub(crate) fn skipped(reason: EventingError) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::default()
        }
    }

    /// True when no update was issued
    pub fn is_noop(&self) -> bool {
        self.updates == 0
    }
}

fn serialize_skip<S>(reason: &Option<EventingError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match reason {
        Some(err) => serializer.serialize_str(err.code()),
        None => serializer.serialize_none(),
    }
}
