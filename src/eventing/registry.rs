//! # Eventing Registry
//!
//! Top-level entry point: groups keyed by name, the public register and
//! dispatch operations, and the socket message adapter.
//!
//! The registry is an explicit object owned by the host. It is built once
//! and lives for the whole session; nothing is ever torn down.
//!
//! ## Dispatch
//!
//! ```text
//! dispatch(group, "a b")
//!   └─► EventGroup::dispatch ─► [channel a, channel b]
//!         └─► EventChannel::dispatch (live clients only)
//!               └─► UpdateBatch (one merged request per client)
//!                     └─► RemoteUpdate::request_update
//! ```
//!
//! No operation here returns an error to its caller. Missing clients,
//! unknown groups and malformed socket payloads are logged and ignored.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, trace, warn};

use super::collaborators::{ClientLookup, RemoteUpdate};
use super::config::EventingConfig;
use super::dispatch::{DispatchReport, UpdateBatch, UpdateRequest};
use super::errors::{EventingError, EventingResult};
use super::group::EventGroup;
use super::registration::{ObservedEvent, ObserverRegistration};
use super::targets::TargetList;
use crate::observability::Event;

/// Group → event → client registrations, plus the two collaborators
#[derive(Debug)]
pub struct EventingRegistry<L, U> {
    config: EventingConfig,
    groups: IndexMap<String, EventGroup>,
    lookup: L,
    updater: U,
}

impl<L, U> EventingRegistry<L, U>
where
    L: ClientLookup,
    U: RemoteUpdate,
{
    /// Create a registry with the default configuration
    pub fn new(lookup: L, updater: U) -> Self {
        Self::with_config(EventingConfig::default(), lookup, updater)
    }

    /// Create a registry with an explicit configuration
    pub fn with_config(config: EventingConfig, lookup: L, updater: U) -> Self {
        Self {
            config,
            groups: IndexMap::new(),
            lookup,
            updater,
        }
    }

    /// Register `client_id` to observe `event` in `group`
    ///
    /// Replaces any earlier registration of the same client for the same
    /// event. A client missing from the UI tree is logged and skipped.
    pub fn register(
        &mut self,
        group: &str,
        event: &str,
        client_id: &str,
        execute: impl Into<TargetList>,
        render: impl Into<TargetList>,
    ) {
        let registration = ObserverRegistration::new(execute, render);
        if let Err(err) = self.try_register(group, event, client_id, registration) {
            self.log_missing(&err, group, event);
        }
    }

    /// Register an observed event, applying configured defaults
    ///
    /// `group` falls back to the configured default group.
    pub fn register_observed(&mut self, group: Option<&str>, client_id: &str, observed: &ObservedEvent) {
        let registration = observed.to_registration(&self.config);
        let group = group
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_group.clone());

        if let Err(err) = self.try_register(&group, &observed.event, client_id, registration) {
            self.log_missing(&err, &group, &observed.event);
        }
    }

    /// Same as [`register`](Self::register) but reports a missing client
    pub fn try_register(
        &mut self,
        group: &str,
        event: &str,
        client_id: &str,
        registration: ObserverRegistration,
    ) -> EventingResult<()> {
        let unknown_events = self.config.unknown_events;
        let event_group = self.groups.entry(group.to_string()).or_insert_with(|| {
            trace!(code = %Event::GroupCreated, group, "group created");
            EventGroup::new(group, unknown_events)
        });

        event_group.register(&self.lookup, event, client_id, registration)
    }

    /// Dispatch a whitespace separated list of events within `group`
    ///
    /// Every live client observing at least one of the events receives
    /// exactly one update, merging the targets of all its matched
    /// registrations in event order.
    pub fn dispatch(&mut self, group: &str, events: &str) -> DispatchReport {
        let Some(event_group) = self.groups.get(group) else {
            debug!(code = %Event::UnknownGroup, group, events, "no observer in group");
            return DispatchReport::skipped(EventingError::UnknownGroup(group.to_string()));
        };

        let log_missing = self.config.log_missing_clients;
        let mut report = DispatchReport::default();
        let mut batch = UpdateBatch::new();

        for channel in event_group.dispatch(events) {
            report.matched_events += 1;

            let live = channel.dispatch(&self.lookup, |client_id| {
                report.stale_clients += 1;
                if log_missing {
                    warn!(code = %Event::StaleClient, group, event = channel.name(), client_id, "client no longer present");
                } else {
                    debug!(code = %Event::StaleClient, group, event = channel.name(), client_id, "client no longer present");
                }
            });

            for (client_id, registration) in live {
                batch.add(client_id, registration);
            }
        }

        report.updates = batch.len();

        for request in batch.into_requests() {
            self.send(group, &request);
        }

        report
    }

    /// Dispatch a message received on a push channel
    ///
    /// Only string payloads are dispatched; anything else is logged and
    /// dropped.
    pub fn dispatch_socket_message(&mut self, message: &Value, channel: &str) -> DispatchReport {
        match message {
            Value::String(events) => self.dispatch(channel, events),
            other => {
                let kind = value_kind(other);
                warn!(code = %Event::MessageRejected, channel, kind, message = %other, "message must be a string");
                DispatchReport::skipped(EventingError::MalformedMessage(kind.to_string()))
            }
        }
    }

    fn send(&mut self, group: &str, request: &UpdateRequest) {
        let execute = request.execute_list();
        let render = request.render_list();

        let missing = request.render.missing(&self.lookup);
        if !missing.is_empty() {
            debug!(
                code = %Event::RenderTargetMissing,
                group,
                client_id = %request.client_id,
                missing = ?missing,
                "render targets not in the UI tree"
            );
        }

        info!(
            code = %Event::UpdateRequested,
            group,
            client_id = %request.client_id,
            execute = %execute,
            render = %render,
            "partial update requested"
        );

        self.updater.request_update(&request.client_id, &execute, &render);
    }

    fn log_missing(&self, err: &EventingError, group: &str, event: &str) {
        if self.config.log_missing_clients {
            warn!(code = %Event::ClientMissing, group, event, error = %err, "observer not registered");
        } else {
            debug!(code = %Event::ClientMissing, group, event, error = %err, "observer not registered");
        }
    }

    /// Group named `name`, if it exists
    pub fn group(&self, name: &str) -> Option<&EventGroup> {
        self.groups.get(name)
    }

    /// Group names in creation order
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Registration stored for (group, event, client)
    pub fn registration(&self, group: &str, event: &str, client_id: &str) -> Option<&ObserverRegistration> {
        self.groups.get(group)?.channel(event)?.get(client_id)
    }

    pub fn config(&self) -> &EventingConfig {
        &self.config
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn lookup_mut(&mut self) -> &mut L {
        &mut self.lookup
    }

    pub fn updater(&self) -> &U {
        &self.updater
    }

    pub fn updater_mut(&mut self) -> &mut U {
        &mut self.updater
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
