//! # Eventing
//!
//! Fan-out of named events to the UI clients that observe them.
//!
//! ## Architecture
//!
//! - **Registry**: groups by name; public register/dispatch API and the
//!   socket message adapter
//! - **Group**: channels by event name; resolves event lists
//! - **Channel**: registrations by client, in first-registration order
//! - **Registration**: execute/render targets for one client
//! - **Dispatch**: per-client merging into one update request
//! - **Collaborators**: UI tree lookup and partial update transport

pub mod channel;
pub mod collaborators;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod group;
pub mod registration;
pub mod registry;
pub mod targets;

pub use channel::EventChannel;
pub use collaborators::{ClientLookup, MemoryUiTree, RemoteUpdate, UpdateLog};
pub use config::{EventingConfig, UnknownEventPolicy};
pub use dispatch::{DispatchReport, UpdateRequest};
pub use errors::{EventingError, EventingResult};
pub use group::EventGroup;
pub use registration::{ObservedEvent, ObserverRegistration};
pub use registry::EventingRegistry;
pub use targets::{ClientId, TargetList};
