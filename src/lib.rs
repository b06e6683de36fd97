//! eventing - fan-out of named events to observing UI clients
//!
//! Application events, dispatched locally or received on a push channel,
//! are resolved to the UI clients that observe them. Each interested
//! client gets one partial update request carrying the merged execute and
//! render targets of every event it matched.
//!
//! ```
//! use eventing::{EventingRegistry, MemoryUiTree, UpdateLog};
//!
//! let ui: MemoryUiTree = ["form:observer"].into_iter().collect();
//! let mut registry = EventingRegistry::new(ui, UpdateLog::new());
//!
//! registry.register("orders", "created", "form:observer", "@this", "form:table");
//! registry.dispatch("orders", "created updated");
//!
//! let sent = registry.updater().requests();
//! assert_eq!(sent.len(), 1);
//! assert_eq!(sent[0].render_list(), "form:table");
//! ```

pub mod cli;
pub mod eventing;
pub mod observability;

pub use eventing::{
    ClientId, ClientLookup, DispatchReport, EventChannel, EventGroup, EventingConfig,
    EventingError, EventingRegistry, EventingResult, MemoryUiTree, ObservedEvent,
    ObserverRegistration, RemoteUpdate, TargetList, UnknownEventPolicy, UpdateLog, UpdateRequest,
};
