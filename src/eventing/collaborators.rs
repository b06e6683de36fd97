//! # Collaborators
//!
//! The registry depends on two outside capabilities: asking whether a client
//! exists in the live UI tree, and firing a partial update for a client.
//! Both are traits so hosts can plug in their own; the in-memory versions
//! here back the CLI and the tests.

use indexmap::IndexSet;

use super::dispatch::UpdateRequest;
use super::targets::{ClientId, TargetList};

/// Existence check against the live UI tree
pub trait ClientLookup {
    /// Returns true if `client_id` is currently present
    fn contains(&self, client_id: &str) -> bool;
}

/// Fire-and-forget partial update transport
///
/// `execute` and `render` are whitespace-joined identifier lists. The
/// registry never observes the outcome.
pub trait RemoteUpdate {
    fn request_update(&mut self, client_id: &str, execute: &str, render: &str);
}

impl<F> RemoteUpdate for F
where
    F: FnMut(&str, &str, &str),
{
    fn request_update(&mut self, client_id: &str, execute: &str, render: &str) {
        self(client_id, execute, render)
    }
}

impl<T: ClientLookup + ?Sized> ClientLookup for &T {
    fn contains(&self, client_id: &str) -> bool {
        (**self).contains(client_id)
    }
}

/// In-memory UI tree: a set of mounted client identifiers
#[derive(Debug, Clone, Default)]
pub struct MemoryUiTree {
    mounted: IndexSet<ClientId>,
}

impl MemoryUiTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a client; returns false if it was already mounted
    pub fn mount(&mut self, client_id: impl Into<ClientId>) -> bool {
        self.mounted.insert(client_id.into())
    }

    /// Unmount a client; returns false if it was not mounted
    pub fn unmount(&mut self, client_id: &str) -> bool {
        self.mounted.shift_remove(client_id)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}

impl ClientLookup for MemoryUiTree {
    fn contains(&self, client_id: &str) -> bool {
        self.mounted.contains(client_id)
    }
}

impl<S: Into<ClientId>> FromIterator<S> for MemoryUiTree {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            mounted: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Records every requested update, in order
#[derive(Debug, Clone, Default)]
pub struct UpdateLog {
    requests: Vec<UpdateRequest>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests recorded so far
    pub fn requests(&self) -> &[UpdateRequest] {
        &self.requests
    }

    /// Requests recorded for one client
    pub fn for_client<'a>(&'a self, client_id: &'a str) -> impl Iterator<Item = &'a UpdateRequest> {
        self.requests.iter().filter(move |r| r.client_id == client_id)
    }

    /// Take the recorded requests, leaving the log empty
    pub fn drain(&mut self) -> Vec<UpdateRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl RemoteUpdate for UpdateLog {
    fn request_update(&mut self, client_id: &str, execute: &str, render: &str) {
        self.requests.push(UpdateRequest::new(
            client_id,
            TargetList::parse(execute),
            TargetList::parse(render),
        ));
    }
}
