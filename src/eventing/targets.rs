//! # Target Lists
//!
//! Ordered client identifier lists used for the execute and render sides
//! of a partial update. Internally a sequence, on the wire a
//! whitespace-joined string.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collaborators::ClientLookup;

/// Identifier of one addressable UI element
pub type ClientId = String;

/// Keyword: the component that issued the request
pub const THIS: &str = "@this";
/// Keyword: nothing
pub const NONE: &str = "@none";

/// Returns true for `@`-prefixed keywords, which are never looked up
pub fn is_keyword(id: &str) -> bool {
    id.starts_with('@')
}

/// An ordered, duplicate-free list of client identifiers
///
/// Serializes as an array; deserializes from an array or a whitespace
/// separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TargetRepr")]
pub struct TargetList(Vec<ClientId>);

#[derive(Deserialize)]
#[serde(untagged)]
enum TargetRepr {
    Joined(String),
    Ids(Vec<ClientId>),
}

impl From<TargetRepr> for TargetList {
    fn from(repr: TargetRepr) -> Self {
        match repr {
            TargetRepr::Joined(list) => TargetList::parse(&list),
            TargetRepr::Ids(ids) => ids.into(),
        }
    }
}

impl TargetList {
    /// Create an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a whitespace separated list
    ///
    /// Runs of whitespace count as one separator; an empty or blank input
    /// yields an empty list.
    pub fn parse(list: &str) -> Self {
        list.split_whitespace().collect()
    }

    /// A list holding a single identifier
    pub fn single(id: impl Into<ClientId>) -> Self {
        Self(vec![id.into()])
    }

    /// Replace an empty list with `keyword`
    pub fn or_keyword(self, keyword: &str) -> Self {
        if self.is_empty() {
            Self::parse(keyword)
        } else {
            self
        }
    }

    /// Append an identifier unless already present
    pub fn push(&mut self, id: impl Into<ClientId>) {
        let id = id.into();
        if !self.contains(&id) {
            self.0.push(id);
        }
    }

    /// Append every identifier of `other` not already present
    pub fn merge(&mut self, other: &TargetList) {
        for id in other.iter() {
            self.push(id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|existing| existing == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-keyword identifiers absent from the UI tree
    pub fn missing<'a>(&'a self, lookup: &impl ClientLookup) -> Vec<&'a str> {
        self.iter()
            .filter(|id| !is_keyword(id) && !lookup.contains(id))
            .collect()
    }

    /// Serialize to the single-space joined form expected by the transport
    pub fn to_wire(&self) -> String {
        self.0.join(" ")
    }
}

impl fmt::Display for TargetList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

impl<S: Into<ClientId>> FromIterator<S> for TargetList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = TargetList::new();
        for id in iter {
            list.push(id);
        }
        list
    }
}

impl From<&str> for TargetList {
    fn from(list: &str) -> Self {
        TargetList::parse(list)
    }
}

impl From<String> for TargetList {
    fn from(list: String) -> Self {
        TargetList::parse(&list)
    }
}

impl From<Vec<ClientId>> for TargetList {
    fn from(ids: Vec<ClientId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<&[&str]> for TargetList {
    fn from(ids: &[&str]) -> Self {
        ids.iter().copied().collect()
    }
}
