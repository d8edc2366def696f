//! Opaque identifiers.
//!
//! `AgentId` wraps an `Arc<str>` rather than a dense integer index — agent
//! ids in this system are externally chosen strings (`"npc-17"`, a UUID,
//! whatever the host hands in when spawning), cloned often (every event,
//! every routing task) and compared by value, never used to index a SoA
//! array directly. `Arc<str>` keeps clones to a refcount bump instead of a
//! fresh allocation.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// An externally-chosen agent identifier.
///
/// Two `AgentId`s are equal iff their underlying strings are equal —
/// `Arc` sharing is purely a clone-cost optimization and never observable.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(Arc<str>);

impl AgentId {
    #[inline]
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for AgentId {
    #[inline]
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
