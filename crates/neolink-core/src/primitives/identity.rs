//! Entity identity
//!
//! Nodes and relationships compare by identity rather than by content.
//! An entity created locally gets a process-unique token; once it is bound
//! to a server-side id, or hydrated from a result, the remote id is its
//! identity.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LOCAL_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identity {
    /// Not yet known to any server
    Local(u64),
    /// Server-assigned id
    Remote(i64),
}

impl Identity {
    /// Allocate a fresh local identity
    #[must_use]
    pub fn fresh() -> Self {
        Self::Local(NEXT_LOCAL_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn remote_id(&self) -> Option<i64> {
        match self {
            Self::Remote(id) => Some(*id),
            Self::Local(_) => None,
        }
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}
