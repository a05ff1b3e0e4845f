//! Session-lifetime cache of locally authoritative node sizes.
//!
//! The persistence collaborator lags behind the user: a resize is written to
//! the server asynchronously, and an upstream refresh can arrive before the
//! write lands. Reconciliation therefore prefers the cached size over the
//! entity's stored one. The cache is written synchronously on resize confirm
//! (and on every group resize frame), before any persistence action leaves
//! the engine.
//!
//! `SizeStore` is the seam: the engine owns a `Box<dyn SizeStore>` supplied
//! by whoever constructs it, so tests and hosts can inject their own.

#[cfg(test)]
#[path = "sizes_test.rs"]
mod sizes_test;

use std::collections::HashMap;

use crate::doc::{NodeRef, Size, SizeSnapshot};

/// Storage for last-known authoritative sizes.
pub trait SizeStore: Send {
    /// Cached size for `node`, if any.
    fn get(&self, node: NodeRef) -> Option<Size>;

    /// Record `size` as the local truth for `node`.
    fn set(&mut self, node: NodeRef, size: Size);

    /// Forget `node` (e.g. after its group was deleted).
    fn remove(&mut self, node: NodeRef);

    /// Seed item sizes from a persisted snapshot. Applies at most once per
    /// store; returns `true` when this call applied the snapshot.
    fn seed(&mut self, snapshot: &SizeSnapshot) -> bool;
}

/// Default in-memory `SizeStore`.
#[derive(Debug, Default)]
pub struct SizeCache {
    entries: HashMap<NodeRef, Size>,
    seeded: bool,
}

impl SizeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SizeStore for SizeCache {
    fn get(&self, node: NodeRef) -> Option<Size> {
        self.entries.get(&node).copied()
    }

    fn set(&mut self, node: NodeRef, size: Size) {
        self.entries.insert(node, size);
    }

    fn remove(&mut self, node: NodeRef) {
        self.entries.remove(&node);
    }

    fn seed(&mut self, snapshot: &SizeSnapshot) -> bool {
        if self.seeded {
            return false;
        }
        self.seeded = true;
        for (id, partial) in snapshot {
            // Entries missing either dimension are unusable.
            if let Some(size) = Size::from_parts(partial.width, partial.height) {
                self.entries.entry(NodeRef::Item(*id)).or_insert(size);
            }
        }
        tracing::debug!(entries = self.entries.len(), "size cache seeded");
        true
    }
}
