//! Persistence collaborator seam.
//!
//! DESIGN
//! ======
//! The engine never talks to storage. It emits actions; the host routes the
//! persistence ones to a `CanvasStore`. Writes are fire-and-forget from the
//! user's point of view: a failure is logged, never retried, and nothing is
//! rolled back locally.
//!
//! `MemoryStore` records every accepted write in order. The binary replays
//! scenarios against it and the tests assert on its log.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::atomic::{AtomicBool, Ordering};

use canvas::camera::Viewport;
use canvas::doc::{EntityId, Size};
use canvas::engine::GroupUpdate;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// Canonical storage for node positions, sizes, groups, and the viewport.
#[async_trait::async_trait]
pub trait CanvasStore: Send + Sync {
    async fn save_item_position(&self, id: EntityId, x: f64, y: f64) -> Result<(), StoreError>;

    async fn save_group_position(&self, id: EntityId, x: f64, y: f64) -> Result<(), StoreError>;

    async fn save_item_size(&self, id: EntityId, size: Size) -> Result<(), StoreError>;

    /// Apply a sparse group update; absent fields are left alone.
    async fn update_group(&self, id: EntityId, update: GroupUpdate) -> Result<(), StoreError>;

    async fn delete_group(&self, id: EntityId) -> Result<(), StoreError>;

    async fn save_viewport(&self, viewport: Viewport) -> Result<(), StoreError>;
}

/// One accepted write, as recorded by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StoreWrite {
    ItemPosition { id: EntityId, x: f64, y: f64 },
    GroupPosition { id: EntityId, x: f64, y: f64 },
    ItemSize { id: EntityId, width: f64, height: f64 },
    GroupUpdate { id: EntityId, update: GroupUpdate },
    GroupDelete { id: EntityId },
    Viewport { viewport: Viewport },
}

/// In-memory store that records writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    writes: Mutex<Vec<StoreWrite>>,
    failing: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every write fails with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Snapshot of the accepted writes, oldest first.
    pub async fn writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().await.clone()
    }

    async fn record(&self, write: StoreWrite) -> Result<(), StoreError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        self.writes.lock().await.push(write);
        Ok(())
    }
}

#[async_trait::async_trait]
impl CanvasStore for MemoryStore {
    async fn save_item_position(&self, id: EntityId, x: f64, y: f64) -> Result<(), StoreError> {
        self.record(StoreWrite::ItemPosition { id, x, y }).await
    }

    async fn save_group_position(&self, id: EntityId, x: f64, y: f64) -> Result<(), StoreError> {
        self.record(StoreWrite::GroupPosition { id, x, y }).await
    }

    async fn save_item_size(&self, id: EntityId, size: Size) -> Result<(), StoreError> {
        self.record(StoreWrite::ItemSize { id, width: size.width, height: size.height }).await
    }

    async fn update_group(&self, id: EntityId, update: GroupUpdate) -> Result<(), StoreError> {
        self.record(StoreWrite::GroupUpdate { id, update }).await
    }

    async fn delete_group(&self, id: EntityId) -> Result<(), StoreError> {
        if self.writes.lock().await.contains(&StoreWrite::GroupDelete { id }) {
            return Err(StoreError::NotFound { kind: "group", id });
        }
        self.record(StoreWrite::GroupDelete { id }).await
    }

    async fn save_viewport(&self, viewport: Viewport) -> Result<(), StoreError> {
        self.record(StoreWrite::Viewport { viewport }).await
    }
}
