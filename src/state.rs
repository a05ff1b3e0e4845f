//! Shared host state.
//!
//! DESIGN
//! ======
//! The engine is single-threaded and synchronous; the host shares it between
//! the replay loop and the flush task behind a `tokio::sync::Mutex`. Neither
//! side holds the lock across store I/O. `wake` nudges the flush task when a
//! write may have been scheduled; `shutdown` stops it. The flush task runs
//! detached, so it tallies its failed writes in `flush_failures` for the
//! final summary.
//!
//! The host clock is milliseconds since `HostState` was created, read from
//! `tokio::time::Instant` so paused-time tests drive it deterministically.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use canvas::engine::EngineCore;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;

use crate::services::store::CanvasStore;

#[derive(Clone)]
pub struct HostState {
    pub engine: Arc<Mutex<EngineCore>>,
    pub store: Arc<dyn CanvasStore>,
    pub wake: Arc<Notify>,
    pub shutdown: Arc<Notify>,
    flush_failures: Arc<AtomicUsize>,
    started: Instant,
}

impl HostState {
    #[must_use]
    pub fn new(engine: EngineCore, store: Arc<dyn CanvasStore>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            store,
            wake: Arc::new(Notify::new()),
            shutdown: Arc::new(Notify::new()),
            flush_failures: Arc::new(AtomicUsize::new(0)),
            started: Instant::now(),
        }
    }

    pub fn record_flush_failures(&self, count: usize) {
        self.flush_failures.fetch_add(count, Ordering::Relaxed);
    }

    /// Failed writes from the background flush task so far.
    #[must_use]
    pub fn flush_failures(&self) -> usize {
        self.flush_failures.load(Ordering::Relaxed)
    }

    /// Host clock reading handed to the engine's debouncer.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// The instant `ms` milliseconds after the clock origin.
    #[must_use]
    pub fn instant_at(&self, ms: u64) -> Instant {
        self.started + std::time::Duration::from_millis(ms)
    }
}
