//! Persistence service: routes engine actions to the store and runs the
//! debounced flush loop.
//!
//! DESIGN
//! ======
//! Position writes wait in the engine's debouncer. The flush task sleeps until
//! the earliest deadline (or until woken because a new write was scheduled),
//! drains due writes under the engine lock, releases the lock, then writes to
//! the store. Size confirms, live group resizes, deletes, and viewport
//! changes bypass the debouncer and are dispatched as soon as they are
//! emitted.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;

use std::time::Duration;

use canvas::doc::Size;
use canvas::engine::Action;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::StoreError;
use crate::services::store::CanvasStore;
use crate::state::HostState;

/// Send every persistence action in `actions` to `store`, in order.
///
/// Failures are logged and counted; nothing is retried. Non-persistence
/// actions are ignored. Returns the number of failed writes.
pub async fn dispatch(store: &dyn CanvasStore, actions: &[Action]) -> usize {
    let mut failures = 0;
    for action in actions {
        let Some(result) = write(store, action).await else {
            continue;
        };
        if let Err(e) = result {
            failures += 1;
            error!(error = %e, ?action, "store write failed");
        }
    }
    failures
}

async fn write(store: &dyn CanvasStore, action: &Action) -> Option<Result<(), StoreError>> {
    let result = match action {
        Action::PositionChanged { id, x, y } => store.save_item_position(*id, *x, *y).await,
        Action::GroupPositionChanged { id, x, y } => store.save_group_position(*id, *x, *y).await,
        Action::SizeChanged { id, width, height } => store.save_item_size(*id, Size::new(*width, *height)).await,
        Action::GroupUpdated { id, update } => store.update_group(*id, *update).await,
        Action::GroupDeleted { id } => store.delete_group(*id).await,
        Action::ViewportChanged(viewport) => store.save_viewport(*viewport).await,
        Action::Select(_)
        | Action::SelectionChanged { .. }
        | Action::DeleteSelected { .. }
        | Action::DoubleClick { .. }
        | Action::EditGroup { .. }
        | Action::RenderNeeded => return None,
    };
    Some(result)
}

/// Spawn the background flush task. It runs until `state.shutdown` is notified.
pub fn spawn_flush_task(state: HostState) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let deadline = state.engine.lock().await.next_flush_deadline();
            let wait = deadline.map(|due| Duration::from_millis(due.saturating_sub(state.now_ms())));

            tokio::select! {
                () = sleep_or_park(wait) => {}
                () = state.wake.notified() => continue,
                () = state.shutdown.notified() => {
                    debug!("flush task stopping");
                    return;
                }
            }

            let now = state.now_ms();
            let due = state.engine.lock().await.tick(now);
            if !due.is_empty() {
                debug!(count = due.len(), now, "flushing debounced writes");
                let failures = dispatch(state.store.as_ref(), &due).await;
                state.record_flush_failures(failures);
            }
        }
    })
}

async fn sleep_or_park(wait: Option<Duration>) {
    match wait {
        Some(wait) => tokio::time::sleep(wait).await,
        None => std::future::pending().await,
    }
}

/// Write every pending position immediately. Used on shutdown so no drag is
/// lost to the quiet period. Returns the number of failed writes.
pub async fn flush_remaining(state: &HostState) -> usize {
    let pending = state.engine.lock().await.flush_pending();
    if pending.is_empty() {
        return 0;
    }
    debug!(count = pending.len(), "flushing pending writes on shutdown");
    dispatch(state.store.as_ref(), &pending).await
}
