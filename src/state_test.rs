#![allow(clippy::float_cmp)]

use std::time::Duration;

use super::*;
use crate::services::store::MemoryStore;

fn state() -> HostState {
    HostState::new(EngineCore::new(), Arc::new(MemoryStore::new()))
}

#[tokio::test(start_paused = true)]
async fn clock_starts_at_zero_and_follows_tokio_time() {
    let state = state();
    assert_eq!(state.now_ms(), 0);
    tokio::time::advance(Duration::from_millis(750)).await;
    assert_eq!(state.now_ms(), 750);
}

#[tokio::test(start_paused = true)]
async fn instant_at_is_relative_to_origin() {
    let state = state();
    tokio::time::sleep_until(state.instant_at(1_200)).await;
    assert_eq!(state.now_ms(), 1_200);
}

#[tokio::test]
async fn clones_share_the_engine() {
    let a = state();
    let b = a.clone();
    a.engine.lock().await.set_viewport(800.0, 600.0, 2.0);
    assert_eq!(b.engine.lock().await.dpr, 2.0);
}

#[tokio::test]
async fn flush_failures_accumulate_across_clones() {
    let a = state();
    let b = a.clone();
    assert_eq!(a.flush_failures(), 0);
    a.record_flush_failures(2);
    b.record_flush_failures(1);
    assert_eq!(a.flush_failures(), 3);
}
