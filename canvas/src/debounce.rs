//! Keyed debounce for persistence writes.
//!
//! DESIGN
//! ======
//! Every key has its own deadline. `schedule` replaces the pending payload
//! for that key and pushes its deadline out by the quiet period; other keys
//! are untouched. The host polls `drain_due` with its own clock (milliseconds
//! from any fixed origin), so the debouncer works the same under a browser
//! event loop, a tokio runtime, or a test.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Pending<P> {
    payload: P,
    due_ms: u64,
}

/// Per-key debounce queue.
#[derive(Debug, Clone)]
pub struct Debouncer<K, P> {
    quiet_ms: u64,
    pending: HashMap<K, Pending<P>>,
}

impl<K, P> Debouncer<K, P>
where
    K: Copy + Eq + Hash + Ord,
{
    /// Create a debouncer that flushes a key `quiet_ms` after its last schedule.
    #[must_use]
    pub fn new(quiet_ms: u64) -> Self {
        Self { quiet_ms, pending: HashMap::new() }
    }

    #[must_use]
    pub fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    /// Register or replace the pending write for `key`. Returns `true` when an
    /// earlier pending write for the same key was collapsed into this one.
    pub fn schedule(&mut self, key: K, payload: P, now_ms: u64) -> bool {
        let due_ms = now_ms.saturating_add(self.quiet_ms);
        self.pending.insert(key, Pending { payload, due_ms }).is_some()
    }

    /// Remove and return every write whose quiet period has elapsed, ordered
    /// by deadline then key.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<(K, P)> {
        let mut due: Vec<(u64, K)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due_ms <= now_ms)
            .map(|(k, p)| (p.due_ms, *k))
            .collect();
        due.sort();
        self.take(due.into_iter().map(|(_, k)| k))
    }

    /// Remove and return every pending write regardless of deadline.
    pub fn flush_all(&mut self) -> Vec<(K, P)> {
        let mut keys: Vec<(u64, K)> = self.pending.iter().map(|(k, p)| (p.due_ms, *k)).collect();
        keys.sort();
        self.take(keys.into_iter().map(|(_, k)| k))
    }

    fn take(&mut self, keys: impl Iterator<Item = K>) -> Vec<(K, P)> {
        keys.filter_map(|k| self.pending.remove(&k).map(|p| (k, p.payload))).collect()
    }

    /// Drop the pending write for `key` without flushing it.
    pub fn cancel(&mut self, key: &K) -> Option<P> {
        self.pending.remove(key).map(|p| p.payload)
    }

    /// Latest payload waiting for `key`.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<&P> {
        self.pending.get(key).map(|p| &p.payload)
    }

    /// Earliest deadline across all keys; the host sleeps until then.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.values().map(|p| p.due_ms).min()
    }

    /// Iterate pending `(key, payload)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &P)> {
        self.pending.iter().map(|(k, p)| (k, &p.payload))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
