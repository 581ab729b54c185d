/// Process-wide snapshot store for the current trending result
///
/// Holds the latest published `TrendSnapshot` behind a reader-writer lock
/// around an `Arc`. Readers clone the `Arc` under a momentary read lock,
/// so a reader always sees one complete snapshot and a publish never
/// blocks readers behind a slow recomputation. Same hot-swap scheme the
/// service uses elsewhere for reloadable state.
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::TrendSnapshot;

#[derive(Debug)]
pub struct TrendStore {
    current: RwLock<Arc<TrendSnapshot>>,
}

impl Default for TrendStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendStore {
    /// Starts empty; the first completed cycle publishes the first real
    /// snapshot.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(TrendSnapshot::empty())),
        }
    }

    /// Replace the visible snapshot as a single atomic swap.
    pub fn publish(&self, snapshot: TrendSnapshot) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(snapshot);
    }

    /// The most recently published snapshot at the instant of the call.
    pub fn snapshot(&self) -> Arc<TrendSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Ordered trending hashtag strings only; scores stay internal.
    pub fn current_hashtags(&self) -> Vec<String> {
        self.snapshot().hashtags()
    }
}
