//! In-flight reaction deduplication
//!
//! Discord can deliver the same reaction more than once (gateway resumes,
//! users toggling a reaction quickly). Only one relay run per
//! (message, emoji, reactor) may be in flight; later arrivals are dropped,
//! not queued.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use translate_types::DedupKey;

/// Admission gate for relay work. Cloning shares the same set.
#[derive(Clone, Default)]
pub struct ReactionDeduplicator {
    in_flight: Arc<Mutex<HashSet<DedupKey>>>,
}

impl ReactionDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` if absent. Returns `false` when it is already in flight.
    pub fn try_admit(&self, key: &DedupKey) -> bool {
        let admitted = self.lock().insert(key.clone());
        if !admitted {
            debug!(
                message_id = key.message_id,
                reactor_id = key.reactor_id,
                emoji = %key.emoji,
                "Reaction already in flight"
            );
        }
        admitted
    }

    /// Remove `key`. Removing an absent key is a no-op.
    pub fn release(&self, key: &DedupKey) {
        self.lock().remove(key);
    }

    /// Scoped admission: the key is released when the returned guard drops.
    pub fn admit(&self, key: DedupKey) -> Option<Admission> {
        if self.try_admit(&key) {
            Some(Admission {
                dedup: self.clone(),
                key,
            })
        } else {
            None
        }
    }

    // A panic while holding the lock cannot leave the set half-updated, so a
    // poisoned mutex is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashSet<DedupKey>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    pub(crate) fn in_flight_count(&self) -> usize {
        self.lock().len()
    }
}

/// Holds a key admitted by [`ReactionDeduplicator::admit`].
pub struct Admission {
    dedup: ReactionDeduplicator,
    key: DedupKey,
}

impl Drop for Admission {
    fn drop(&mut self) {
        self.dedup.release(&self.key);
    }
}
