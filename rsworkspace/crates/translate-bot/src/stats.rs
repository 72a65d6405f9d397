//! Relay counters exposed on the health endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
struct Counters {
    admitted: AtomicU64,
    duplicates: AtomicU64,
    dropped: AtomicU64,
    delivered_dm: AtomicU64,
    replied: AtomicU64,
    reply_failed: AtomicU64,
    degraded: AtomicU64,
}

#[derive(Debug, Clone, Default)]
pub struct RelayStats {
    inner: Arc<Counters>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub admitted: u64,
    pub duplicates: u64,
    pub dropped: u64,
    pub delivered_dm: u64,
    pub replied: u64,
    pub reply_failed: u64,
    pub degraded: u64,
}

impl RelayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_admitted(&self) {
        self.inner.admitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.inner.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.inner.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivered_dm(&self) {
        self.inner.delivered_dm.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_replied(&self) {
        self.inner.replied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reply_failed(&self) {
        self.inner.reply_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_degraded(&self) {
        self.inner.degraded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let c = &self.inner;
        StatsSnapshot {
            admitted: c.admitted.load(Ordering::Relaxed),
            duplicates: c.duplicates.load(Ordering::Relaxed),
            dropped: c.dropped.load(Ordering::Relaxed),
            delivered_dm: c.delivered_dm.load(Ordering::Relaxed),
            replied: c.replied.load(Ordering::Relaxed),
            reply_failed: c.reply_failed.load(Ordering::Relaxed),
            degraded: c.degraded.load(Ordering::Relaxed),
        }
    }
}
