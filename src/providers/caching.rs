use crate::core::clock::{Clock, SystemClock};
use crate::core::rates::{RateProvider, RateSource, RateTable};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// How long fetched rates are served before a refetch, 24 hours.
pub const DEFAULT_RATE_TTL: Duration = Duration::milliseconds(86_400_000);

/// A cached rate table together with where and when it came from.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub rates: Arc<RateTable>,
    pub source: RateSource,
    pub fetched_at: DateTime<Utc>,
}

// Caching for RateProvider
//
// Holds a single entry that is replaced wholesale once it is older than the
// TTL. The lock is only held to read or swap the entry, never across the
// provider call, so concurrent misses may both fetch and the last write wins.
#[derive(Clone)]
pub struct RateCache {
    inner: Arc<dyn RateProvider>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entry: Arc<RwLock<Option<RateSnapshot>>>,
}

impl RateCache {
    pub fn new(inner: Arc<dyn RateProvider>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            inner,
            clock,
            ttl,
            entry: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_system_clock(inner: Arc<dyn RateProvider>, ttl: Duration) -> Self {
        Self::new(inner, Arc::new(SystemClock), ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the current rate table, fetching a new one when the cached
    /// entry is missing or stale.
    pub async fn get_rates(&self) -> Arc<RateTable> {
        self.snapshot().await.rates
    }

    /// Like [`RateCache::get_rates`] but also reports whether the table is
    /// live or the static fallback, and when it was fetched.
    pub async fn snapshot(&self) -> RateSnapshot {
        let now = self.clock.now();

        if let Some(cached) = self.fresh_entry(now).await {
            debug!(source = %cached.source, "Cache hit for exchange rates");
            return cached;
        }

        debug!("Cache miss for exchange rates");
        let fetched = self.inner.fetch_rates().await;
        let snapshot = RateSnapshot {
            source: fetched.source(),
            rates: Arc::new(fetched.into_rates()),
            fetched_at: now,
        };

        debug!(source = %snapshot.source, "Cache put for exchange rates");
        *self.entry.write().await = Some(snapshot.clone());
        snapshot
    }

    async fn fresh_entry(&self, now: DateTime<Utc>) -> Option<RateSnapshot> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|cached| now - cached.fetched_at < self.ttl)
            .cloned()
    }
}
