//! Tenant-scoped TTL cache.
//!
//! One entry per tenant. Expired entries are dropped lazily by the `get` that
//! observes them; there is no background sweeper and no size bound.
//!
//! Each tenant also has a generation that `invalidate` advances. A loader
//! captures it with [`TenantCache::generation`] before reading storage and
//! stores through [`TenantCache::set_if_generation`], so a load that raced a
//! mutation never repopulates the entry with pre-mutation data.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_TTL: Duration = Duration::from_mins(5);

struct CacheEntry<T> {
    data: Arc<T>,
    cached_at: Instant,
}

/// Snapshot of the cache contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub tenants: Vec<Uuid>,
}

/// Per-tenant cache with a fixed time-to-live.
///
/// Callers use it cache-aside: `get`, and on a miss load from storage and
/// `set`. Concurrent misses for the same tenant may both load.
pub struct TenantCache<T> {
    entries: DashMap<Uuid, CacheEntry<T>>,
    generations: DashMap<Uuid, u64>,
    ttl: Duration,
}

impl<T> TenantCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            generations: DashMap::new(),
            ttl,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached data of the tenant, or `None` when absent or expired.
    ///
    /// An entry is fresh while its age is at most the TTL. An expired entry
    /// is removed.
    pub fn get(&self, tenant_id: Uuid) -> Option<Arc<T>> {
        let now = Instant::now();
        match self.entries.get(&tenant_id) {
            None => return None,
            Some(entry) if self.is_fresh(entry.cached_at, now) => {
                return Some(Arc::clone(&entry.data));
            }
            Some(_) => {}
        }

        // A concurrent `set` may have refreshed the entry in between.
        let removed = self
            .entries
            .remove_if(&tenant_id, |_, entry| !self.is_fresh(entry.cached_at, now))
            .is_some();
        if removed {
            debug!(tenant_id = %tenant_id, "Cache entry expired");
        }
        None
    }

    /// Store `data` for the tenant, replacing any entry and restarting its TTL.
    pub fn set(&self, tenant_id: Uuid, data: T) -> Arc<T> {
        let data = Arc::new(data);
        self.entries.insert(
            tenant_id,
            CacheEntry {
                data: Arc::clone(&data),
                cached_at: Instant::now(),
            },
        );
        data
    }

    /// Current generation of the tenant; starts at zero.
    #[must_use]
    pub fn generation(&self, tenant_id: Uuid) -> u64 {
        self.generations.get(&tenant_id).map_or(0, |g| *g)
    }

    /// Store `data` only if the tenant has not been invalidated since
    /// `generation` was read. The data is returned either way.
    pub fn set_if_generation(&self, tenant_id: Uuid, generation: u64, data: T) -> Arc<T> {
        let data = Arc::new(data);
        // Held across the insert so `invalidate` cannot advance in between.
        let current = self.generations.get(&tenant_id);
        if current.as_deref().copied().unwrap_or(0) == generation {
            self.entries.insert(
                tenant_id,
                CacheEntry {
                    data: Arc::clone(&data),
                    cached_at: Instant::now(),
                },
            );
        } else {
            debug!(
                tenant_id = %tenant_id,
                generation,
                "Discarded load that raced an invalidation"
            );
        }
        drop(current);
        data
    }

    /// Drop the tenant's entry and advance its generation. Returns whether an
    /// entry existed.
    pub fn invalidate(&self, tenant_id: Uuid) -> bool {
        *self.generations.entry(tenant_id).or_insert(0) += 1;
        let existed = self.entries.remove(&tenant_id).is_some();
        if existed {
            debug!(tenant_id = %tenant_id, "Cache entry invalidated");
        }
        existed
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Counts entries still stored, including expired ones not yet observed.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            tenants: self.entries.iter().map(|e| *e.key()).collect(),
        }
    }

    fn is_fresh(&self, cached_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(cached_at) <= self.ttl
    }
}

impl<T> Default for TenantCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
