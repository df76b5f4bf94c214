//! Caching layer for planned trips.
//!
//! Planning runs up to k² searches, so repeated requests are served from
//! memory. Entries are keyed by the candidate stations at each end rather
//! than by the coordinates themselves: two requests that resolve to the
//! same stations, in the same order, get the same plan.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::planner::{Candidates, PlanResult};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Cache for plan results.
pub struct PlanCache {
    plans: MokaCache<Candidates, Arc<PlanResult>>,
}

impl PlanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    /// Get the cached plan between these candidates.
    pub async fn get(&self, candidates: &Candidates) -> Option<Arc<PlanResult>> {
        self.plans.get(candidates).await
    }

    /// Insert a plan into the cache.
    pub async fn insert(&self, candidates: Candidates, plan: Arc<PlanResult>) {
        self.plans.insert(candidates, plan).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }
}
