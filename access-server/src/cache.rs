//! Caching layer for reachability searches.
//!
//! The network is immutable once loaded, so a reachability set depends
//! only on its origin and caps. Sets are cached per (origin, caps) and
//! shared between the single-origin and multi-origin endpoints.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache as MokaCache;
use tracing::debug;

use crate::domain::{ClusterId, Constraint};
use crate::network::NetworkGraph;
use crate::planner::{
    CommonDestination, Itinerary, Origin, Planner, ReachabilitySet, SearchConfig, collect_common,
    is_searchable,
};

/// Cache key for reachability sets: (origin cluster, constraint key).
type ReachKey = (ClusterId, (Option<u32>, Option<u64>));

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
            ttl: Duration::from_secs(600),
            max_capacity: 1000,
        }
    }
}

/// Planner with memoized reachability.
///
/// Route searches are not cached; they are cheap next to a full
/// reachability sweep and their inputs are far more varied.
pub struct CachedPlanner {
    graph: Arc<NetworkGraph>,
    config: Arc<SearchConfig>,
    reachable: MokaCache<ReachKey, Arc<ReachabilitySet>>,
}

impl CachedPlanner {
    pub fn new(graph: Arc<NetworkGraph>, config: Arc<SearchConfig>, cache: &CacheConfig) -> Self {
        let reachable = MokaCache::builder()
            .time_to_live(cache.ttl)
            .max_capacity(cache.max_capacity)
            .build();

        Self {
            graph,
            config,
            reachable,
        }
    }

    /// Uncached planner over the same graph and configuration.
    pub fn planner(&self) -> Planner<'_> {
        Planner::new(&self.graph, &self.config)
    }

    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    /// Reachability from `origin`, using the cache if available.
    ///
    /// Unconstrained requests are answered directly and never stored.
    pub fn reachable(&self, origin: ClusterId, constraint: &Constraint) -> Arc<ReachabilitySet> {
        if constraint.is_unconstrained() {
            return Arc::new(ReachabilitySet::new());
        }

        let key = (origin, constraint.key());
        if let Some(cached) = self.reachable.get(&key) {
            debug!(%origin, "reachability cache hit");
            return cached;
        }

        let set = Arc::new(self.planner().reachable(origin, constraint));
        self.reachable.insert(key, Arc::clone(&set));
        set
    }

    /// Common destinations of several origins, with each origin's
    /// reachability served from the cache.
    pub fn common_destinations(&self, origins: &[Origin]) -> Vec<CommonDestination> {
        if !is_searchable(origins) {
            return Vec::new();
        }
        let sets: Vec<Arc<ReachabilitySet>> = origins
            .iter()
            .map(|o| self.reachable(o.cluster, &o.constraint))
            .collect();
        collect_common(&self.graph, origins, &sets)
    }

    pub fn route(
        &self,
        origin: ClusterId,
        target: ClusterId,
        constraint: &Constraint,
    ) -> Option<Itinerary> {
        self.planner().route(origin, target, constraint)
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.reachable.run_pending_tasks();
        self.reachable.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.reachable.invalidate_all();
    }
}
