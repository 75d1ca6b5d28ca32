//! Caching layer for built network graphs.
//!
//! Graphs are keyed by the network version they were built from. A write to
//! the network bumps its version, so a cached graph is never served for a
//! newer network: invalidation is implicit in the key.
//!
//! This is opt-in. Without it, every path query rebuilds the graph.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::planner::AdjacencyMap;

/// Configuration for the graph cache.
#[derive(Debug, Clone)]
pub struct GraphCacheConfig {
    /// TTL for cached graphs.
    pub ttl: Duration,

    /// Maximum number of cached graphs (one per network version).
    pub max_capacity: u64,
}

impl Default for GraphCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 4,
        }
    }
}

/// Cache of built graphs, keyed by network version.
#[derive(Clone)]
pub struct GraphCache {
    graphs: MokaCache<u64, Arc<AdjacencyMap>>,
}

impl GraphCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &GraphCacheConfig) -> Self {
        let graphs = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { graphs }
    }

    /// Get the graph built for a network version.
    pub async fn get(&self, version: u64) -> Option<Arc<AdjacencyMap>> {
        self.graphs.get(&version).await
    }

    /// Store the graph built for a network version.
    pub async fn insert(&self, version: u64, graph: Arc<AdjacencyMap>) {
        self.graphs.insert(version, graph).await;
    }
}
