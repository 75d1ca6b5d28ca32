//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::GraphCache;
use crate::network::InMemoryNetwork;
use crate::planner::{Planner, PlannerConfig};

/// Shared application state.
///
/// Cloned into every request; all fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Network store, also written by telemetry ingestion
    pub network: InMemoryNetwork,

    /// Path and ETA query configuration
    pub config: Arc<PlannerConfig>,

    /// Built graphs, when caching is enabled
    pub graph_cache: Option<GraphCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        network: InMemoryNetwork,
        config: PlannerConfig,
        graph_cache: Option<GraphCache>,
    ) -> Self {
        Self {
            network,
            config: Arc::new(config),
            graph_cache,
        }
    }

    /// A planner over the shared network, using the graph cache if enabled.
    pub fn planner(&self) -> Planner<'_, InMemoryNetwork> {
        let planner = Planner::new(&self.network, &self.config);
        match &self.graph_cache {
            Some(cache) => planner.with_cache(cache),
            None => planner,
        }
    }
}
