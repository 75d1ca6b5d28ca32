//! Query entry points: path search and live ETAs over a network model.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::cache::GraphCache;
use crate::domain::{JourneyId, StopId};
use crate::network::{NetworkError, NetworkModel};

use super::config::PlannerConfig;
use super::eta::{StopEta, compute_etas};
use super::graph::AdjacencyMap;
use super::path::{Segment, find_path};

/// Error from a path query.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PathError {
    /// The caller named a stop that does not exist
    #[error("unknown stop {0}")]
    InvalidInput(StopId),

    /// Both stops exist but no sequence of rides connects them
    #[error("no path from stop {start} to stop {end}")]
    NotFound { start: StopId, end: StopId },

    /// Reading the network failed
    #[error("network error: {0}")]
    Network(#[source] NetworkError),
}

/// Error from an ETA query.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EtaError {
    #[error("journey {0} not found")]
    JourneyNotFound(JourneyId),

    /// Reading the network failed
    #[error("network error: {0}")]
    Network(#[source] NetworkError),
}

/// A path segment with display labels resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSegment {
    pub segment: Segment,
    pub route_name: String,
    pub bus_number: String,
}

/// ETAs for every stop on a journey's route.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyEtas {
    pub journey_id: JourneyId,
    pub route_name: String,

    /// Whether the telemetry is older than the configured threshold.
    pub stale: bool,

    pub etas: Vec<StopEta>,
}

/// Path and ETA planner over a network model.
///
/// Each query reads a fresh snapshot from the network. Nothing is kept
/// between queries except, when configured, graphs in a [`GraphCache`].
pub struct Planner<'a, N: NetworkModel> {
    network: &'a N,
    config: &'a PlannerConfig,
    cache: Option<&'a GraphCache>,
}

impl<'a, N: NetworkModel> Planner<'a, N> {
    /// Create a new planner that rebuilds the graph on every path query.
    pub fn new(network: &'a N, config: &'a PlannerConfig) -> Self {
        Self {
            network,
            config,
            cache: None,
        }
    }

    /// Reuse graphs from `cache` while the network version is unchanged.
    pub fn with_cache(mut self, cache: &'a GraphCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Find a fewest-segments path between two stops.
    ///
    /// Both stops are checked for existence before the graph is built, so
    /// an unknown stop is reported as [`PathError::InvalidInput`] rather
    /// than as a missing path.
    pub async fn find_path(
        &self,
        start: StopId,
        end: StopId,
    ) -> Result<Vec<PlannedSegment>, PathError> {
        self.require_stop(start).await?;
        self.require_stop(end).await?;

        let graph = self.graph().await.map_err(PathError::Network)?;
        let segments = find_path(&graph, start, end, self.config.max_hops)
            .ok_or(PathError::NotFound { start, end })?;

        debug!(
            start = %start,
            end = %end,
            hops = segments.len(),
            "Path found"
        );

        Ok(segments
            .into_iter()
            .map(|segment| PlannedSegment {
                route_name: graph
                    .route_name(segment.route)
                    .unwrap_or_default()
                    .to_string(),
                bus_number: graph
                    .bus_number(segment.bus)
                    .unwrap_or_default()
                    .to_string(),
                segment,
            })
            .collect())
    }

    /// Estimate arrival at each stop of a journey's route from its latest telemetry.
    ///
    /// Missing telemetry never fails the query; it produces unknown ETAs.
    pub async fn journey_etas(
        &self,
        id: JourneyId,
        now: DateTime<Utc>,
    ) -> Result<JourneyEtas, EtaError> {
        let journey = self.network.get_journey(id).await.map_err(|e| match e {
            NetworkError::JourneyNotFound(id) => EtaError::JourneyNotFound(id),
            other => EtaError::Network(other),
        })?;

        for issue in journey.inconsistencies() {
            warn!(%issue, "Data inconsistency, using the journey's route");
        }

        let stale = self
            .config
            .stale_after()
            .is_some_and(|max_age| journey.telemetry.is_stale(now, max_age));

        Ok(JourneyEtas {
            journey_id: journey.id,
            route_name: journey.route.name.clone(),
            stale,
            etas: compute_etas(&journey),
        })
    }

    async fn require_stop(&self, id: StopId) -> Result<(), PathError> {
        match self.network.get_stop(id).await {
            Ok(_) => Ok(()),
            Err(NetworkError::StopNotFound(id)) => Err(PathError::InvalidInput(id)),
            Err(e) => Err(PathError::Network(e)),
        }
    }

    async fn graph(&self) -> Result<Arc<AdjacencyMap>, NetworkError> {
        let Some(cache) = self.cache else {
            let routes = self.network.list_routes().await?;
            return Ok(Arc::new(AdjacencyMap::build(&routes)));
        };

        // Read the version first: a write landing before list_routes makes
        // the entry newer than its key, never older.
        let version = self.network.version().await;
        if let Some(graph) = cache.get(version).await {
            debug!(version, "Graph cache hit");
            return Ok(graph);
        }

        let routes = self.network.list_routes().await?;
        let graph = Arc::new(AdjacencyMap::build(&routes));
        cache.insert(version, graph.clone()).await;
        Ok(graph)
    }
}
