//! In-memory network store.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{Bus, Journey, JourneyId, Route, RouteId, Stop, StopId, Telemetry};

use super::NetworkModel;
use super::convert::convert_snapshot;
use super::error::NetworkError;
use super::snapshot::NetworkSnapshot;
use super::state::{JourneyDefinition, NetworkState, RouteDefinition};

#[derive(Debug, Default)]
struct Versioned {
    state: NetworkState,
    version: u64,
}

/// Thread-safe in-memory network.
///
/// Cloning is cheap and clones share the same data. Every successful write
/// bumps the version counter; failed writes leave both data and version
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNetwork {
    inner: Arc<RwLock<Versioned>>,
}

impl InMemoryNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a network from a snapshot, validating every record.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Self, NetworkError> {
        let state = convert_snapshot(snapshot)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(Versioned { state, version: 0 })),
        })
    }

    /// Load a network from a JSON snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let json = std::fs::read_to_string(path).map_err(|e| NetworkError::Io {
            path: shown.clone(),
            message: e.to_string(),
        })?;
        let snapshot: NetworkSnapshot =
            serde_json::from_str(&json).map_err(|e| NetworkError::Json {
                path: shown.clone(),
                message: e.to_string(),
            })?;

        let network = Self::from_snapshot(&snapshot)?;
        info!(
            path = %shown,
            stops = snapshot.stops.len(),
            routes = snapshot.routes.len(),
            buses = snapshot.buses.len(),
            journeys = snapshot.journeys.len(),
            "Loaded network snapshot"
        );
        Ok(network)
    }

    pub async fn upsert_stop(&self, stop: Stop) -> Result<(), NetworkError> {
        self.write(|state| state.put_stop(stop)).await
    }

    pub async fn upsert_route(&self, route: RouteDefinition) -> Result<(), NetworkError> {
        self.write(|state| state.put_route(route)).await
    }

    pub async fn upsert_bus(&self, bus: Bus) -> Result<(), NetworkError> {
        self.write(|state| state.put_bus(bus)).await
    }

    pub async fn upsert_journey(&self, journey: JourneyDefinition) -> Result<(), NetworkError> {
        self.write(|state| state.put_journey(journey)).await
    }

    /// Record a live position report for a journey.
    pub async fn update_telemetry(
        &self,
        journey: JourneyId,
        telemetry: Telemetry,
    ) -> Result<(), NetworkError> {
        self.write(|state| state.set_telemetry(journey, telemetry)).await
    }

    async fn write<F>(&self, apply: F) -> Result<(), NetworkError>
    where
        F: FnOnce(&mut NetworkState) -> Result<(), NetworkError>,
    {
        let mut guard = self.inner.write().await;
        apply(&mut guard.state)?;
        guard.version += 1;
        debug!(version = guard.version, "Network updated");
        Ok(())
    }
}

impl NetworkModel for InMemoryNetwork {
    async fn version(&self) -> u64 {
        self.inner.read().await.version
    }

    async fn list_routes(&self) -> Result<Vec<Route>, NetworkError> {
        Ok(self.inner.read().await.state.routes())
    }

    async fn get_route(&self, id: RouteId) -> Result<Route, NetworkError> {
        self.inner.read().await.state.route(id)
    }

    async fn get_stop(&self, id: StopId) -> Result<Stop, NetworkError> {
        self.inner.read().await.state.stop(id)
    }

    async fn get_journey(&self, id: JourneyId) -> Result<Journey, NetworkError> {
        self.inner.read().await.state.journey(id)
    }
}
