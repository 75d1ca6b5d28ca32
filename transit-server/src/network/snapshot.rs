//! JSON snapshot format for the network.
//!
//! A snapshot is the serialized form of everything the store holds. It is
//! what the server loads at startup, keyed by raw integer ids the way the
//! administrative database exports them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_CAPACITY;

/// A complete network export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    #[serde(default)]
    pub stops: Vec<StopRecord>,

    #[serde(default)]
    pub routes: Vec<RouteRecord>,

    #[serde(default)]
    pub buses: Vec<BusRecord>,

    #[serde(default)]
    pub journeys: Vec<JourneyRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopRecord {
    pub id: u64,
    pub name: String,
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Stops on the route with their order values, in any sequence.
    #[serde(default)]
    pub stops: Vec<RouteStopRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteStopRecord {
    pub stop_id: u64,
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusRecord {
    pub id: u64,

    /// Bus number shown to passengers
    pub number: String,

    pub route_id: u64,

    #[serde(default = "default_capacity")]
    pub capacity: u32,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyRecord {
    pub id: u64,
    pub bus_id: u64,
    pub route_id: u64,
    pub departure_time: DateTime<Utc>,

    #[serde(default)]
    pub arrival_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub current_latitude: Option<f64>,

    #[serde(default)]
    pub current_longitude: Option<f64>,

    /// Speed in km/h
    #[serde(default)]
    pub current_speed: Option<f64>,

    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

fn default_capacity() -> u32 {
    DEFAULT_CAPACITY
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_snapshot_uses_defaults() {
        let json = r#"{
            "stops": [{"id": 1, "name": "Ratnapark", "code": "RNP", "latitude": 27.706, "longitude": 85.315}],
            "routes": [{"id": 1, "name": "Ring Road"}],
            "buses": [{"id": 1, "number": "BA 1 KHA 1", "route_id": 1}],
            "journeys": [{"id": 1, "bus_id": 1, "route_id": 1, "departure_time": "2025-01-10T08:00:00Z"}]
        }"#;

        let snapshot: NetworkSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.stops.len(), 1);
        assert!(snapshot.routes[0].stops.is_empty());
        assert!(snapshot.routes[0].description.is_none());
        assert_eq!(snapshot.buses[0].capacity, 40);
        assert!(snapshot.buses[0].is_active);
        assert!(snapshot.journeys[0].current_speed.is_none());
        assert!(snapshot.journeys[0].last_updated.is_none());
    }

    #[test]
    fn empty_object_is_empty_network() {
        let snapshot: NetworkSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.stops.is_empty());
        assert!(snapshot.journeys.is_empty());
    }
}
