//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Bus, Route, RouteStop};
use crate::planner::{PlannedSegment, StopEta};

/// Query parameters for a path search.
///
/// Ids are optional strings so that missing or malformed values are
/// reported by the handler with the JSON error body.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// One ride in a path result.
#[derive(Debug, Serialize, PartialEq)]
pub struct PathSegmentResult {
    pub from_stop_id: u64,
    pub to_stop_id: u64,
    pub route_name: String,

    /// The bus's registration number
    pub bus_identifier: String,
}

/// Arrival estimate for one stop.
#[derive(Debug, Serialize, PartialEq)]
pub struct StopEtaResult {
    pub stop_id: u64,
    pub stop_name: String,

    /// Straight-line distance from the bus, null when its position is unknown
    pub distance_km: Option<f64>,

    /// Null when position or speed is unknown
    pub eta_minutes: Option<i64>,
}

/// A route with its ordered stops and assigned buses.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub stops: Vec<RouteStopResult>,
    pub buses: Vec<BusResult>,
}

#[derive(Debug, Serialize)]
pub struct RouteStopResult {
    pub stop_id: u64,
    pub name: String,
    pub code: String,
    pub order: u32,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct BusResult {
    pub id: u64,
    pub number: String,
    pub capacity: u32,
    pub is_active: bool,
}

/// Live position report for a journey.
#[derive(Debug, Deserialize)]
pub struct LocationUpdateRequest {
    pub latitude: f64,
    pub longitude: f64,

    /// Ground speed in km/h
    #[serde(default)]
    pub speed: Option<f64>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub network_version: u64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl PathSegmentResult {
    pub fn from_planned(planned: &PlannedSegment) -> Self {
        Self {
            from_stop_id: planned.segment.from.get(),
            to_stop_id: planned.segment.to.get(),
            route_name: planned.route_name.clone(),
            bus_identifier: planned.bus_number.clone(),
        }
    }
}

impl StopEtaResult {
    pub fn from_eta(eta: &StopEta) -> Self {
        Self {
            stop_id: eta.stop_id.get(),
            stop_name: eta.stop_name.clone(),
            distance_km: eta.distance_km,
            eta_minutes: eta.eta_minutes,
        }
    }
}

impl RouteResult {
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id.get(),
            name: route.name.clone(),
            description: route.description.clone(),
            stops: route.stops().iter().map(RouteStopResult::from_route_stop).collect(),
            buses: route.buses.iter().map(BusResult::from_bus).collect(),
        }
    }
}

impl RouteStopResult {
    fn from_route_stop(rs: &RouteStop) -> Self {
        Self {
            stop_id: rs.stop.id.get(),
            name: rs.stop.name.clone(),
            code: rs.stop.code.clone(),
            order: rs.order,
            latitude: rs.stop.coordinate.latitude(),
            longitude: rs.stop.coordinate.longitude(),
        }
    }
}

impl BusResult {
    fn from_bus(bus: &Bus) -> Self {
        Self {
            id: bus.id.get(),
            number: bus.number.clone(),
            capacity: bus.capacity,
            is_active: bus.is_active,
        }
    }
}
