//! Normalized network state.
//!
//! Entities are stored by id and joined into domain types on read, so an
//! updated stop is immediately visible on every route that serves it.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use crate::domain::{
    Bus, BusId, Journey, JourneyId, Route, RouteId, RouteStop, Stop, StopId, Telemetry,
};

use super::error::NetworkError;

/// A route as written by the administrative layer: stops by id with order values.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDefinition {
    pub id: RouteId,
    pub name: String,
    pub description: Option<String>,
    pub stops: Vec<(StopId, u32)>,
}

/// A journey as written by the scheduling layer.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyDefinition {
    pub id: JourneyId,
    pub bus: BusId,
    pub route: RouteId,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub telemetry: Telemetry,
}

/// Network entities keyed by id.
///
/// `BTreeMap` keeps iteration in ascending id order, which is the order
/// routes and buses are presented to the graph builder.
#[derive(Debug, Clone, Default)]
pub(crate) struct NetworkState {
    stops: BTreeMap<StopId, Stop>,
    routes: BTreeMap<RouteId, RouteDefinition>,
    buses: BTreeMap<BusId, Bus>,
    journeys: BTreeMap<JourneyId, JourneyDefinition>,
}

impl NetworkState {
    /// Insert or replace a stop.
    pub fn put_stop(&mut self, stop: Stop) -> Result<(), NetworkError> {
        if let Some(existing) = self
            .stops
            .values()
            .find(|s| s.code == stop.code && s.id != stop.id)
        {
            return Err(NetworkError::DuplicateStopCode {
                code: stop.code,
                existing: existing.id,
            });
        }
        self.stops.insert(stop.id, stop);
        Ok(())
    }

    /// Insert or replace a route definition.
    pub fn put_route(&mut self, route: RouteDefinition) -> Result<(), NetworkError> {
        let mut seen_stops = HashSet::new();
        let mut seen_orders = HashSet::new();

        for &(stop, order) in &route.stops {
            if !self.stops.contains_key(&stop) {
                return Err(NetworkError::StopNotFound(stop));
            }
            if !seen_stops.insert(stop) {
                return Err(NetworkError::DuplicateRouteStop {
                    route: route.id,
                    stop,
                });
            }
            if !seen_orders.insert(order) {
                return Err(NetworkError::DuplicateRouteOrder {
                    route: route.id,
                    order,
                });
            }
        }

        self.routes.insert(route.id, route);
        Ok(())
    }

    /// Insert or replace a bus.
    ///
    /// Reassigning a bus to another route does not touch its journeys; any
    /// resulting mismatch surfaces as a data inconsistency when queried.
    pub fn put_bus(&mut self, bus: Bus) -> Result<(), NetworkError> {
        if !self.routes.contains_key(&bus.route) {
            return Err(NetworkError::RouteNotFound(bus.route));
        }
        self.buses.insert(bus.id, bus);
        Ok(())
    }

    /// Insert or replace a journey.
    pub fn put_journey(&mut self, journey: JourneyDefinition) -> Result<(), NetworkError> {
        if !self.routes.contains_key(&journey.route) {
            return Err(NetworkError::RouteNotFound(journey.route));
        }
        let bus = self
            .buses
            .get(&journey.bus)
            .ok_or(NetworkError::BusNotFound(journey.bus))?;
        if bus.route != journey.route {
            return Err(NetworkError::RouteMismatch {
                journey: journey.id,
                bus: bus.id,
                journey_route: journey.route,
                bus_route: bus.route,
            });
        }
        self.journeys.insert(journey.id, journey);
        Ok(())
    }

    /// Replace a journey's telemetry.
    pub fn set_telemetry(
        &mut self,
        journey: JourneyId,
        telemetry: Telemetry,
    ) -> Result<(), NetworkError> {
        let stored = self
            .journeys
            .get_mut(&journey)
            .ok_or(NetworkError::JourneyNotFound(journey))?;
        stored.telemetry = telemetry;
        Ok(())
    }

    pub fn stop(&self, id: StopId) -> Result<Stop, NetworkError> {
        self.stops
            .get(&id)
            .cloned()
            .ok_or(NetworkError::StopNotFound(id))
    }

    pub fn route(&self, id: RouteId) -> Result<Route, NetworkError> {
        self.routes
            .get(&id)
            .map(|def| self.assemble_route(def))
            .ok_or(NetworkError::RouteNotFound(id))
    }

    /// All routes in ascending id order.
    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .values()
            .map(|def| self.assemble_route(def))
            .collect()
    }

    pub fn journey(&self, id: JourneyId) -> Result<Journey, NetworkError> {
        let def = self
            .journeys
            .get(&id)
            .ok_or(NetworkError::JourneyNotFound(id))?;
        let bus = self
            .buses
            .get(&def.bus)
            .cloned()
            .ok_or(NetworkError::BusNotFound(def.bus))?;
        let route = self.route(def.route)?;

        Ok(Journey {
            id: def.id,
            bus,
            route,
            departure_time: def.departure_time,
            arrival_time: def.arrival_time,
            telemetry: def.telemetry,
        })
    }

    fn assemble_route(&self, def: &RouteDefinition) -> Route {
        let stops = def
            .stops
            .iter()
            .filter_map(|&(stop, order)| {
                self.stops
                    .get(&stop)
                    .map(|s| RouteStop::new(s.clone(), order))
            })
            .collect();
        let buses = self
            .buses
            .values()
            .filter(|b| b.route == def.id)
            .cloned()
            .collect();

        let mut route = Route::new(def.id, def.name.clone(), stops, buses);
        route.description = def.description.clone();
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use chrono::TimeZone;

    fn stop_id(n: u64) -> StopId {
        StopId::new(n).unwrap()
    }

    fn route_id(n: u64) -> RouteId {
        RouteId::new(n).unwrap()
    }

    fn stop(id: u64, code: &str) -> Stop {
        Stop::new(
            stop_id(id),
            format!("Stop {id}"),
            code,
            Coordinate::new(27.7, 85.3).unwrap(),
        )
    }

    fn route_def(id: u64, stops: &[(u64, u32)]) -> RouteDefinition {
        RouteDefinition {
            id: route_id(id),
            name: format!("Route {id}"),
            description: None,
            stops: stops.iter().map(|&(s, o)| (stop_id(s), o)).collect(),
        }
    }

    fn journey_def(id: u64, bus: u64, route: u64) -> JourneyDefinition {
        JourneyDefinition {
            id: JourneyId::new(id).unwrap(),
            bus: BusId::new(bus).unwrap(),
            route: route_id(route),
            departure_time: Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap(),
            arrival_time: None,
            telemetry: Telemetry::default(),
        }
    }

    fn populated() -> NetworkState {
        let mut state = NetworkState::default();
        state.put_stop(stop(1, "A")).unwrap();
        state.put_stop(stop(2, "B")).unwrap();
        state.put_stop(stop(3, "C")).unwrap();
        state.put_route(route_def(1, &[(2, 20), (1, 10)])).unwrap();
        state.put_route(route_def(2, &[(2, 1), (3, 2)])).unwrap();
        state
            .put_bus(Bus::new(BusId::new(1).unwrap(), "B1", route_id(1)))
            .unwrap();
        state
    }

    #[test]
    fn duplicate_stop_code_rejected() {
        let mut state = populated();
        let err = state.put_stop(stop(9, "A")).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateStopCode { .. }));

        // Re-putting the same stop with its own code is an update
        state.put_stop(stop(1, "A")).unwrap();
    }

    #[test]
    fn route_validation() {
        let mut state = populated();

        let err = state.put_route(route_def(3, &[(1, 1), (99, 2)])).unwrap_err();
        assert!(matches!(err, NetworkError::StopNotFound(s) if s == stop_id(99)));

        let err = state.put_route(route_def(3, &[(1, 1), (1, 2)])).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateRouteStop { .. }));

        let err = state.put_route(route_def(3, &[(1, 1), (2, 1)])).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateRouteOrder { order: 1, .. }));
    }

    #[test]
    fn assembled_route_is_ordered_with_buses() {
        let state = populated();
        let route = state.route(route_id(1)).unwrap();

        let ids: Vec<_> = route.stops().iter().map(|rs| rs.stop.id.get()).collect();
        assert_eq!(ids, [1, 2]);
        assert_eq!(route.buses.len(), 1);

        let other = state.route(route_id(2)).unwrap();
        assert!(other.buses.is_empty());
    }

    #[test]
    fn routes_in_id_order() {
        let state = populated();
        let ids: Vec<_> = state.routes().iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn stop_update_visible_on_routes() {
        let mut state = populated();
        let mut renamed = stop(1, "A");
        renamed.name = "Renamed".into();
        state.put_stop(renamed).unwrap();

        let route = state.route(route_id(1)).unwrap();
        assert_eq!(route.stops()[0].stop.name, "Renamed");
    }

    #[test]
    fn bus_requires_route() {
        let mut state = populated();
        let err = state
            .put_bus(Bus::new(BusId::new(2).unwrap(), "B2", route_id(42)))
            .unwrap_err();
        assert!(matches!(err, NetworkError::RouteNotFound(_)));
    }

    #[test]
    fn journey_validation() {
        let mut state = populated();

        let err = state.put_journey(journey_def(1, 7, 1)).unwrap_err();
        assert!(matches!(err, NetworkError::BusNotFound(_)));

        let err = state.put_journey(journey_def(1, 1, 2)).unwrap_err();
        assert!(matches!(err, NetworkError::RouteMismatch { .. }));

        state.put_journey(journey_def(1, 1, 1)).unwrap();
        let journey = state.journey(JourneyId::new(1).unwrap()).unwrap();
        assert_eq!(journey.route.id, route_id(1));
        assert_eq!(journey.bus.number, "B1");
    }

    #[test]
    fn telemetry_requires_journey() {
        let mut state = populated();
        let err = state
            .set_telemetry(JourneyId::new(5).unwrap(), Telemetry::default())
            .unwrap_err();
        assert!(matches!(err, NetworkError::JourneyNotFound(_)));
    }
}
