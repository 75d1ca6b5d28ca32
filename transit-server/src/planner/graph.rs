//! Directed adjacency structure built from routes.
//!
//! Every consecutive stop pair on a route yields one edge per bus serving
//! that route. Parallel edges between the same stops are kept: each one is
//! a distinct vehicle a passenger could board.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::{BusId, Route, RouteId, StopId};

/// An outgoing edge: ride `bus` on `route` to the next stop `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: StopId,
    pub route: RouteId,
    pub bus: BusId,
}

/// Outgoing edges per stop, plus the labels needed to describe them.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMap {
    edges: HashMap<StopId, Vec<Edge>>,
    route_names: HashMap<RouteId, String>,
    bus_numbers: HashMap<BusId, String>,
}

impl AdjacencyMap {
    /// Build the graph from a list of routes.
    ///
    /// Edges from a stop are listed in route order, then bus order, exactly
    /// as the routes are given. Routes with fewer than two stops or no buses
    /// contribute no edges.
    pub fn build(routes: &[Route]) -> Self {
        let mut graph = Self::default();

        for route in routes {
            for issue in route.inconsistencies() {
                warn!(%issue, "Data inconsistency, using stored stop order");
            }

            graph.route_names.insert(route.id, route.name.clone());
            for bus in &route.buses {
                graph.bus_numbers.insert(bus.id, bus.number.clone());
            }

            for (from, to) in route.hops() {
                let out = graph.edges.entry(from.id).or_default();
                out.extend(route.buses.iter().map(|bus| Edge {
                    to: to.id,
                    route: route.id,
                    bus: bus.id,
                }));
            }
        }

        debug!(
            routes = routes.len(),
            stops = graph.stop_count(),
            edges = graph.edge_count(),
            "Built network graph"
        );
        graph
    }

    /// Outgoing edges from a stop, in enumeration order.
    pub fn edges_from(&self, stop: StopId) -> &[Edge] {
        self.edges.get(&stop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Number of stops with at least one outgoing edge.
    pub fn stop_count(&self) -> usize {
        self.edges.values().filter(|out| !out.is_empty()).count()
    }

    pub fn route_name(&self, id: RouteId) -> Option<&str> {
        self.route_names.get(&id).map(String::as_str)
    }

    pub fn bus_number(&self, id: BusId) -> Option<&str> {
        self.bus_numbers.get(&id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bus, Coordinate, RouteStop, Stop};

    fn stop_id(n: u64) -> StopId {
        StopId::new(n).unwrap()
    }

    fn stop(n: u64) -> Stop {
        Stop::new(
            stop_id(n),
            format!("Stop {n}"),
            format!("S{n}"),
            Coordinate::new(0.0, 0.0).unwrap(),
        )
    }

    /// Route `id` visiting `stops` in the given order, served by `buses`.
    fn route(id: u64, stops: &[u64], buses: &[u64]) -> Route {
        let route_id = RouteId::new(id).unwrap();
        let route_stops = stops
            .iter()
            .enumerate()
            .map(|(i, &s)| RouteStop::new(stop(s), i as u32 + 1))
            .collect();
        let buses = buses
            .iter()
            .map(|&b| Bus::new(BusId::new(b).unwrap(), format!("BUS-{b}"), route_id))
            .collect();
        Route::new(route_id, format!("R{id}"), route_stops, buses)
    }

    #[test]
    fn consecutive_stops_become_edges() {
        let graph = AdjacencyMap::build(&[route(1, &[1, 2, 3], &[10])]);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.edges_from(stop_id(1)),
            &[Edge {
                to: stop_id(2),
                route: RouteId::new(1).unwrap(),
                bus: BusId::new(10).unwrap(),
            }]
        );
        assert_eq!(graph.edges_from(stop_id(2))[0].to, stop_id(3));
        assert!(graph.edges_from(stop_id(3)).is_empty());
    }

    #[test]
    fn edges_are_directional() {
        let graph = AdjacencyMap::build(&[route(1, &[1, 2], &[10])]);
        assert!(graph.edges_from(stop_id(2)).is_empty());
    }

    #[test]
    fn parallel_edges_per_bus() {
        let graph = AdjacencyMap::build(&[route(1, &[1, 2], &[10, 11, 12])]);

        let out = graph.edges_from(stop_id(1));
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|e| e.to == stop_id(2)));
        let buses: Vec<_> = out.iter().map(|e| e.bus.get()).collect();
        assert_eq!(buses, [10, 11, 12]);
    }

    #[test]
    fn single_stop_route_has_no_edges() {
        let graph = AdjacencyMap::build(&[route(1, &[1], &[10, 11])]);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.edges_from(stop_id(1)).is_empty());
    }

    #[test]
    fn route_without_buses_has_no_edges() {
        let graph = AdjacencyMap::build(&[route(1, &[1, 2, 3], &[])]);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.stop_count(), 0);
    }

    #[test]
    fn edges_follow_route_then_bus_order() {
        let graph = AdjacencyMap::build(&[
            route(2, &[1, 3], &[20]),
            route(1, &[1, 2], &[10, 11]),
        ]);

        let out: Vec<_> = graph
            .edges_from(stop_id(1))
            .iter()
            .map(|e| (e.route.get(), e.bus.get()))
            .collect();
        assert_eq!(out, [(2, 20), (1, 10), (1, 11)]);
    }

    #[test]
    fn non_contiguous_orders_iterate_ascending() {
        let route_id = RouteId::new(1).unwrap();
        let r = Route::new(
            route_id,
            "Gappy",
            vec![
                RouteStop::new(stop(3), 90),
                RouteStop::new(stop(1), 5),
                RouteStop::new(stop(2), 40),
            ],
            vec![Bus::new(BusId::new(1).unwrap(), "BUS-1", route_id)],
        );
        let graph = AdjacencyMap::build(&[r]);

        assert_eq!(graph.edges_from(stop_id(1))[0].to, stop_id(2));
        assert_eq!(graph.edges_from(stop_id(2))[0].to, stop_id(3));
    }

    #[test]
    fn labels_recorded() {
        let graph = AdjacencyMap::build(&[route(4, &[1, 2], &[7])]);
        assert_eq!(graph.route_name(RouteId::new(4).unwrap()), Some("R4"));
        assert_eq!(graph.bus_number(BusId::new(7).unwrap()), Some("BUS-7"));
        assert_eq!(graph.bus_number(BusId::new(8).unwrap()), None);
    }
}
