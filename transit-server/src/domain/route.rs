//! Routes and their ordered stops.

use super::{Bus, DataInconsistency, RouteId, Stop};

/// A stop's position on a route.
///
/// Orders need not be contiguous; only their relative ordering matters.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop {
    pub stop: Stop,
    pub order: u32,
}

impl RouteStop {
    pub fn new(stop: Stop, order: u32) -> Self {
        Self { stop, order }
    }
}

/// A named sequence of stops together with the buses serving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub description: Option<String>,

    /// Stops in ascending order. Private so the ordering cannot be broken.
    stops: Vec<RouteStop>,

    /// Buses assigned to this route, in the order the network presents them.
    pub buses: Vec<Bus>,
}

impl Route {
    /// Create a route.
    ///
    /// Stops are sorted by ascending `order`. The sort is stable, so stops
    /// sharing an order value keep the order they were given in. Duplicate
    /// orders are not rejected here; see [`Route::inconsistencies`].
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        mut stops: Vec<RouteStop>,
        buses: Vec<Bus>,
    ) -> Self {
        stops.sort_by_key(|rs| rs.order);
        Self {
            id,
            name: name.into(),
            description: None,
            stops,
            buses,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Stops in ascending order.
    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    /// Consecutive stop pairs in travel direction.
    pub fn hops(&self) -> impl Iterator<Item = (&Stop, &Stop)> {
        self.stops.windows(2).map(|w| (&w[0].stop, &w[1].stop))
    }

    /// Invariant violations in this route's stop ordering.
    pub fn inconsistencies(&self) -> Vec<DataInconsistency> {
        // Sorted, so duplicates are adjacent
        let mut found = Vec::new();
        let mut last_reported = None;
        for pair in self.stops.windows(2) {
            let order = pair[0].order;
            if pair[1].order == order && last_reported != Some(order) {
                found.push(DataInconsistency::DuplicateOrder {
                    route: self.id,
                    order,
                });
                last_reported = Some(order);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusId, Coordinate, StopId};

    fn stop(id: u64, name: &str) -> Stop {
        Stop::new(
            StopId::new(id).unwrap(),
            name,
            format!("S{id}"),
            Coordinate::new(0.0, id as f64 / 100.0).unwrap(),
        )
    }

    fn route(stops: Vec<RouteStop>) -> Route {
        Route::new(RouteId::new(1).unwrap(), "Ring Road", stops, vec![])
    }

    #[test]
    fn stops_sorted_by_order() {
        let r = route(vec![
            RouteStop::new(stop(3, "C"), 30),
            RouteStop::new(stop(1, "A"), 1),
            RouteStop::new(stop(2, "B"), 7),
        ]);

        let names: Vec<_> = r.stops().iter().map(|rs| rs.stop.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn hops_follow_order() {
        let r = route(vec![
            RouteStop::new(stop(2, "B"), 2),
            RouteStop::new(stop(1, "A"), 1),
            RouteStop::new(stop(3, "C"), 3),
        ]);

        let hops: Vec<_> = r
            .hops()
            .map(|(a, b)| (a.id.get(), b.id.get()))
            .collect();
        assert_eq!(hops, [(1, 2), (2, 3)]);
    }

    #[test]
    fn single_stop_has_no_hops() {
        let r = route(vec![RouteStop::new(stop(1, "A"), 1)]);
        assert_eq!(r.hops().count(), 0);

        let empty = route(vec![]);
        assert_eq!(empty.hops().count(), 0);
    }

    #[test]
    fn duplicate_orders_keep_input_order() {
        let r = route(vec![
            RouteStop::new(stop(5, "E"), 2),
            RouteStop::new(stop(4, "D"), 2),
            RouteStop::new(stop(1, "A"), 1),
        ]);

        let ids: Vec<_> = r.stops().iter().map(|rs| rs.stop.id.get()).collect();
        assert_eq!(ids, [1, 5, 4]);
    }

    #[test]
    fn reports_duplicate_orders_once() {
        let r = route(vec![
            RouteStop::new(stop(1, "A"), 1),
            RouteStop::new(stop(2, "B"), 2),
            RouteStop::new(stop(3, "C"), 2),
            RouteStop::new(stop(4, "D"), 2),
        ]);

        assert_eq!(
            r.inconsistencies(),
            vec![DataInconsistency::DuplicateOrder {
                route: r.id,
                order: 2
            }]
        );
    }

    #[test]
    fn consistent_route_reports_nothing() {
        let r = route(vec![
            RouteStop::new(stop(1, "A"), 1),
            RouteStop::new(stop(2, "B"), 4),
        ])
        .with_description("north loop");

        assert!(r.inconsistencies().is_empty());
        assert_eq!(r.description.as_deref(), Some("north loop"));
    }

    #[test]
    fn buses_kept_in_given_order() {
        let id = RouteId::new(1).unwrap();
        let buses = vec![
            Bus::new(BusId::new(9).unwrap(), "BA 2 KHA 9", id),
            Bus::new(BusId::new(3).unwrap(), "BA 2 KHA 3", id),
        ];
        let r = Route::new(id, "Ring Road", vec![], buses);
        let ids: Vec<_> = r.buses.iter().map(|b| b.id.get()).collect();
        assert_eq!(ids, [9, 3]);
    }
}
