//! Data inconsistencies in the network model.
//!
//! These are not failures: the planner reports them and carries on with a
//! best-effort interpretation of the data.

use super::{BusId, JourneyId, RouteId};

/// A violated network invariant detected at query time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataInconsistency {
    /// Two stops on the same route share an order value
    #[error("route {route} has more than one stop at order {order}")]
    DuplicateOrder { route: RouteId, order: u32 },

    /// A journey runs on a different route from the one its bus is assigned to
    #[error("journey {journey} runs route {journey_route} but bus {bus} is assigned to route {bus_route}")]
    RouteMismatch {
        journey: JourneyId,
        bus: BusId,
        journey_route: RouteId,
        bus_route: RouteId,
    },
}
