//! Domain types for the transit network.
//!
//! These types represent validated network data: identifiers are positive,
//! coordinates are in range and route stops are kept in ascending order.
//! Invariants that span several entities (such as a journey's route matching
//! its bus's route) are reported as [`DataInconsistency`] rather than enforced.

mod bus;
mod coordinate;
mod error;
mod ids;
mod journey;
mod route;
mod stop;

pub use bus::{Bus, DEFAULT_CAPACITY};
pub use coordinate::{Coordinate, InvalidCoordinate};
pub use error::DataInconsistency;
pub use ids::{BusId, InvalidId, JourneyId, RouteId, StopId};
pub use journey::{Journey, Telemetry};
pub use route::{Route, RouteStop};
pub use stop::Stop;
