//! Network model: the read contract the planner consumes, and the
//! in-memory store that implements it.
//!
//! Every query returns an owned snapshot reflecting the latest committed
//! state at call time. The planner never holds on to these across requests.

mod convert;
mod error;
mod snapshot;
mod state;
mod store;

use std::future::Future;

use crate::domain::{Journey, JourneyId, Route, RouteId, Stop, StopId};

pub use convert::ConversionError;
pub use error::NetworkError;
pub use snapshot::{
    BusRecord, JourneyRecord, NetworkSnapshot, RouteRecord, RouteStopRecord, StopRecord,
};
pub use state::{JourneyDefinition, RouteDefinition};
pub use store::InMemoryNetwork;

/// Read access to the transit network.
///
/// This abstraction allows the planner to be tested with fake data.
pub trait NetworkModel: Send + Sync {
    /// Counter that changes whenever the network is written to.
    fn version(&self) -> impl Future<Output = u64> + Send;

    /// All routes with their ordered stops and assigned buses.
    fn list_routes(&self) -> impl Future<Output = Result<Vec<Route>, NetworkError>> + Send;

    fn get_route(&self, id: RouteId) -> impl Future<Output = Result<Route, NetworkError>> + Send;

    fn get_stop(&self, id: StopId) -> impl Future<Output = Result<Stop, NetworkError>> + Send;

    /// A journey with its live telemetry and its route's ordered stops.
    fn get_journey(
        &self,
        id: JourneyId,
    ) -> impl Future<Output = Result<Journey, NetworkError>> + Send;
}
