//! Network store error types.

use crate::domain::{BusId, JourneyId, RouteId, StopId};

use super::convert::ConversionError;

/// Errors from reading or writing the network model.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetworkError {
    #[error("stop {0} not found")]
    StopNotFound(StopId),

    #[error("route {0} not found")]
    RouteNotFound(RouteId),

    #[error("bus {0} not found")]
    BusNotFound(BusId),

    #[error("journey {0} not found")]
    JourneyNotFound(JourneyId),

    /// Stop codes must be unique network-wide
    #[error("stop code {code:?} is already used by stop {existing}")]
    DuplicateStopCode { code: String, existing: StopId },

    /// A route may visit each stop only once
    #[error("route {route} lists stop {stop} more than once")]
    DuplicateRouteStop { route: RouteId, stop: StopId },

    /// Order values must be unique within a route
    #[error("route {route} has more than one stop at order {order}")]
    DuplicateRouteOrder { route: RouteId, order: u32 },

    /// A journey must run the route its bus is assigned to
    #[error("journey {journey} runs route {journey_route} but bus {bus} serves route {bus_route}")]
    RouteMismatch {
        journey: JourneyId,
        bus: BusId,
        journey_route: RouteId,
        bus_route: RouteId,
    },

    /// Snapshot data failed validation
    #[error("invalid snapshot: {0}")]
    Conversion(#[from] ConversionError),

    /// Failed to read a snapshot file
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Snapshot file is not valid JSON for the expected shape
    #[error("JSON parse error in {path}: {message}")]
    Json { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = NetworkError::JourneyNotFound(JourneyId::new(8).unwrap());
        assert_eq!(err.to_string(), "journey 8 not found");

        let err = NetworkError::DuplicateStopCode {
            code: "RNP".into(),
            existing: StopId::new(2).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "stop code \"RNP\" is already used by stop 2"
        );

        let err = NetworkError::Io {
            path: "network.json".into(),
            message: "No such file or directory".into(),
        };
        assert!(err.to_string().starts_with("failed to read network.json"));
    }
}
