//! Journeys and their live telemetry.

use chrono::{DateTime, Duration, Utc};

use super::{Bus, Coordinate, DataInconsistency, JourneyId, Route};

/// Latest live position report for a journey.
///
/// Every field may be missing: a journey that has not reported yet simply
/// has no telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Telemetry {
    pub position: Option<Coordinate>,

    /// Ground speed in km/h.
    pub speed_kmh: Option<f64>,

    pub last_updated: Option<DateTime<Utc>>,
}

impl Telemetry {
    /// Telemetry with a position and speed reported at `at`.
    pub fn new(position: Coordinate, speed_kmh: Option<f64>, at: DateTime<Utc>) -> Self {
        Self {
            position: Some(position),
            speed_kmh,
            last_updated: Some(at),
        }
    }

    /// The speed, if it is usable for estimating arrival times.
    ///
    /// Missing, zero, negative and non-finite speeds all count as unknown.
    pub fn moving_speed(&self) -> Option<f64> {
        self.speed_kmh.filter(|s| s.is_finite() && *s > 0.0)
    }

    /// Whether the last report is older than `max_age` at `now`.
    ///
    /// Telemetry that was never reported is stale.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match self.last_updated {
            Some(at) => now.signed_duration_since(at) > max_age,
            None => true,
        }
    }
}

/// One run of a bus along a route, starting at a departure time.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    pub id: JourneyId,
    pub bus: Bus,

    /// The route being run, with its stops in ascending order.
    pub route: Route,

    pub departure_time: DateTime<Utc>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub telemetry: Telemetry,
}

impl Journey {
    /// Invariant violations for this journey, including its route's.
    pub fn inconsistencies(&self) -> Vec<DataInconsistency> {
        let mut found = Vec::new();
        if self.bus.route != self.route.id {
            found.push(DataInconsistency::RouteMismatch {
                journey: self.id,
                bus: self.bus.id,
                journey_route: self.route.id,
                bus_route: self.bus.route,
            });
        }
        found.extend(self.route.inconsistencies());
        found
    }
}
