//! Live arrival estimates for the stops on a journey's route.
//!
//! Each estimate is the straight-line geodesic distance from the bus's
//! current position to the stop, divided by its current speed. Stops are
//! estimated independently: distance is not accumulated along the route,
//! and stops the bus has already passed are still listed.

use crate::domain::{Journey, StopId};

/// Arrival estimate for one stop.
#[derive(Debug, Clone, PartialEq)]
pub struct StopEta {
    pub stop_id: StopId,
    pub stop_name: String,

    /// Distance from the bus, or `None` when its position is unknown.
    pub distance_km: Option<f64>,

    /// Whole minutes until arrival, or `None` when position or speed is unknown.
    pub eta_minutes: Option<i64>,
}

/// Estimate arrival at every stop on the journey's route.
///
/// Returns one entry per stop in ascending route order, whatever the state
/// of the telemetry.
pub fn compute_etas(journey: &Journey) -> Vec<StopEta> {
    let position = journey.telemetry.position;
    let speed = journey.telemetry.moving_speed();

    journey
        .route
        .stops()
        .iter()
        .map(|rs| {
            let distance_km = position.map(|p| p.distance_km(&rs.stop.coordinate));
            let eta_minutes = distance_km
                .zip(speed)
                .and_then(|(km, kmh)| minutes_at(km, kmh));

            StopEta {
                stop_id: rs.stop.id,
                stop_name: rs.stop.name.clone(),
                distance_km,
                eta_minutes,
            }
        })
        .collect()
}

/// Minutes to cover `km` at `kmh`, rounded half away from zero.
///
/// `None` when the result does not fit in an `i64`, as happens for speeds
/// close to zero.
fn minutes_at(km: f64, kmh: f64) -> Option<i64> {
    let minutes = (km / kmh * 60.0).round();
    (minutes.is_finite() && minutes.abs() < i64::MAX as f64).then_some(minutes as i64)
}
