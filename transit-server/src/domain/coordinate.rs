//! Geographic coordinates.

use std::fmt;

use geo::{GeodesicDistance, Point};

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
pub struct InvalidCoordinate {
    latitude: f64,
    longitude: f64,
    reason: &'static str,
}

/// A WGS-84 position in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
///
/// # Examples
///
/// ```
/// use transit_server::domain::Coordinate;
///
/// let origin = Coordinate::new(0.0, 0.0).unwrap();
/// let east = Coordinate::new(0.0, 1.0).unwrap();
///
/// // One degree of longitude at the equator is about 111 km
/// let km = origin.distance_km(&east);
/// assert!((km - 111.3).abs() < 0.5);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let invalid = |reason| InvalidCoordinate {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Geodesic distance to another coordinate on the WGS-84 ellipsoid, in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        self.to_point().geodesic_distance(&other.to_point()) / 1000.0
    }

    fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}
