//! Conversion from snapshot records to domain types.
//!
//! Record-level validation (ids, coordinates) happens here. Cross-entity
//! validation (references, uniqueness) is left to [`NetworkState`] so that
//! snapshot loading and live writes enforce the same rules.

use crate::domain::{
    Bus, BusId, Coordinate, InvalidCoordinate, InvalidId, JourneyId, RouteId, Stop, StopId,
    Telemetry,
};

use super::error::NetworkError;
use super::snapshot::{BusRecord, JourneyRecord, NetworkSnapshot, RouteRecord, StopRecord};
use super::state::{JourneyDefinition, NetworkState, RouteDefinition};

/// Error converting a snapshot record.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    #[error("{entity}: {source}")]
    InvalidCoordinate {
        entity: String,
        source: InvalidCoordinate,
    },
}

pub fn convert_stop(record: &StopRecord) -> Result<Stop, ConversionError> {
    let id = StopId::new(record.id)?;
    let coordinate = Coordinate::new(record.latitude, record.longitude).map_err(|source| {
        ConversionError::InvalidCoordinate {
            entity: format!("stop {id}"),
            source,
        }
    })?;
    Ok(Stop::new(id, &record.name, &record.code, coordinate))
}

pub fn convert_route(record: &RouteRecord) -> Result<RouteDefinition, ConversionError> {
    let stops = record
        .stops
        .iter()
        .map(|rs| Ok((StopId::new(rs.stop_id)?, rs.order)))
        .collect::<Result<Vec<_>, ConversionError>>()?;

    Ok(RouteDefinition {
        id: RouteId::new(record.id)?,
        name: record.name.clone(),
        description: record.description.clone(),
        stops,
    })
}

pub fn convert_bus(record: &BusRecord) -> Result<Bus, ConversionError> {
    Ok(Bus {
        id: BusId::new(record.id)?,
        number: record.number.clone(),
        route: RouteId::new(record.route_id)?,
        capacity: record.capacity,
        is_active: record.is_active,
    })
}

/// Convert a journey record.
///
/// A position is only recorded when both latitude and longitude are present.
pub fn convert_journey(record: &JourneyRecord) -> Result<JourneyDefinition, ConversionError> {
    let id = JourneyId::new(record.id)?;

    let position = match (record.current_latitude, record.current_longitude) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon).map_err(|source| {
            ConversionError::InvalidCoordinate {
                entity: format!("journey {id}"),
                source,
            }
        })?),
        _ => None,
    };

    Ok(JourneyDefinition {
        id,
        bus: BusId::new(record.bus_id)?,
        route: RouteId::new(record.route_id)?,
        departure_time: record.departure_time,
        arrival_time: record.arrival_time,
        telemetry: Telemetry {
            position,
            speed_kmh: record.current_speed,
            last_updated: record.last_updated,
        },
    })
}

/// Build validated network state from a snapshot.
///
/// Entities are inserted in dependency order: stops, routes, buses, journeys.
pub(crate) fn convert_snapshot(snapshot: &NetworkSnapshot) -> Result<NetworkState, NetworkError> {
    let mut state = NetworkState::default();

    for record in &snapshot.stops {
        state.put_stop(convert_stop(record)?)?;
    }
    for record in &snapshot.routes {
        state.put_route(convert_route(record)?)?;
    }
    for record in &snapshot.buses {
        state.put_bus(convert_bus(record)?)?;
    }
    for record in &snapshot.journeys {
        state.put_journey(convert_journey(record)?)?;
    }

    Ok(state)
}
