//! Buses assigned to routes.

use super::{BusId, RouteId};

/// Seats on a bus when none is specified.
pub const DEFAULT_CAPACITY: u32 = 40;

/// A vehicle that serves exactly one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    pub id: BusId,

    /// Public-facing identifier, e.g. the registration plate.
    pub number: String,

    /// The route this bus is assigned to.
    pub route: RouteId,

    pub capacity: u32,

    pub is_active: bool,
}

impl Bus {
    /// Create an active bus with the default capacity.
    pub fn new(id: BusId, number: impl Into<String>, route: RouteId) -> Self {
        Self {
            id,
            number: number.into(),
            route,
            capacity: DEFAULT_CAPACITY,
            is_active: true,
        }
    }
}
