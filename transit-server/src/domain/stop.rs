//! Stops served by routes.

use super::{Coordinate, StopId};

/// A place where buses pick up and set down passengers.
///
/// `code` is unique across the whole network.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub code: String,
    pub coordinate: Coordinate,
}

impl Stop {
    pub fn new(
        id: StopId,
        name: impl Into<String>,
        code: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
            coordinate,
        }
    }
}
