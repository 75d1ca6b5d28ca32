//! Identifier types for network entities.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id {value:?}: must be a positive integer")]
pub struct InvalidId {
    kind: &'static str,
    value: String,
}

impl InvalidId {
    /// The kind of entity the identifier was meant for (e.g. "stop").
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u64", into = "u64")]
        pub struct $name(NonZeroU64);

        impl $name {
            /// Create an identifier. Zero is rejected.
            pub fn new(value: u64) -> Result<Self, InvalidId> {
                NonZeroU64::new(value).map(Self).ok_or_else(|| InvalidId {
                    kind: $kind,
                    value: value.to_string(),
                })
            }

            /// Returns the raw integer value.
            pub fn get(self) -> u64 {
                self.0.get()
            }
        }

        impl FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let invalid = || InvalidId {
                    kind: $kind,
                    value: s.to_string(),
                };
                let value: u64 = s.trim().parse().map_err(|_| invalid())?;
                Self::new(value).map_err(|_| invalid())
            }
        }

        impl TryFrom<u64> for $name {
            type Error = InvalidId;

            fn try_from(value: u64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.get()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a stop.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_server::domain::StopId;
    ///
    /// let stop = StopId::new(7).unwrap();
    /// assert_eq!(stop.get(), 7);
    ///
    /// // Zero is not a valid identifier
    /// assert!(StopId::new(0).is_err());
    ///
    /// // Parsing accepts decimal strings only
    /// assert_eq!("7".parse::<StopId>().unwrap(), stop);
    /// assert!("-7".parse::<StopId>().is_err());
    /// ```
    StopId,
    "stop"
);

define_id!(
    /// Identifier of a route.
    RouteId,
    "route"
);

define_id!(
    /// Identifier of a bus.
    BusId,
    "bus"
);

define_id!(
    /// Identifier of a journey (one run of a bus along its route).
    JourneyId,
    "journey"
);
