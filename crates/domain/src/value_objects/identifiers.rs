//! Backend resource identifiers
//!
//! The rental backend addresses vehicles, trips, bookings and emergency
//! alerts by positive integer keys. Wrapping them keeps a trip id from being
//! passed where a vehicle id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw backend key
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw backend key
            #[must_use]
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| DomainError::InvalidIdentifier {
                        kind: $label,
                        value: s.to_string(),
                    })
            }
        }
    };
}

resource_id!(
    /// Identifier of a rentable vehicle
    VehicleId,
    "vehicle"
);

resource_id!(
    /// Identifier of a trip
    TripId,
    "trip"
);

resource_id!(
    /// Identifier of a confirmed booking
    BookingId,
    "booking"
);

resource_id!(
    /// Identifier of an emergency alert
    AlertId,
    "alert"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids() {
        let id: VehicleId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let err = "abc".parse::<TripId>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid trip id: abc");
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&AlertId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
