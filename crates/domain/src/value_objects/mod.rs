//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod identifiers;
mod severity;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, calculate_distance};
pub use identifiers::{AlertId, BookingId, TripId, VehicleId};
pub use severity::Severity;
