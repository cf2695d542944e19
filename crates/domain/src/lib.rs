//! Domain layer for SmartRent
//!
//! Value objects, page notification entities, display formatting and the
//! great-circle distance calculation. No I/O lives here.

pub mod entities;
pub mod errors;
pub mod formatting;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use formatting::{DateLike, Formatter, INVALID_DATE, LocalePreset};
pub use value_objects::*;
