//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// A resource identifier that is not a positive integer
    #[error("Invalid {kind} id: {value}")]
    InvalidIdentifier { kind: &'static str, value: String },

    /// Unknown locale for formatting
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
}
