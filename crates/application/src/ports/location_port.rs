//! Platform location service port
//!
//! Mirrors the callback shape of platform geolocation APIs: a query is
//! started with one success and one failure callback, and the platform
//! invokes at most one of them, exactly once.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A position fix reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Horizontal accuracy in meters, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<f64>,
    /// When the fix was taken
    pub timestamp: DateTime<Utc>,
}

/// Why a position query failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionErrorCode {
    /// The user or policy refused access to location
    PermissionDenied,
    /// No fix could be obtained
    PositionUnavailable,
    /// No fix within the platform's time limit
    Timeout,
}

/// A failed position query as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionError {
    /// Failure class
    pub code: PositionErrorCode,
    /// Platform-provided detail
    pub message: String,
}

impl PositionError {
    /// Create a platform error
    pub fn new(code: PositionErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

/// Invoked with the fix on success
pub type PositionCallback = Box<dyn FnOnce(Position) + Send>;

/// Invoked with the failure otherwise
pub type PositionErrorCallback = Box<dyn FnOnce(PositionError) + Send>;

/// Callback-based platform location service
pub trait LocationServicePort: Send + Sync {
    /// Start a single position query
    fn get_current_position(
        &self,
        on_success: PositionCallback,
        on_error: PositionErrorCallback,
    );
}
