//! Application layer - Page services and port definitions
//!
//! Defines the ports through which SmartRent talks to the host page and the
//! platform location service, and the services that drive them: the
//! notifier, the geolocator and page initialisation.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, GeolocationError};
pub use ports::*;
pub use services::*;
