//! Application services
//!
//! Services drive the page and platform ports on behalf of page scripts.

pub mod geolocator;
pub mod notifier;
pub mod page_init;

pub use geolocator::Geolocator;
pub use notifier::{DEFAULT_DISMISS_AFTER_MS, Notifier, NotifierConfig};
pub use page_init::{PageInitReport, PageInitializer};
