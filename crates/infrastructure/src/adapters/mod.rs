//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations. The
//! headless ones here stand in for a browser page and device location
//! when SmartRent runs outside one.

mod headless_page;
mod static_location;

pub use headless_page::HeadlessPage;
pub use static_location::StaticLocationService;
