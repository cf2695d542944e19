//! Infrastructure layer - Adapters and wiring
//!
//! Implements the application ports for headless use, loads configuration,
//! installs logging and assembles the [`SmartRent`] bundle that page logic
//! and the CLI consume.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod toolkit;

pub use adapters::{HeadlessPage, StaticLocationService};
pub use config::{
    AppConfig, FormatConfig, LocationConfig, LogFormat, LoggingConfig, NotificationsConfig,
};
pub use telemetry::{TelemetryError, init_logging};
pub use toolkit::{SmartRent, ToolkitError};
