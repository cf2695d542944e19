//! Logging infrastructure
//!
//! Installs a `tracing` subscriber writing to stderr, either as readable
//! text or as JSON lines.

mod subscriber;

pub use subscriber::{TelemetryError, build_filter, init_logging};
