//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! the host page and platform services. Adapters in the infrastructure layer
//! implement these ports.

mod location_port;
mod page_port;

pub use location_port::{
    LocationServicePort, Position, PositionCallback, PositionError, PositionErrorCallback,
    PositionErrorCode,
};
#[cfg(test)]
pub use page_port::{MockNotificationContainerPort, MockPageWidgetsPort};
pub use page_port::{NotificationContainerPort, PageWidgetsPort};
