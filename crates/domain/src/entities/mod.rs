//! Entities - Objects with identity inside a page session

mod notification;

pub use notification::{ElementId, NotificationElement, NotificationMessage};
