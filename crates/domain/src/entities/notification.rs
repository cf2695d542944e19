//! Page notification entities

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Severity;

/// A message a caller wants shown on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Text shown to the user
    pub text: String,
    /// Visual severity
    #[serde(default)]
    pub severity: Severity,
}

impl NotificationMessage {
    /// Create a message with an explicit severity
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    /// Create an informational message
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }
}

/// Handle of an element inserted into the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a raw element handle
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw handle
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rendered, dismissible notification element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationElement {
    /// Element handle inside the page
    pub id: ElementId,
    /// The message being displayed
    pub message: NotificationMessage,
}

impl NotificationElement {
    /// Create an element for a message
    #[must_use]
    pub const fn new(id: ElementId, message: NotificationMessage) -> Self {
        Self { id, message }
    }

    /// CSS class list of the alert box
    #[must_use]
    pub fn class_name(&self) -> String {
        format!(
            "alert alert-{} alert-dismissible fade show",
            self.message.severity
        )
    }

    /// HTML markup of the element, with the message text escaped
    #[must_use]
    pub fn render_html(&self) -> String {
        format!(
            r#"<div class="{}" role="alert">{}<button type="button" class="btn-close" data-bs-dismiss="alert"></button></div>"#,
            self.class_name(),
            escape_html(&self.message.text)
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_follows_severity() {
        let el = NotificationElement::new(
            ElementId::new(1),
            NotificationMessage::new("Saved", Severity::Success),
        );
        assert_eq!(
            el.class_name(),
            "alert alert-success alert-dismissible fade show"
        );
    }

    #[test]
    fn render_escapes_markup() {
        let el = NotificationElement::new(
            ElementId::new(2),
            NotificationMessage::info("<script>alert('x')</script>"),
        );
        let html = el.render_html();
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains(r#"data-bs-dismiss="alert""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn message_severity_defaults_to_info() {
        let msg: NotificationMessage = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(msg.severity, Severity::Info);
    }
}
