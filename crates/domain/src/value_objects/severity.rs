//! Notification severity value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual severity of a page notification
///
/// Each level maps onto an `alert-*` style class of the page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral information
    #[default]
    Info,
    /// A completed action
    Success,
    /// Something the user should look at
    Warning,
    /// A failed action
    Danger,
}

impl Severity {
    /// Style suffix used in the `alert-*` class
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// All severities in ascending order
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Info, Self::Success, Self::Warning, Self::Danger]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "danger" | "error" => Ok(Self::Danger),
            other => Err(format!(
                "Invalid severity: {other}. Use info, success, warning or danger"
            )),
        }
    }
}
