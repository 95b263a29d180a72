//! Event categories.
//!
//! A category says how an event affects engagement: whether it may enable
//! control, block it, warn the driver, or force a disengagement. Policy
//! table rows associate alerts with categories and callers query the
//! active set by category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of event categories.
///
/// Wire names are camelCase (`noEntry`, `softDisable`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Request to engage.
    Enable,
    /// Engagement is pending (e.g. waiting for a pedal release).
    PreEnable,
    /// Driver is overriding while engaged.
    Override,
    /// Engagement is not allowed.
    NoEntry,
    /// Informational or attention warning while engaged.
    Warning,
    /// Driver-initiated disengagement.
    UserDisable,
    /// Disengage after a grace period.
    SoftDisable,
    /// Disengage now.
    ImmediateDisable,
    /// Shown in every control state.
    Permanent,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 9] = [
        Category::Enable,
        Category::PreEnable,
        Category::Override,
        Category::NoEntry,
        Category::Warning,
        Category::UserDisable,
        Category::SoftDisable,
        Category::ImmediateDisable,
        Category::Permanent,
    ];

    /// Stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::PreEnable => "preEnable",
            Self::Override => "override",
            Self::NoEntry => "noEntry",
            Self::Warning => "warning",
            Self::UserDisable => "userDisable",
            Self::SoftDisable => "softDisable",
            Self::ImmediateDisable => "immediateDisable",
            Self::Permanent => "permanent",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}
