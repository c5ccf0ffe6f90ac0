//! Bag lifecycle status

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a bag in its linear lifecycle.
///
/// The wire strings ("Checked In", "In Transit") are the dashboard-facing
/// values; no value outside these four is representable, on create or on
/// partial update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BagStatus {
    #[default]
    #[serde(rename = "Checked In")]
    CheckedIn,
    Loaded,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
}

impl BagStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [BagStatus; 4] = [
        BagStatus::CheckedIn,
        BagStatus::Loaded,
        BagStatus::InTransit,
        BagStatus::Delivered,
    ];

    /// Returns the wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BagStatus::CheckedIn => "Checked In",
            BagStatus::Loaded => "Loaded",
            BagStatus::InTransit => "In Transit",
            BagStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for BagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
