//! Request payload shapes for create and update

use serde::Deserialize;

use super::status::BagStatus;

/// Fields accepted when creating a bag.
///
/// `tag_number`, `passenger_name`, and `flight_number` are required by the
/// store; the rest default. Unknown keys in the payload are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBag {
    #[serde(default)]
    pub tag_number: String,
    #[serde(default)]
    pub passenger_name: String,
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub gate: String,
    #[serde(default)]
    pub belt: String,
    #[serde(default)]
    pub destination: String,
    /// Overrides the Checked In default when supplied
    #[serde(default)]
    pub status: Option<BagStatus>,
}

impl NewBag {
    /// Returns the name of the first missing required field, if any.
    pub fn missing_required(&self) -> Option<&'static str> {
        if self.tag_number.trim().is_empty() {
            Some("tagNumber")
        } else if self.passenger_name.trim().is_empty() {
            Some("passengerName")
        } else if self.flight_number.trim().is_empty() {
            Some("flightNumber")
        } else {
            None
        }
    }
}

/// Partial update: only supplied keys change.
///
/// Used both for single-field status transitions and multi-field detail
/// edits; the store does not distinguish the two.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagPatch {
    /// Accepted only when identical to the stored value
    pub tag_number: Option<String>,
    pub passenger_name: Option<String>,
    pub flight_number: Option<String>,
    pub gate: Option<String>,
    pub belt: Option<String>,
    pub destination: Option<String>,
    pub status: Option<BagStatus>,
}

impl BagPatch {
    /// Patch that only moves the bag to the given status.
    pub fn status_only(status: BagStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
