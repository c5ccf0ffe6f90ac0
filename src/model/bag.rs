//! The Bag record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::BagStatus;

/// A checked bag as stored and served.
///
/// Wire shape uses camelCase keys; timestamps serialize as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bag {
    /// System-generated identifier, immutable
    pub id: Uuid,
    /// Airline tag, unique across all bags, immutable after creation
    pub tag_number: String,
    pub passenger_name: String,
    pub flight_number: String,
    #[serde(default)]
    pub gate: String,
    #[serde(default)]
    pub belt: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub status: BagStatus,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful mutation; always >= created_at
    pub updated_at: DateTime<Utc>,
}
