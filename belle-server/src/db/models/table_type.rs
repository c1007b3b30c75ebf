//! Table Type Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Table type entity (桌型配置)
///
/// A named table size category with a fixed configured capacity.
/// Admin-owned configuration; read-only to the booking flow.
/// Duplicate `size` rows are tolerated and summed at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableType {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Size label, e.g. "Table for 2"
    pub size: String,
    /// Configured capacity (number of physical tables)
    #[serde(default)]
    pub quantity: i64,
}

/// Create table type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableTypeCreate {
    pub size: String,
    pub quantity: i64,
}

/// Update table type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

/// Remaining availability per distinct size, as served to the booking page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAvailability {
    pub size: String,
    /// Configured capacity minus active reservations, floored at zero
    pub quantity: i64,
}
