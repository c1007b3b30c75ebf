//! Reservation Model
//!
//! 预订实体及其状态机状态。时间戳统一为 Unix millis (UTC)。

use std::fmt;
use std::str::FromStr;

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Reservation lifecycle status
///
/// `pending` is the only non-terminal state an admin can act on freely;
/// `deleted` and `expired` are terminal. Rows are never physically removed,
/// `deleted` is a status, not a row removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Accepted,
    Deleted,
    Expired,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Deleted => "deleted",
            Self::Expired => "expired",
        }
    }

    /// Whether this reservation still counts against table capacity
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "deleted" => Ok(Self::Deleted),
            "expired" => Ok(Self::Expired),
            other => Err(format!("unknown reservation status: {other}")),
        }
    }
}

/// Reservation entity (预订)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Creation time, Unix millis
    #[serde(default)]
    pub created_at: i64,
    /// Reserved slot, Unix millis
    pub date: i64,
    /// Matches [`super::TableType::size`]
    pub table_type: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    /// Missing status on legacy rows reads as `pending`
    #[serde(default)]
    pub status: ReservationStatus,
}

/// Create reservation payload (repository layer, timestamps already parsed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub date: i64,
    pub table_type: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
}

/// A pre-ordered menu item attached to a booking request
///
/// Zero quantities are stripped before this point; a `SelectedItem`
/// always carries `quantity > 0`.
#[derive(Debug, Clone)]
pub struct SelectedItem {
    pub menu_item: RecordId,
    pub quantity: i64,
}

/// Pre-order line row joined with its menu item's name and price
///
/// `item_name`/`item_price` are `None` when the linked menu item no longer
/// resolves; the view layer substitutes placeholders.
#[derive(Debug, Clone, Deserialize)]
pub struct PreOrderRow {
    #[serde(with = "serde_helpers::record_id")]
    pub reservation: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub item_price: Option<f64>,
}
