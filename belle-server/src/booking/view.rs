//! Reservation view assembly
//!
//! Denormalizes reservations with their pre-order lines into the shape the
//! admin dashboard consumes. Timestamps leave the store as Unix millis and
//! are rendered to RFC 3339 here; money math runs through rust_decimal.

use rust_decimal::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::db::models::{PreOrderRow, Reservation, ReservationStatus};
use crate::utils::time::millis_to_rfc3339;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Placeholder when a pre-order line points at a vanished menu item
const UNKNOWN_ITEM: &str = "Unknown Item";

/// One pre-ordered menu item as shown on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct PreOrderItem {
    /// Menu item id ("menu_item:…")
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// Denormalized reservation with its pre-order lines
#[derive(Debug, Clone, Serialize)]
pub struct ReservationView {
    /// Reservation id ("reservation:…")
    pub id: String,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub date: String,
    pub table_type: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
    pub menu_items: Vec<PreOrderItem>,
    /// Σ price × quantity over `menu_items`, rounded to 2 dp
    pub pre_order_total: f64,
}

/// Build the view of a single reservation from its own pre-order lines.
pub fn view_of(reservation: Reservation, lines: Vec<PreOrderRow>) -> ReservationView {
    let menu_items: Vec<PreOrderItem> = lines
        .into_iter()
        .map(|row| PreOrderItem {
            id: row.menu_item.to_string(),
            name: row.item_name.unwrap_or_else(|| UNKNOWN_ITEM.to_string()),
            price: row.item_price.unwrap_or(0.0),
            quantity: row.quantity,
        })
        .collect();

    let pre_order_total = total_of(&menu_items);

    ReservationView {
        id: reservation
            .id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        created_at: millis_to_rfc3339(reservation.created_at),
        date: millis_to_rfc3339(reservation.date),
        table_type: reservation.table_type,
        name: reservation.name,
        email: reservation.email,
        phone: reservation.phone,
        special_requests: reservation.special_requests,
        status: reservation.status,
        menu_items,
        pre_order_total,
    }
}

/// Assemble the full dashboard list: group all pre-order lines by their
/// reservation and attach them. Reservations keep the reader's ordering.
pub fn assemble_views(
    reservations: Vec<Reservation>,
    lines: Vec<PreOrderRow>,
) -> Vec<ReservationView> {
    let mut by_reservation: HashMap<String, Vec<PreOrderRow>> = HashMap::new();
    for row in lines {
        by_reservation
            .entry(row.reservation.to_string())
            .or_default()
            .push(row);
    }

    reservations
        .into_iter()
        .map(|reservation| {
            let key = reservation
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default();
            let lines = by_reservation.remove(&key).unwrap_or_default();
            view_of(reservation, lines)
        })
        .collect()
}

fn total_of(items: &[PreOrderItem]) -> f64 {
    let total = items
        .iter()
        .map(|item| {
            Decimal::from_f64(item.price).unwrap_or_default() * Decimal::from(item.quantity)
        })
        .sum::<Decimal>();
    total
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}
