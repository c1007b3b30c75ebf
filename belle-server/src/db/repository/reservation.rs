//! Reservation Repository
//!
//! 预订表及其 pre-order 行的持久化操作。
//!
//! The booking insert runs as a single SurrealQL transaction: the conflict
//! check, the reservation row and every pre-order line commit together or
//! not at all.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    PreOrderRow, Reservation, ReservationCreate, ReservationStatus, SelectedItem,
};
use crate::utils::time::now_millis;

const TABLE: &str = "reservation";
const LINE_TABLE: &str = "reservation_menu_item";

/// Message surfaced to the booking form on a slot conflict
const CONFLICT_MESSAGE: &str = "This table type is already reserved for the selected time";

/// Row content for the booking insert (id assigned by the caller)
#[derive(Debug, Serialize)]
struct ReservationContent {
    created_at: i64,
    date: i64,
    table_type: String,
    name: String,
    email: String,
    phone: Option<String>,
    special_requests: Option<String>,
    status: ReservationStatus,
}

/// Row content for one pre-order line
#[derive(Debug, Serialize)]
struct LineItemContent {
    reservation: RecordId,
    menu_item: RecordId,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
struct ActiveCountRow {
    table_type: String,
    total: i64,
}

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all reservations ordered by reserved slot, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation ORDER BY date ASC")
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing = self.base.parse_id(id, TABLE)?;
        let reservation: Option<Reservation> = self.base.db().select(thing).await?;
        Ok(reservation)
    }

    /// Create a reservation together with its pre-order lines.
    ///
    /// The whole operation is one transaction. An active reservation for the
    /// same `(table_type, date)` aborts with [`RepoError::Duplicate`]; rows
    /// with status `deleted` or `expired` do not block the slot.
    pub async fn create(
        &self,
        data: ReservationCreate,
        items: &[SelectedItem],
    ) -> RepoResult<Reservation> {
        let key = uuid::Uuid::new_v4().simple().to_string();
        let res_id = RecordId::from_table_key(TABLE, key);

        let content = ReservationContent {
            created_at: now_millis(),
            date: data.date,
            table_type: data.table_type.clone(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            special_requests: data.special_requests,
            status: ReservationStatus::Pending,
        };

        let mut sql = String::from(
            "BEGIN TRANSACTION; \
             LET $existing = (SELECT id FROM reservation \
                 WHERE table_type = $table_type AND date = $date \
                 AND status IN ['pending', 'accepted']); \
             IF array::len($existing) > 0 \
                 { THROW 'This table type is already reserved for the selected time'; }; \
             CREATE $res_id CONTENT $data; ",
        );
        for i in 0..items.len() {
            sql.push_str(&format!("CREATE {LINE_TABLE} CONTENT $item_{i}; "));
        }
        sql.push_str("COMMIT TRANSACTION;");

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("table_type", data.table_type))
            .bind(("date", data.date))
            .bind(("res_id", res_id.clone()))
            .bind(("data", content));
        for (i, item) in items.iter().enumerate() {
            query = query.bind((
                format!("item_{i}"),
                LineItemContent {
                    reservation: res_id.clone(),
                    menu_item: item.menu_item.clone(),
                    quantity: item.quantity,
                },
            ));
        }

        // THROW may surface either on the call itself or per statement
        let result = match query.await {
            Ok(response) => response.check().map(|_| ()),
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            let msg = err.to_string();
            if msg.contains("already reserved") {
                return Err(RepoError::Duplicate(CONFLICT_MESSAGE.to_string()));
            }
            return Err(RepoError::Database(msg));
        }

        self.find_by_id(&res_id.to_string())
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Write a new status for one reservation.
    ///
    /// Returns the number of rows affected; callers treat zero as a
    /// retryable condition, not as success.
    pub async fn set_status(
        &self,
        id: &RecordId,
        status: ReservationStatus,
    ) -> RepoResult<usize> {
        let updated: Vec<Reservation> = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("status", status))
            .await?
            .take(0)?;
        Ok(updated.len())
    }

    /// Count active (pending/accepted) reservations per table type label
    pub async fn count_active_by_table_type(&self) -> RepoResult<HashMap<String, i64>> {
        let rows: Vec<ActiveCountRow> = self
            .base
            .db()
            .query(
                "SELECT table_type, count() AS total FROM reservation \
                 WHERE status IN ['pending', 'accepted'] GROUP BY table_type",
            )
            .await?
            .take(0)?;
        Ok(rows.into_iter().map(|r| (r.table_type, r.total)).collect())
    }

    /// Bulk-expire past-dated active reservations; returns rows changed.
    ///
    /// Matches only currently pending/accepted rows with `date < now`, so a
    /// repeat run right after a successful sweep matches nothing.
    pub async fn expire_past(&self, now: i64) -> RepoResult<usize> {
        let expired: Vec<Reservation> = self
            .base
            .db()
            .query(
                "UPDATE reservation SET status = 'expired' \
                 WHERE date < $now AND status IN ['pending', 'accepted'] RETURN AFTER",
            )
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(expired.len())
    }

    /// Fetch every pre-order line joined with its menu item's name and price
    pub async fn find_pre_order_rows(&self) -> RepoResult<Vec<PreOrderRow>> {
        let rows: Vec<PreOrderRow> = self
            .base
            .db()
            .query(
                "SELECT reservation, menu_item, quantity, \
                 menu_item.name AS item_name, menu_item.price AS item_price \
                 FROM reservation_menu_item",
            )
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Fetch the pre-order lines of a single reservation
    pub async fn find_pre_order_rows_for(
        &self,
        reservation: &RecordId,
    ) -> RepoResult<Vec<PreOrderRow>> {
        let rows: Vec<PreOrderRow> = self
            .base
            .db()
            .query(
                "SELECT reservation, menu_item, quantity, \
                 menu_item.name AS item_name, menu_item.price AS item_price \
                 FROM reservation_menu_item WHERE reservation = $reservation",
            )
            .bind(("reservation", reservation.clone()))
            .await?
            .take(0)?;
        Ok(rows)
    }
}
