//! Database Module
//!
//! Embedded SurrealDB storage: connection setup and schema definition.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "belle";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and define the schema
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!(path = %path.display(), "Database opened (SurrealDB embedded)");
        Ok(Self { db })
    }
}

/// Define tables and indexes. Idempotent; runs on every startup.
///
/// Tables stay schemaless: field shapes are owned by the model structs, and
/// the slot index only accelerates the conflict lookup (uniqueness of active
/// bookings is enforced by the transactional insert, since a partial unique
/// index over `status` is not expressible here).
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "DEFINE TABLE IF NOT EXISTS table_type SCHEMALESS; \
         DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS; \
         DEFINE TABLE IF NOT EXISTS reservation SCHEMALESS; \
         DEFINE TABLE IF NOT EXISTS reservation_menu_item SCHEMALESS; \
         DEFINE INDEX IF NOT EXISTS reservation_slot ON reservation COLUMNS table_type, date; \
         DEFINE INDEX IF NOT EXISTS line_reservation ON reservation_menu_item COLUMNS reservation;",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
    Ok(())
}
