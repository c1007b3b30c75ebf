//! Table Type Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{TableType, TableTypeCreate, TableTypeUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "table_type";

#[derive(Clone)]
pub struct TableTypeRepository {
    base: BaseRepository,
}

impl TableTypeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all configured table types
    pub async fn find_all(&self) -> RepoResult<Vec<TableType>> {
        let types: Vec<TableType> = self
            .base
            .db()
            .query("SELECT * FROM table_type ORDER BY size")
            .await?
            .take(0)?;
        Ok(types)
    }

    /// Find table type by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TableType>> {
        let thing = self.base.parse_id(id, TABLE)?;
        let table_type: Option<TableType> = self.base.db().select(thing).await?;
        Ok(table_type)
    }

    /// Create a new table type row
    pub async fn create(&self, data: TableTypeCreate) -> RepoResult<TableType> {
        if data.quantity < 0 {
            return Err(RepoError::Validation(
                "quantity must not be negative".to_string(),
            ));
        }

        let table_type = TableType {
            id: None,
            size: data.size,
            quantity: data.quantity,
        };

        let created: Option<TableType> = self.base.db().create(TABLE).content(table_type).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table type".to_string()))
    }

    /// Update a table type row
    pub async fn update(&self, id: &str, data: TableTypeUpdate) -> RepoResult<TableType> {
        let thing = self.base.parse_id(id, TABLE)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table type {} not found", id)))?;

        let size = data.size.unwrap_or(existing.size);
        let quantity = data.quantity.unwrap_or(existing.quantity);
        if quantity < 0 {
            return Err(RepoError::Validation(
                "quantity must not be negative".to_string(),
            ));
        }

        self.base
            .db()
            .query("UPDATE $thing SET size = $size, quantity = $quantity")
            .bind(("thing", thing))
            .bind(("size", size))
            .bind(("quantity", quantity))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table type {} not found", id)))
    }
}
