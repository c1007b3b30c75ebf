//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active menu items, ordered by category
    pub async fn find_active(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE active = true ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing = self.base.parse_id(id, TABLE)?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if data.price < 0.0 {
            return Err(RepoError::Validation(
                "price must not be negative".to_string(),
            ));
        }

        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            quantity_available: data.quantity_available.unwrap_or(0),
            category: data.category,
            image_url: data.image_url,
            active: true,
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let thing = self.base.parse_id(id, TABLE)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        let price = data.price.unwrap_or(existing.price);
        if price < 0.0 {
            return Err(RepoError::Validation(
                "price must not be negative".to_string(),
            ));
        }

        // 手动构建 UPDATE 语句，保持未提供的字段不变
        let name = data.name.unwrap_or(existing.name);
        let description = data.description.or(existing.description);
        let quantity_available = data
            .quantity_available
            .unwrap_or(existing.quantity_available);
        let category = data.category.unwrap_or(existing.category);
        let image_url = data.image_url.or(existing.image_url);
        let active = data.active.unwrap_or(existing.active);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, description = $description, price = $price, \
                 quantity_available = $quantity_available, category = $category, \
                 image_url = $image_url, active = $active",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("description", description))
            .bind(("price", price))
            .bind(("quantity_available", quantity_available))
            .bind(("category", category))
            .bind(("image_url", image_url))
            .bind(("active", active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }
}
