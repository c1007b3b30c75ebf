//! Shared test harness: in-memory database and notifier doubles.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

use belle_server::db::define_schema;
use belle_server::db::models::{TableTypeCreate, MenuItemCreate};
use belle_server::db::repository::{MenuItemRepository, TableTypeRepository};
use belle_server::services::notification::{NotifyError, ReservationNotifier, StatusEmail};

/// Fresh in-memory database with the schema applied
pub async fn memory_db() -> Surreal<Db> {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("belle").use_db("test").await.unwrap();
    define_schema(&db).await.unwrap();
    db
}

/// Seed one table type row, returning its id string
pub async fn seed_table_type(db: &Surreal<Db>, size: &str, quantity: i64) -> String {
    let repo = TableTypeRepository::new(db.clone());
    let created = repo
        .create(TableTypeCreate {
            size: size.to_string(),
            quantity,
        })
        .await
        .unwrap();
    created.id.unwrap().to_string()
}

/// Seed one active menu item, returning its id string
pub async fn seed_menu_item(db: &Surreal<Db>, name: &str, price: f64) -> String {
    let repo = MenuItemRepository::new(db.clone());
    let created = repo
        .create(MenuItemCreate {
            name: name.to_string(),
            description: None,
            price,
            quantity_available: Some(50),
            category: "Mains".to_string(),
            image_url: None,
        })
        .await
        .unwrap();
    created.id.unwrap().to_string()
}

/// Notifier double that records every dispatched mail
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<StatusEmail>>,
}

impl RecordingNotifier {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<StatusEmail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ReservationNotifier for RecordingNotifier {
    async fn send_status_email(&self, email: StatusEmail) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Notifier double whose dispatch always fails
pub struct FailingNotifier;

#[async_trait]
impl ReservationNotifier for FailingNotifier {
    async fn send_status_email(&self, _email: StatusEmail) -> Result<(), NotifyError> {
        Err(NotifyError::Request("mail provider unreachable".to_string()))
    }
}

/// Arc-wrapped recording notifier, convenient for engine construction
pub fn recording_notifier() -> Arc<RecordingNotifier> {
    Arc::new(RecordingNotifier::default())
}
