//! Status transition engine: state machine enforcement, read-back
//! confirmation and best-effort notification.

mod common;

use std::sync::Arc;

use belle_server::booking::StatusEngine;
use belle_server::db::models::{ReservationCreate, ReservationStatus};
use belle_server::db::repository::ReservationRepository;
use belle_server::services::notification::EmailStatus;
use belle_server::utils::AppError;
use belle_server::utils::time::parse_rfc3339;

async fn seed_reservation(db: &surrealdb::Surreal<surrealdb::engine::local::Db>) -> String {
    let repo = ReservationRepository::new(db.clone());
    let created = repo
        .create(
            ReservationCreate {
                date: parse_rfc3339("2024-03-20T18:00:00Z").unwrap(),
                table_type: "Table for 2".to_string(),
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                phone: None,
                special_requests: None,
            },
            &[],
        )
        .await
        .unwrap();
    created.id.unwrap().to_string()
}

#[tokio::test]
async fn accepting_a_pending_reservation_sends_confirmation() {
    let db = common::memory_db().await;
    let notifier = common::recording_notifier();
    let engine = StatusEngine::new(db.clone(), notifier.clone());
    let id = seed_reservation(&db).await;

    let updated = engine
        .update_status(&id, ReservationStatus::Accepted)
        .await
        .unwrap();

    assert_eq!(updated.status, ReservationStatus::Accepted);
    assert_eq!(notifier.sent_count(), 1);
    let email = notifier.last().unwrap();
    assert_eq!(email.status, EmailStatus::Accepted);
    assert_eq!(email.customer_email, "john@example.com");
    assert_eq!(email.table_type, "Table for 2");
}

#[tokio::test]
async fn deleting_sends_a_rejection_email() {
    let db = common::memory_db().await;
    let notifier = common::recording_notifier();
    let engine = StatusEngine::new(db.clone(), notifier.clone());
    let id = seed_reservation(&db).await;

    engine
        .update_status(&id, ReservationStatus::Deleted)
        .await
        .unwrap();

    assert_eq!(notifier.last().unwrap().status, EmailStatus::Rejected);
}

#[tokio::test]
async fn expiring_is_silent() {
    let db = common::memory_db().await;
    let notifier = common::recording_notifier();
    let engine = StatusEngine::new(db.clone(), notifier.clone());
    let id = seed_reservation(&db).await;

    let updated = engine
        .update_status(&id, ReservationStatus::Expired)
        .await
        .unwrap();

    assert_eq!(updated.status, ReservationStatus::Expired);
    assert_eq!(notifier.sent_count(), 0);
}

#[tokio::test]
async fn terminal_states_reject_further_transitions() {
    let db = common::memory_db().await;
    let notifier = common::recording_notifier();
    let engine = StatusEngine::new(db.clone(), notifier.clone());
    let repo = ReservationRepository::new(db.clone());
    let id = seed_reservation(&db).await;

    engine
        .update_status(&id, ReservationStatus::Deleted)
        .await
        .unwrap();
    let mails_after_delete = notifier.sent_count();

    let result = engine.update_status(&id, ReservationStatus::Accepted).await;
    assert!(matches!(result, Err(AppError::BusinessRule(_))));

    // The stored row stays deleted and no extra mail goes out
    let stored = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReservationStatus::Deleted);
    assert_eq!(notifier.sent_count(), mails_after_delete);
}

#[tokio::test]
async fn requesting_the_current_status_is_a_noop() {
    let db = common::memory_db().await;
    let notifier = common::recording_notifier();
    let engine = StatusEngine::new(db.clone(), notifier.clone());
    let id = seed_reservation(&db).await;

    engine
        .update_status(&id, ReservationStatus::Accepted)
        .await
        .unwrap();
    let updated = engine
        .update_status(&id, ReservationStatus::Accepted)
        .await
        .unwrap();

    assert_eq!(updated.status, ReservationStatus::Accepted);
    // Only the first transition notified
    assert_eq!(notifier.sent_count(), 1);
}

#[tokio::test]
async fn notifier_failure_does_not_fail_the_update() {
    let db = common::memory_db().await;
    let engine = StatusEngine::new(db.clone(), Arc::new(common::FailingNotifier));
    let repo = ReservationRepository::new(db.clone());
    let id = seed_reservation(&db).await;

    let updated = engine
        .update_status(&id, ReservationStatus::Accepted)
        .await
        .unwrap();

    assert_eq!(updated.status, ReservationStatus::Accepted);
    let stored = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReservationStatus::Accepted);
}

#[tokio::test]
async fn unknown_reservation_is_not_found() {
    let db = common::memory_db().await;
    let engine = StatusEngine::new(db.clone(), common::recording_notifier());

    let result = engine
        .update_status("reservation:missing", ReservationStatus::Accepted)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
