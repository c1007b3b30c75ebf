//! Expiry sweeper: past-dated active reservations expire, terminal and
//! future rows are untouched, and re-running changes nothing.

mod common;

use std::time::Duration;

use belle_server::db::models::{ReservationCreate, ReservationStatus};
use belle_server::db::repository::ReservationRepository;
use belle_server::services::ExpirySweeper;
use belle_server::utils::time::now_millis;

async fn seed(
    repo: &ReservationRepository,
    table_type: &str,
    date: i64,
    status: ReservationStatus,
) -> String {
    let created = repo
        .create(
            ReservationCreate {
                date,
                table_type: table_type.to_string(),
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: None,
                special_requests: None,
            },
            &[],
        )
        .await
        .unwrap();
    let rid = created.id.unwrap();
    if status != ReservationStatus::Pending {
        repo.set_status(&rid, status).await.unwrap();
    }
    rid.to_string()
}

#[tokio::test]
async fn sweep_expires_only_past_dated_active_rows() {
    let db = common::memory_db().await;
    let repo = ReservationRepository::new(db.clone());
    let sweeper = ExpirySweeper::new(db.clone(), Duration::from_secs(3600));

    let hour = 3_600_000;
    let now = now_millis();
    let past_pending = seed(&repo, "Table for 2", now - 2 * hour, ReservationStatus::Pending).await;
    let past_accepted =
        seed(&repo, "Table for 4", now - 2 * hour, ReservationStatus::Accepted).await;
    let past_deleted = seed(&repo, "Table for 6", now - 2 * hour, ReservationStatus::Deleted).await;
    let future_pending =
        seed(&repo, "Table for 2", now + 2 * hour, ReservationStatus::Pending).await;

    let changed = sweeper.sweep_once().await.unwrap();
    assert_eq!(changed, 2);

    let status_of = |id: String| {
        let repo = repo.clone();
        async move { repo.find_by_id(&id).await.unwrap().unwrap().status }
    };
    assert_eq!(status_of(past_pending).await, ReservationStatus::Expired);
    assert_eq!(status_of(past_accepted).await, ReservationStatus::Expired);
    assert_eq!(status_of(past_deleted).await, ReservationStatus::Deleted);
    assert_eq!(status_of(future_pending).await, ReservationStatus::Pending);
}

#[tokio::test]
async fn repeated_sweeps_are_idempotent() {
    let db = common::memory_db().await;
    let repo = ReservationRepository::new(db.clone());
    let sweeper = ExpirySweeper::new(db.clone(), Duration::from_secs(3600));

    let now = now_millis();
    seed(&repo, "Table for 2", now - 3_600_000, ReservationStatus::Pending).await;
    seed(&repo, "Table for 4", now - 3_600_000, ReservationStatus::Accepted).await;

    assert_eq!(sweeper.sweep_once().await.unwrap(), 2);
    assert_eq!(sweeper.sweep_once().await.unwrap(), 0);

    // No active past-dated reservation remains
    let all = repo.find_all().await.unwrap();
    let stale_active = all
        .iter()
        .filter(|r| r.date < now_millis() && r.status.is_active())
        .count();
    assert_eq!(stale_active, 0);
}

#[tokio::test]
async fn sweep_on_empty_database_is_a_noop() {
    let db = common::memory_db().await;
    let sweeper = ExpirySweeper::new(db, Duration::from_secs(3600));
    assert_eq!(sweeper.sweep_once().await.unwrap(), 0);
}
