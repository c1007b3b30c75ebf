//! Expiry Sweeper
//!
//! Mass-transitions past-dated pending/accepted reservations to `expired`.
//! Runs once at startup and then on a fixed interval. No customer mail is
//! sent for expiry. Safe to re-run: a sweep only matches rows that are
//! still active and already in the past.

use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio_util::sync::CancellationToken;

use crate::db::repository::ReservationRepository;
use crate::utils::AppError;
use crate::utils::time::now_millis;

#[derive(Clone)]
pub struct ExpirySweeper {
    repo: ReservationRepository,
    interval: Duration,
}

impl ExpirySweeper {
    pub fn new(db: Surreal<Db>, interval: Duration) -> Self {
        Self {
            repo: ReservationRepository::new(db),
            interval,
        }
    }

    /// One sweep pass; returns the number of reservations expired.
    pub async fn sweep_once(&self) -> Result<usize, AppError> {
        let changed = self.repo.expire_past(now_millis()).await?;
        if changed > 0 {
            tracing::info!(count = changed, "Expired past-dated reservations");
        } else {
            tracing::debug!("No reservations to expire");
        }
        Ok(changed)
    }

    /// Periodic loop until shutdown. The startup sweep is registered
    /// separately as a warmup task, so the first interval tick is consumed
    /// without sweeping.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        ticker.tick().await; // interval fires immediately; skip that one

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::debug!("Expiry sweeper stopping");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(err) = self.sweep_once().await {
                        tracing::error!(error = %err, "Expiry sweep failed");
                    }
                }
            }
        }
    }
}
