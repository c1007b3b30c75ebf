//! Status Transition Engine
//!
//! Applies an admin-requested status change to a reservation and notifies
//! the customer. The write path treats "zero rows affected" as retryable:
//! every attempt is followed by a read-back, and success is only declared
//! once the store confirms the new status. E-mail dispatch failures never
//! revert a confirmed transition.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::booking::transition::{Transition, check_transition};
use crate::db::models::{Reservation, ReservationStatus};
use crate::db::repository::ReservationRepository;
use crate::services::notification::{EmailStatus, ReservationNotifier, StatusEmail};
use crate::utils::{AppError, AppResult};

/// Surfaced when both write attempts left the stored status unchanged
pub const UPDATE_FAILED_MESSAGE: &str =
    "Failed to update reservation status - no records were affected";

/// Write attempts before giving up (initial write + one retry)
const MAX_WRITE_ATTEMPTS: u32 = 2;

pub struct StatusEngine {
    repo: ReservationRepository,
    notifier: Arc<dyn ReservationNotifier>,
}

impl StatusEngine {
    pub fn new(db: Surreal<Db>, notifier: Arc<dyn ReservationNotifier>) -> Self {
        Self {
            repo: ReservationRepository::new(db),
            notifier,
        }
    }

    /// Transition a reservation to `requested`.
    ///
    /// Returns the stored reservation after the change. A request for the
    /// status the row already has returns it unchanged without writing and
    /// without sending mail.
    pub async fn update_status(
        &self,
        id: &str,
        requested: ReservationStatus,
    ) -> AppResult<Reservation> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;

        match check_transition(current.status, requested) {
            Ok(Transition::Apply) => {}
            Ok(Transition::Noop) => {
                tracing::debug!(reservation = %id, status = %requested, "Status already set; nothing to do");
                return Ok(current);
            }
            Err(err) => return Err(AppError::business_rule(err.to_string())),
        }

        let rid = current
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Stored reservation has no id"))?;

        // Write, read back, and only believe the read-back. A write that
        // reports zero affected rows gets one retry before we give up.
        let mut confirmed: Option<Reservation> = None;
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let affected = self.repo.set_status(&rid, requested).await?;
            if affected == 0 {
                tracing::warn!(
                    reservation = %rid,
                    attempt,
                    "Status update affected no rows; verifying stored state"
                );
            }

            let stored = self
                .repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;
            if stored.status == requested {
                confirmed = Some(stored);
                break;
            }
        }

        let updated = confirmed.ok_or_else(|| AppError::business_rule(UPDATE_FAILED_MESSAGE))?;
        tracing::info!(reservation = %rid, from = %current.status, to = %requested, "Reservation status updated");

        // Customer mail for accept/reject decisions only; expiry is silent.
        // A failed dispatch is logged and swallowed - the transition stands.
        if let Some(email_status) = email_status_for(requested) {
            let email = StatusEmail {
                customer_email: updated.email.clone(),
                customer_name: updated.name.clone(),
                date: updated.date,
                table_type: updated.table_type.clone(),
                status: email_status,
            };
            if let Err(err) = self.notifier.send_status_email(email).await {
                tracing::warn!(
                    reservation = %rid,
                    error = %err,
                    "Email dispatch failed but the status update was successful"
                );
            }
        }

        Ok(updated)
    }
}

/// Which customer mail, if any, a confirmed transition triggers
fn email_status_for(status: ReservationStatus) -> Option<EmailStatus> {
    match status {
        ReservationStatus::Accepted => Some(EmailStatus::Accepted),
        ReservationStatus::Deleted => Some(EmailStatus::Rejected),
        ReservationStatus::Pending | ReservationStatus::Expired => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_accept_and_delete_notify() {
        assert_eq!(
            email_status_for(ReservationStatus::Accepted),
            Some(EmailStatus::Accepted)
        );
        assert_eq!(
            email_status_for(ReservationStatus::Deleted),
            Some(EmailStatus::Rejected)
        );
        assert_eq!(email_status_for(ReservationStatus::Expired), None);
        assert_eq!(email_status_for(ReservationStatus::Pending), None);
    }
}
