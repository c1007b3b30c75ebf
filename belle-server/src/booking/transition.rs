//! Reservation status state machine
//!
//! 状态机规则：
//!
//! ```text
//! pending  → accepted | deleted | expired
//! accepted → deleted | expired
//! deleted  → (terminal)
//! expired  → (terminal)
//! ```
//!
//! Requesting the status a reservation already has is a no-op, not an
//! error; any other move out of a terminal state is rejected without
//! touching the row. There is no way back to `pending`.

use thiserror::Error;

use crate::db::models::ReservationStatus;

/// Outcome of a transition check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The write should proceed
    Apply,
    /// Requested status equals the current one; nothing to write
    Noop,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Reservation is {current}; cannot move it to {requested}")]
    Rejected {
        current: ReservationStatus,
        requested: ReservationStatus,
    },
}

/// Check whether `current → requested` is a legal move.
pub fn check_transition(
    current: ReservationStatus,
    requested: ReservationStatus,
) -> Result<Transition, TransitionError> {
    use ReservationStatus::*;

    if current == requested {
        return Ok(Transition::Noop);
    }
    match (current, requested) {
        (Pending, Accepted | Deleted | Expired) => Ok(Transition::Apply),
        (Accepted, Deleted | Expired) => Ok(Transition::Apply),
        _ => Err(TransitionError::Rejected { current, requested }),
    }
}
