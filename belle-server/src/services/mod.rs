//! Service layer
//!
//! - [`notification`] - customer e-mail dispatch (best effort)
//! - [`expiry`] - periodic expiry sweep of past-dated reservations

pub mod expiry;
pub mod notification;

pub use expiry::ExpirySweeper;
pub use notification::{EmailNotifier, EmailStatus, NotifyError, ReservationNotifier, StatusEmail};
