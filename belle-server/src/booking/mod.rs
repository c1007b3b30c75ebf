//! Booking domain logic
//!
//! 预订核心逻辑，与 HTTP 和存储层解耦：
//!
//! - [`availability`] - 桌型剩余容量计算
//! - [`transition`] - 状态机规则
//! - [`engine`] - 状态变更引擎 (写入 + 回读确认 + 通知)
//! - [`view`] - 仪表盘视图组装

pub mod availability;
pub mod engine;
pub mod transition;
pub mod view;

pub use availability::compute_availability;
pub use engine::StatusEngine;
pub use transition::{Transition, TransitionError, check_transition};
pub use view::{PreOrderItem, ReservationView, assemble_views, view_of};
