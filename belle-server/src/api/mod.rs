//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 管理后台登录/注销
//! - [`menu`] - 菜单读取与管理
//! - [`tables`] - 可用性视图与桌型配置
//! - [`reservations`] - 预订创建、列表与状态变更

pub mod auth;
pub mod health;
pub mod menu;
pub mod reservations;
pub mod tables;

use axum::Router;

use crate::core::ServerState;

/// Build the Axum router (without state or middleware)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(auth::router())
        .merge(health::router())
        .merge(menu::router())
        .merge(tables::router())
        .merge(reservations::router())
}
