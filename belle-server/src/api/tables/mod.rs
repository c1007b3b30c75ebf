//! Table API 模块
//!
//! `/api/tables` 是公共的可用性视图；`/api/tables/types` 下的
//! 配置管理接口由会话中间件保护。

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::availability))
        .route("/types", get(handler::list_types).post(handler::create_type))
        .route("/types/{id}", put(handler::update_type))
}
