//! 认证中间件
//!
//! 为管理后台接口提供会话校验的 Axum 中间件。
//!
//! # 跳过认证的路径
//!
//! - `OPTIONS *` (CORS 预检)
//! - 非 `/api/` 路径 (健康检查等)
//! - `/api/auth/login` (登录接口)
//! - 公共预订接口: `GET /api/menu`, `GET /api/tables`, `POST /api/reservations`
//!
//! # 错误处理
//!
//! 缺失或无效的 `X-Admin-Token` 返回 401 Unauthorized。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Header carrying the admin session token
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// 会话校验中间件 - 管理接口要求有效的会话令牌
pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let session_valid = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|token| state.sessions.validate(token))
        .unwrap_or(false);

    if session_valid {
        Ok(next.run(req).await)
    } else {
        security_log!("WARN", "admin_token_invalid", uri = format!("{:?}", req.uri()));
        Err(AppError::unauthorized())
    }
}

/// Routes the public site may call without a session.
///
/// Matching is exact: `/api/tables` (availability) is public while
/// `/api/tables/types` (capacity administration) is not.
pub fn is_public_route(method: &Method, path: &str) -> bool {
    if !path.starts_with("/api/") {
        // 非 API 路由跳过认证 (让它们正常返回 404)
        return true;
    }
    if path == "/api/auth/login" {
        return true;
    }
    if *method == Method::GET {
        return path == "/api/menu" || path == "/api/tables";
    }
    if *method == Method::POST {
        return path == "/api/reservations";
    }
    false
}
