//! Authentication Handlers
//!
//! Handles admin login and logout against the shared dashboard password.

use std::time::Duration;

use axum::{Json, extract::State};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::auth::ADMIN_TOKEN_HEADER;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing probes
const AUTH_FIXED_DELAY_MS: u64 = 200;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/auth/login - 管理后台登录
///
/// Compares the shared password and returns an opaque session token.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Fixed delay before any comparison feedback
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let configured = state.config.admin_password.as_str();
    if configured.is_empty() {
        security_log!("WARN", "admin_login_unconfigured", reason = "ADMIN_PASSWORD not set");
        return Err(AppError::invalid_credentials());
    }

    if req.password != configured {
        security_log!("WARN", "admin_login_failed", reason = "invalid_password");
        return Err(AppError::invalid_credentials());
    }

    let token = state.sessions.issue();
    security_log!("INFO", "admin_session_issued",);
    Ok(Json(LoginResponse { token }))
}

/// POST /api/auth/logout - 注销当前会话
pub async fn logout(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<bool>> {
    let token = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::unauthorized)?;

    let revoked = state.sessions.revoke(token);
    if revoked {
        tracing::info!(target: "security", "Admin session revoked");
    }
    Ok(Json(revoked))
}
