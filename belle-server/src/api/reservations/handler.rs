//! Reservation API Handlers
//!
//! 预订接口：公共的创建入口 + 管理后台的列表/详情/状态变更。
//! Handlers parse timestamps and resolve menu item ids; repositories and
//! the booking module do the rest.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::booking::{ReservationView, assemble_views, view_of};
use crate::core::ServerState;
use crate::db::models::{ReservationCreate, ReservationStatus, SelectedItem};
use crate::db::repository::{MenuItemRepository, ReservationRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, time};

/// One pre-order selection in a booking request
#[derive(Debug, Deserialize)]
pub struct SelectedMenuItemRequest {
    pub menu_item_id: String,
    pub quantity: i64,
}

/// Booking form payload
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    /// RFC 3339 timestamp of the reserved slot
    pub date: String,
    pub table_type: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    /// Pre-ordered menu items; zero quantities are treated as removed
    #[serde(default)]
    pub menu_items: Vec<SelectedMenuItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Filter the full list by one status (dashboard tabs)
    pub status: Option<String>,
}

/// Status transition payload
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// POST /api/reservations - 创建预订 (公共)
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<Json<ReservationView>> {
    validate_required_text(&req.date, "date", MAX_NAME_LEN)?;
    validate_required_text(&req.table_type, "table_type", MAX_NAME_LEN)?;
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.special_requests, "special_requests", MAX_NOTE_LEN)?;

    let date = time::parse_rfc3339(&req.date)?;

    // Resolve pre-order selections against the menu before touching the
    // reservation table; an unknown item fails the whole booking.
    let menu_repo = MenuItemRepository::new(state.db.clone());
    let mut items: Vec<SelectedItem> = Vec::new();
    for selection in &req.menu_items {
        if selection.quantity == 0 {
            continue;
        }
        if selection.quantity < 0 {
            return Err(AppError::validation(format!(
                "Invalid quantity for menu item {}",
                selection.menu_item_id
            )));
        }
        let item = menu_repo
            .find_by_id(&selection.menu_item_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Menu item {} not found", selection.menu_item_id))
            })?;
        let menu_item = item
            .id
            .ok_or_else(|| AppError::internal("Stored menu item has no id"))?;
        items.push(SelectedItem {
            menu_item,
            quantity: selection.quantity,
        });
    }

    let repo = ReservationRepository::new(state.db.clone());
    let created = repo
        .create(
            ReservationCreate {
                date,
                table_type: req.table_type,
                name: req.name,
                email: req.email,
                // blank optionals are stored as absent, not as ""
                phone: req.phone.filter(|p| !p.trim().is_empty()),
                special_requests: req.special_requests.filter(|s| !s.trim().is_empty()),
            },
            &items,
        )
        .await?;

    // The booking form does not need the joined lines back
    Ok(Json(view_of(created, Vec::new())))
}

/// GET /api/reservations - 仪表盘预订列表 (管理)
///
/// Always a full scan joined with pre-order lines; the optional `status`
/// query parameter filters in memory, mirroring the dashboard tabs.
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<ReservationView>>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservations = repo.find_all().await?;
    let lines = repo.find_pre_order_rows().await?;

    let mut views = assemble_views(reservations, lines);
    if let Some(raw) = params.status {
        let status: ReservationStatus = raw.parse().map_err(|e: String| AppError::validation(e))?;
        views.retain(|view| view.status == status);
    }

    Ok(Json(views))
}

/// GET /api/reservations/:id - 单个预订详情 (管理)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ReservationView>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;

    let rid = reservation
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Stored reservation has no id"))?;
    let lines = repo.find_pre_order_rows_for(&rid).await?;

    Ok(Json(view_of(reservation, lines)))
}

/// PUT /api/reservations/:id/status - 状态变更 (管理)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<Json<ReservationView>> {
    let status: ReservationStatus = req
        .status
        .parse()
        .map_err(|e: String| AppError::validation(e))?;

    let engine = state.status_engine();
    let updated = engine.update_status(&id, status).await?;

    let repo = ReservationRepository::new(state.db.clone());
    let rid = updated
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Stored reservation has no id"))?;
    let lines = repo.find_pre_order_rows_for(&rid).await?;

    Ok(Json(view_of(updated, lines)))
}
