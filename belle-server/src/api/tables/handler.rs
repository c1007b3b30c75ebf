//! Table Availability / Table Type API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::booking::compute_availability;
use crate::core::ServerState;
use crate::db::models::{TableAvailability, TableType, TableTypeCreate, TableTypeUpdate};
use crate::db::repository::{ReservationRepository, TableTypeRepository};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::AppResult;

/// GET /api/tables - 各桌型剩余容量 (公共)
///
/// Configured capacity per size minus pending/accepted reservations.
pub async fn availability(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<TableAvailability>>> {
    let table_types = TableTypeRepository::new(state.db.clone()).find_all().await?;
    let active_counts = ReservationRepository::new(state.db.clone())
        .count_active_by_table_type()
        .await?;

    Ok(Json(compute_availability(&table_types, &active_counts)))
}

/// GET /api/tables/types - 原始桌型配置行 (管理)
pub async fn list_types(State(state): State<ServerState>) -> AppResult<Json<Vec<TableType>>> {
    let repo = TableTypeRepository::new(state.db.clone());
    let types = repo.find_all().await?;
    Ok(Json(types))
}

/// POST /api/tables/types - 创建桌型 (管理)
pub async fn create_type(
    State(state): State<ServerState>,
    Json(payload): Json<TableTypeCreate>,
) -> AppResult<Json<TableType>> {
    validate_required_text(&payload.size, "size", MAX_NAME_LEN)?;

    let repo = TableTypeRepository::new(state.db.clone());
    let table_type = repo.create(payload).await?;
    Ok(Json(table_type))
}

/// PUT /api/tables/types/:id - 更新桌型 (管理)
pub async fn update_type(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TableTypeUpdate>,
) -> AppResult<Json<TableType>> {
    if let Some(size) = &payload.size {
        validate_required_text(size, "size", MAX_NAME_LEN)?;
    }

    let repo = TableTypeRepository::new(state.db.clone());
    let table_type = repo.update(&id, payload).await?;
    Ok(Json(table_type))
}
