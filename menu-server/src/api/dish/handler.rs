//! Dish API Handlers
//!
//! Extractor rejections are turned into [`AppError`] so every failure
//! carries the same JSON envelope.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use shared::models::{DeleteDishes, Dish, DishId, DishListQuery, DishPayload};

use crate::core::ServerState;
use crate::db::repository::{RepoError, dish};
use crate::utils::validation::{validate_dish, validate_dish_update};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/dish?offset=&items= - 分页获取菜品
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<DishListQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Dish>>> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;

    let offset = query.offset.unwrap_or(0);
    if offset < 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "offset must not be negative",
        )
        .with_detail("field", "offset"));
    }
    if query.items.is_some_and(|items| items < 0) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "items must not be negative",
        )
        .with_detail("field", "items"));
    }
    let limit = state.config.page_size(query.items);

    let dishes = dish::find_page(&state.pool, offset, limit).await?;
    Ok(Json(dishes))
}

/// PUT /api/dish - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<DishPayload>, JsonRejection>,
) -> AppResult<Json<DishId>> {
    let Json(payload) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let data = validate_dish(payload)?;

    let id = dish::create(&state.pool, &data).await?;
    tracing::info!(
        dish_id = id,
        served_on = %data.served_on,
        restrictions = data.restrictions.len(),
        "Dish created"
    );
    Ok(Json(DishId { id }))
}

/// POST /api/dish/{id} - 更新菜品 (限制项整体替换)
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DishPayload>, JsonRejection>,
) -> AppResult<Json<DishId>> {
    let Path(id) = id.map_err(|e| AppError::validation(e.body_text()))?;
    let Json(payload) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let data = validate_dish_update(id, payload)?;

    dish::update(&state.pool, id, &data)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::DishNotFound, msg),
            other => other.into(),
        })?;
    tracing::info!(dish_id = id, "Dish updated");
    Ok(Json(DishId { id }))
}

/// DELETE /api/dish - 批量删除，原样返回 id 列表
pub async fn delete_many(
    State(state): State<ServerState>,
    body: Result<Json<DeleteDishes>, JsonRejection>,
) -> AppResult<Json<Vec<i64>>> {
    let Json(DeleteDishes { ids }) = body.map_err(|e| AppError::validation(e.body_text()))?;

    let removed = dish::delete_many(&state.pool, &ids).await?;
    tracing::info!(requested = ids.len(), removed, "Dishes deleted");
    Ok(Json(ids))
}

/// DELETE /api/dish/{id} - 删除单个菜品 (不存在时同样返回成功)
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<DishId>> {
    let Path(id) = id.map_err(|e| AppError::validation(e.body_text()))?;

    let existed = dish::delete(&state.pool, id).await?;
    if existed {
        tracing::info!(dish_id = id, "Dish deleted");
    } else {
        tracing::debug!(dish_id = id, "Delete of absent dish");
    }
    Ok(Json(DishId { id }))
}
