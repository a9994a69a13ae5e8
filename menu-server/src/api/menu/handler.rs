//! Menu API Handlers

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use shared::models::MenuSnapshot;
use shared::util::parse_date;

use crate::core::ServerState;
use crate::db::repository::menu;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "withDishes")]
    pub with_dishes: Option<String>,
}

impl MenuQuery {
    fn wants_dishes(&self) -> bool {
        matches!(self.with_dishes.as_deref(), Some("1" | "true"))
    }
}

/// GET /api/menu?from=&to=&withDishes=1 - 周菜单数据
pub async fn get_menu(
    State(state): State<ServerState>,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> AppResult<Json<MenuSnapshot>> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;

    let (Some(from), Some(to)) = (
        query.from.as_deref().filter(|s| !s.is_empty()),
        query.to.as_deref().filter(|s| !s.is_empty()),
    ) else {
        let missing = [("from", &query.from), ("to", &query.to)]
            .into_iter()
            .filter(|(_, v)| v.as_deref().is_none_or(str::is_empty))
            .map(|(name, _)| name);
        return Err(AppError::missing_fields(missing));
    };

    let from = parse_date(from)?;
    let to = parse_date(to)?;
    if from > to {
        return Err(AppError::with_message(
            ErrorCode::InvalidDateRange,
            format!("from ({from}) is after to ({to})"),
        ));
    }

    let snapshot = menu::snapshot(&state.pool, from, to, query.wants_dishes()).await?;
    tracing::debug!(%from, %to, dishes = snapshot.dishes.len(), "Menu snapshot served");
    Ok(Json(snapshot))
}
