//! Dish API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_authorization;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/dish", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .put(handler::create)
                .delete(handler::delete_many),
        )
        .route("/{id}", axum::routing::post(handler::update).delete(handler::delete))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_authorization,
        ))
}
