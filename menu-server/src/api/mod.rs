//! HTTP API
//!
//! - `/api/dish` - 菜品增删改查 (需授权)
//! - `/api/menu` - 周菜单数据 (公开)
//! - `/health` - 健康检查 (公开)

pub mod dish;
pub mod health;
pub mod menu;

use std::time::Duration;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id generator (uuid v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no middleware, no state
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        // Dish API - authorization required
        .merge(dish::router(state))
        // Menu API - public
        .merge(menu::router())
        // Health API - public
        .merge(health::router())
}

/// Fully configured application with middleware and state applied
///
/// Used by the HTTP server and by `oneshot` tests.
pub fn build_app(state: &ServerState) -> Router {
    build_router(state)
        // Timeout - 408 when a handler runs too long
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - copied onto the response; must sit inside SetRequestIdLayer
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - generated (or kept from the caller) before anything else runs
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state.clone())
}
