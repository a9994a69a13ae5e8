//! 授权中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 授权中间件 - 委托给 `ServerState::authorizer`
///
/// CORS 预检 (`OPTIONS`) 直接放行。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 NotAuthenticated |
/// | 无效令牌 | 401 TokenInvalid |
/// | 授权器拒绝 | 授权器返回的状态码 |
pub async fn require_authorization(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if let Err(e) = state.authorizer.authorize(req.headers()).await {
        security_log!(
            "WARN",
            "authorization_denied",
            method = req.method().to_string(),
            uri = req.uri().to_string(),
            reason = e.message.clone()
        );
        return Err(e);
    }

    Ok(next.run(req).await)
}
