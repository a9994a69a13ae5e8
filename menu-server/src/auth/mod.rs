//! 授权模块
//!
//! 写接口前的授权检查是可注入的:
//! - [`Authorizer`] - 授权检查 trait
//! - [`BearerTokenAuthorizer`] - 默认实现，校验固定 Bearer token
//! - [`require_authorization`] - 调用 `ServerState` 中授权器的中间件

pub mod middleware;

use async_trait::async_trait;
use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::utils::{AppError, AppResult};

pub use middleware::require_authorization;

/// Decides whether a request may use the gated dish routes.
///
/// Implementations only see the request headers; session lookups or
/// external identity services live behind this trait.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, headers: &HeaderMap) -> AppResult<()>;
}

/// Accepts `Authorization: Bearer <token>` with one configured token
#[derive(Debug, Clone)]
pub struct BearerTokenAuthorizer {
    token: String,
}

impl BearerTokenAuthorizer {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// 从 `Bearer <token>` 头中提取 token
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl Authorizer for BearerTokenAuthorizer {
    async fn authorize(&self, headers: &HeaderMap) -> AppResult<()> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(AppError::not_authenticated)?;

        let token = Self::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

        if token != self.token {
            return Err(AppError::invalid_token("Invalid token"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use shared::error::ErrorCode;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_bearer_token_accepts_matching_token() {
        let auth = BearerTokenAuthorizer::new("secret");
        assert!(auth.authorize(&headers("Bearer secret")).await.is_ok());
    }

    #[tokio::test]
    async fn test_bearer_token_rejections() {
        let auth = BearerTokenAuthorizer::new("secret");

        let err = auth.authorize(&HeaderMap::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let err = auth.authorize(&headers("Basic abc")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);

        let err = auth.authorize(&headers("Bearer wrong")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(
            BearerTokenAuthorizer::extract_from_header("Bearer abc"),
            Some("abc")
        );
        assert_eq!(BearerTokenAuthorizer::extract_from_header("Bearer "), None);
        assert_eq!(BearerTokenAuthorizer::extract_from_header("abc"), None);
    }
}
