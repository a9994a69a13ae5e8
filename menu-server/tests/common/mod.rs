// menu-server/tests/common/mod.rs
// 集成测试共用: 内存数据库 + 完整路由

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use menu_server::{BearerTokenAuthorizer, Config, DbService, ServerState, build_app};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";

pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// Router over a seeded in-memory database
    ///
    /// Meals: 1 Lunch (required), 2 Breakfast (required), 3 Happy Hour (optional).
    /// Caterers: 1 Tasty Co, 2 Bento Bros.
    /// Restrictions: 1 Vegetarian, 2 Gluten Free, 3 Vegan.
    pub async fn new() -> Self {
        let pool = DbService::in_memory().await.unwrap().pool;
        for sql in [
            "INSERT INTO meal (id, title, starttime, endtime, required) VALUES (1, 'Lunch', '11:30:00', '13:00:00', 1)",
            "INSERT INTO meal (id, title, starttime, endtime, required) VALUES (2, 'Breakfast', '08:00:00', '09:30:00', 1)",
            "INSERT INTO meal (id, title, starttime, endtime, required) VALUES (3, 'Happy Hour', '16:00:00', '17:00:00', 0)",
            "INSERT INTO caterer (id, title, website) VALUES (1, 'Tasty Co', 'https://tasty.example')",
            "INSERT INTO caterer (id, title, website) VALUES (2, 'Bento Bros', 'https://bento.example')",
            "INSERT INTO restriction (id, title) VALUES (1, 'Vegetarian')",
            "INSERT INTO restriction (id, title) VALUES (2, 'Gluten Free')",
            "INSERT INTO restriction (id, title) VALUES (3, 'Vegan')",
        ] {
            sqlx::query(sql).execute(&pool).await.unwrap();
        }

        let state = ServerState::new(
            Config::for_tests(TOKEN),
            pool.clone(),
            Arc::new(BearerTokenAuthorizer::new(TOKEN)),
        );
        Self {
            app: build_app(&state),
            pool,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Authorized request with an optional JSON body
    pub async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        self.send(request(method, uri, Some(TOKEN), body)).await
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    /// Create a dish and return its id
    pub async fn create_dish(&self, body: Value) -> i64 {
        let res = self.call("PUT", "/api/dish", Some(body)).await;
        assert_eq!(res.status, StatusCode::OK, "create failed: {}", res.body);
        res.body["id"].as_i64().unwrap()
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
