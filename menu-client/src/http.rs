//! HTTP client for the menu server API

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{DeleteDishes, Dish, DishId, DishPayload, HealthStatus, MenuSnapshot};
use shared::util::format_date;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making network requests to the menu server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(method, path).json(body)).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, body = %text, "Request failed");
            return Err(ClientError::from_response(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!("{e} in body of {} bytes", text.len()))
        })
    }

    // ========== Dish API ==========

    /// GET /api/dish
    pub async fn list_dishes(&self, offset: Option<i64>, items: Option<i64>) -> ClientResult<Vec<Dish>> {
        let mut query = Vec::new();
        if let Some(offset) = offset {
            query.push(("offset", offset));
        }
        if let Some(items) = items {
            query.push(("items", items));
        }
        self.send(self.request(Method::GET, "/api/dish").query(&query))
            .await
    }

    /// PUT /api/dish - returns the new id
    pub async fn create_dish(&self, payload: &DishPayload) -> ClientResult<i64> {
        let created: DishId = self.send_json(Method::PUT, "/api/dish", payload).await?;
        Ok(created.id)
    }

    /// POST /api/dish/{id}
    pub async fn update_dish(&self, id: i64, payload: &DishPayload) -> ClientResult<i64> {
        let updated: DishId = self
            .send_json(Method::POST, &format!("/api/dish/{id}"), payload)
            .await?;
        Ok(updated.id)
    }

    /// DELETE /api/dish/{id}
    pub async fn delete_dish(&self, id: i64) -> ClientResult<i64> {
        let deleted: DishId = self
            .send(self.request(Method::DELETE, &format!("/api/dish/{id}")))
            .await?;
        Ok(deleted.id)
    }

    /// DELETE /api/dish with `{ids}` - returns the ids as sent
    pub async fn delete_dishes(&self, ids: &[i64]) -> ClientResult<Vec<i64>> {
        let body = DeleteDishes { ids: ids.to_vec() };
        self.send_json(Method::DELETE, "/api/dish", &body).await
    }

    // ========== Menu API ==========

    /// GET /api/menu
    pub async fn menu(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        with_dishes: bool,
    ) -> ClientResult<MenuSnapshot> {
        let mut query = vec![("from", format_date(from)), ("to", format_date(to))];
        if with_dishes {
            query.push(("withDishes", "1".to_string()));
        }
        self.send(self.request(Method::GET, "/api/menu").query(&query))
            .await
    }

    /// GET /health
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.send(self.request(Method::GET, "/health")).await
    }
}
