//! HTTP request builder and response parser for the shop API.
//!
//! # Design
//! `ShopClient` holds the `base_url` and the session token and nothing else.
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the round-trip in between, which keeps this layer
//! deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    LoginRequest, LoginResponse, OrderList, OrderStatus, ProductList, Record, Statistics,
    StatisticsEnvelope, StatusUpdate, StockUpdate,
};

/// Request builder and response parser for the shop backend.
///
/// The token starts unset. Once [`set_token`](Self::set_token) has been
/// called every request built carries `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct ShopClient {
    base_url: String,
    token: Option<String>,
}

impl ShopClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn build_login(&self, email: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let input = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.json_request(HttpMethod::Post, "/auth/login", &input)
    }

    pub fn build_list_products(&self, category: Option<&str>) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, "/productos");
        if let Some(category) = category {
            req.query.push(("categoria".to_string(), category.to_string()));
        }
        req
    }

    pub fn build_list_orders(&self, status: Option<&str>) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, "/ordenes");
        if let Some(status) = status {
            req.query.push(("estado".to_string(), status.to_string()));
        }
        req
    }

    pub fn build_get_statistics(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/ordenes/admin/estadisticas")
    }

    pub fn build_update_stock(&self, product_id: &str, new_stock: i64) -> Result<HttpRequest, ApiError> {
        let input = StockUpdate { stock: new_stock };
        self.json_request(HttpMethod::Patch, &format!("/productos/{}/stock", urlencoding::encode(product_id)), &input)
    }

    pub fn build_update_order_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> Result<HttpRequest, ApiError> {
        let input = StatusUpdate { estado: new_status };
        self.json_request(HttpMethod::Patch, &format!("/ordenes/{}/estado", urlencoding::encode(order_id)), &input)
    }

    /// Parse a login response. Does not store the token; the caller decides
    /// when the session becomes authenticated.
    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginResponse, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Record>, ApiError> {
        parse_json::<ProductList>(response).map(|list| list.productos)
    }

    pub fn parse_list_orders(&self, response: HttpResponse) -> Result<Vec<Record>, ApiError> {
        parse_json::<OrderList>(response).map(|list| list.ordenes)
    }

    pub fn parse_get_statistics(&self, response: HttpResponse) -> Result<Statistics, ApiError> {
        parse_json::<StatisticsEnvelope>(response).map(|env| env.estadisticas)
    }

    pub fn parse_update_stock(&self, response: HttpResponse) -> Result<Record, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_order_status(&self, response: HttpResponse) -> Result<Record, ApiError> {
        parse_json(response)
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers,
            body: None,
        }
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.request(method, path);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

/// Map non-2xx responses to an error, then deserialize the body.
fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        message: backend_message(&response.body),
    })
}

/// The backend reports failures as `{"success": false, "message": "..."}`.
fn backend_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
