//! Session-holding client that performs the actual round-trips.
//!
//! `ShopApi` pairs a `ShopClient` (request building, session token) with a
//! `Transport`. Every operation logs its own failure and hands it back as
//! `Err`; callers that only want the data substitute a default and move on.

use tracing::{error, info};

use crate::client::ShopClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{LoginResponse, OrderStatus, Record, Statistics};

/// Blocking client for the shop backend.
#[derive(Debug)]
pub struct ShopApi<T: Transport = UreqTransport> {
    client: ShopClient,
    transport: T,
}

impl ShopApi<UreqTransport> {
    /// A client talking to `base_url` over a fresh ureq agent.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> ShopApi<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: ShopClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &ShopClient {
        &self.client
    }

    pub fn token(&self) -> Option<&str> {
        self.client.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.token().is_some()
    }

    /// Log in and, on success, attach the returned token to every later
    /// request. On failure the session stays unauthenticated.
    pub fn login(&mut self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let result = self
            .client
            .build_login(email, password)
            .and_then(|req| self.send(&req))
            .and_then(|resp| self.client.parse_login(resp));

        match result {
            Ok(login) => {
                self.client.set_token(login.token.clone());
                info!(user = login.display_name().unwrap_or("-"), "login succeeded");
                Ok(login)
            }
            Err(e) => {
                error!(error = %e, "login failed");
                Err(e)
            }
        }
    }

    pub fn list_products(&self, category: Option<&str>) -> Result<Vec<Record>, ApiError> {
        let req = self.client.build_list_products(category);
        self.send(&req)
            .and_then(|resp| self.client.parse_list_products(resp))
            .inspect(|products| info!(count = products.len(), "products fetched"))
            .inspect_err(|e| error!(error = %e, "failed to fetch products"))
    }

    /// Needs an admin token; the backend enforces it.
    pub fn list_orders(&self, status: Option<&str>) -> Result<Vec<Record>, ApiError> {
        let req = self.client.build_list_orders(status);
        self.send(&req)
            .and_then(|resp| self.client.parse_list_orders(resp))
            .inspect(|orders| info!(count = orders.len(), "orders fetched"))
            .inspect_err(|e| error!(error = %e, "failed to fetch orders"))
    }

    pub fn get_statistics(&self) -> Result<Statistics, ApiError> {
        let req = self.client.build_get_statistics();
        self.send(&req)
            .and_then(|resp| self.client.parse_get_statistics(resp))
            .inspect_err(|e| error!(error = %e, "failed to fetch statistics"))
    }

    pub fn update_stock(&self, product_id: &str, new_stock: i64) -> Result<Record, ApiError> {
        self.client
            .build_update_stock(product_id, new_stock)
            .and_then(|req| self.send(&req))
            .and_then(|resp| self.client.parse_update_stock(resp))
            .inspect(|_| info!(product_id, new_stock, "stock updated"))
            .inspect_err(|e| error!(product_id, error = %e, "failed to update stock"))
    }

    /// `new_status` is validated before any request goes out; see
    /// [`OrderStatus`] for the accepted spellings.
    pub fn update_order_status(&self, order_id: &str, new_status: &str) -> Result<Record, ApiError> {
        let status: OrderStatus = new_status
            .parse()
            .inspect_err(|e| error!("{e}"))?;

        self.client
            .build_update_order_status(order_id, status)
            .and_then(|req| self.send(&req))
            .and_then(|resp| self.client.parse_update_order_status(resp))
            .inspect(|_| info!(order_id, status = %status, "order status updated"))
            .inspect_err(|e| error!(order_id, error = %e, "failed to update order status"))
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request)
    }
}
