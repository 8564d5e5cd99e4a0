//! DTOs for the shop API.
//!
//! # Design
//! Products and orders stay schema-free: the backend owns their shape and the
//! client only reads a handful of fields, so they are plain JSON objects
//! (`Record`). Request payloads, the login response, the statistics block and
//! the order-status enumeration are typed because the client depends on
//! their exact wire names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A schema-free JSON object as returned by the backend.
pub type Record = Map<String, Value>;

/// Request payload for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login body. Fields other than `token` and `usuario` land in
/// `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario: Option<Record>,
    #[serde(flatten)]
    pub extra: Record,
}

impl LoginResponse {
    /// The logged-in user's name, read from `usuario.nombre` or, for
    /// backends that answer with a `sesion` block, `sesion.nombre`.
    pub fn display_name(&self) -> Option<&str> {
        fn from(record: Option<&Record>) -> Option<&str> {
            record
                .and_then(|r| r.get("nombre"))
                .and_then(Value::as_str)
        }
        from(self.usuario.as_ref())
            .or_else(|| from(self.extra.get("sesion").and_then(Value::as_object)))
    }
}

/// Request payload for `PATCH /productos/{id}/stock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpdate {
    pub stock: i64,
}

/// Request payload for `PATCH /ordenes/{id}/estado`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub estado: OrderStatus,
}

/// Envelope of `GET /productos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ProductList {
    #[serde(default)]
    pub productos: Vec<Record>,
}

/// Envelope of `GET /ordenes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OrderList {
    #[serde(default)]
    pub ordenes: Vec<Record>,
}

/// Envelope of `GET /ordenes/admin/estadisticas`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StatisticsEnvelope {
    #[serde(default)]
    pub estadisticas: Statistics,
}

/// Aggregate sales counters. Missing counters read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "totalOrdenes", default)]
    pub total_orders: u64,
    #[serde(rename = "ordenesPendientes", default)]
    pub pending_orders: u64,
    #[serde(rename = "ordenesEntregadas", default)]
    pub delivered_orders: u64,
    #[serde(rename = "ventasTotales", default)]
    pub total_sales: f64,
    #[serde(rename = "ventasMensuales", default)]
    pub monthly_sales: f64,
    #[serde(flatten)]
    pub extra: Record,
}

/// The order lifecycle states the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pendiente,
    Procesando,
    Enviado,
    Entregado,
    Cancelado,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pendiente,
        OrderStatus::Procesando,
        OrderStatus::Enviado,
        OrderStatus::Entregado,
        OrderStatus::Cancelado,
    ];

    /// The value sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "pendiente",
            OrderStatus::Procesando => "procesando",
            OrderStatus::Enviado => "enviado",
            OrderStatus::Entregado => "entregado",
            OrderStatus::Cancelado => "cancelado",
        }
    }

    pub fn wire_values() -> Vec<&'static str> {
        Self::ALL.iter().map(OrderStatus::as_str).collect()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ApiError;

    /// Accepts the wire values and their English names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" | "pending" => Ok(OrderStatus::Pendiente),
            "procesando" | "processing" => Ok(OrderStatus::Procesando),
            "enviado" | "shipped" => Ok(OrderStatus::Enviado),
            "entregado" | "delivered" => Ok(OrderStatus::Entregado),
            "cancelado" | "cancelled" => Ok(OrderStatus::Cancelado),
            other => Err(ApiError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}
