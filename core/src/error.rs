//! Error types for the shop API client.
//!
//! # Design
//! Every failure a client call can hit ends up here: the transport could not
//! reach the backend, the backend answered with a non-2xx status, or a body
//! did not (de)serialize. Callers treat all of them alike and skip whatever
//! depended on the call; the variants only make the log line useful.
//! `InvalidStatus` is the one local validation error and is raised before
//! any request is built.

use thiserror::Error;

use crate::types::OrderStatus;

/// Errors returned by `ShopClient` parse methods and `ShopApi` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS,
    /// broken body stream).
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend returned 404.
    #[error("resource not found")]
    NotFound,

    /// The backend returned a non-2xx status other than 404. `message` is the
    /// backend's `message` field when the body carried one, else the raw body.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// Rejected locally, no request was issued.
    #[error("invalid order status '{value}'; use one of: {valid}", valid = OrderStatus::wire_values().join(", "))]
    InvalidStatus { value: String },
}
