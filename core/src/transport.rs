//! The I/O seam between `ShopApi` and the network.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and hands back the raw
//! `HttpResponse`. Status interpretation stays in `ShopClient::parse_*`, so
//! implementations must return 4xx/5xx responses as data and reserve `Err`
//! for requests that produced no response at all.

use tracing::debug;
use ureq::Agent;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes HTTP requests on behalf of `ShopApi`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// Uses ureq's default timeouts. The agent keeps a connection pool, so one
/// `UreqTransport` should be reused for the whole session.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let result = match request.method {
            HttpMethod::Get => decorate(self.agent.get(&request.url), request).call(),
            HttpMethod::Post => {
                let builder = decorate(self.agent.post(&request.url), request);
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Patch => {
                let builder = decorate(self.agent.patch(&request.url), request);
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Apply the query pairs and headers of `request` to a ureq builder.
fn decorate<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
