//! HTTP transport for the books API
//!
//! The library client talks to a [`Transport`]; `UreqTransport` is the real
//! one. ureq is blocking, so each request runs on the blocking pool.

use crate::error::{BookshelfError, BookshelfResult};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP method used by the books API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One outgoing API call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Full `Authorization` header value
    pub authorization: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Value of a query parameter, if set
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status code plus body text
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 response with a JSON body
    pub fn json(value: &Value) -> Self {
        Self::new(200, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP round trip.
///
/// Non-2xx statuses are returned as responses, not errors; only failures to
/// complete the exchange are `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> BookshelfResult<ApiResponse>;
}

/// Transport backed by a shared ureq agent
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport; `timeout` bounds each whole request
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
        }
    }

    /// Create a transport from a timeout in seconds (0 = none)
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self::new((secs > 0).then(|| Duration::from_secs(secs)))
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: ApiRequest) -> BookshelfResult<ApiResponse> {
        let agent = self.agent.clone();
        let url = request.url.clone();

        tokio::task::spawn_blocking(move || send_blocking(&agent, &request))
            .await
            .map_err(|e| BookshelfError::Internal(format!("HTTP task for {} failed: {}", url, e)))?
    }
}

fn send_blocking(agent: &ureq::Agent, request: &ApiRequest) -> BookshelfResult<ApiResponse> {
    debug!("{} {}", request.method.as_str(), request.url);

    let result = match request.method {
        Method::Get => prepare(agent.get(&request.url), request).call(),
        Method::Delete => prepare(agent.delete(&request.url), request).call(),
        Method::Post => {
            let payload = payload(request)?;
            prepare(agent.post(&request.url), request)
                .header("Content-Type", "application/json")
                .send(payload)
        }
        Method::Put => {
            let payload = payload(request)?;
            prepare(agent.put(&request.url), request)
                .header("Content-Type", "application/json")
                .send(payload)
        }
    };

    let mut response = result.map_err(|e| BookshelfError::transport(&request.url, e))?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| BookshelfError::transport(&request.url, e))?;

    debug!("{} {} -> {}", request.method.as_str(), request.url, status);
    Ok(ApiResponse { status, body })
}

fn prepare<B>(builder: ureq::RequestBuilder<B>, request: &ApiRequest) -> ureq::RequestBuilder<B> {
    let builder = request
        .query
        .iter()
        .fold(builder, |b, (key, value)| b.query(key, value));

    builder
        .header("Authorization", request.authorization.as_str())
        .header("Accept", "application/json")
}

fn payload(request: &ApiRequest) -> BookshelfResult<String> {
    match &request.body {
        Some(body) => Ok(serde_json::to_string(body)?),
        None => Ok(String::new()),
    }
}
