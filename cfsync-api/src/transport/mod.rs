//! Transport layer: request/response types, the network seam, and the
//! retrying HTTP client.

pub mod http_client;
pub mod reqwest_transport;
pub mod retry;

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use cfsync_core::errors::TransportError;
use cfsync_core::CancellationToken;

pub use http_client::{HttpClient, HttpClientConfig};
pub use reqwest_transport::ReqwestTransport;
pub use retry::ThreadSleeper;

/// HTTP methods used by the management API endpoints we call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A raw response. Header names are stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Performs one network exchange. No retries, no header policy.
pub trait IHttpTransport: Send + Sync {
    /// Send a request and return whatever the server answered.
    /// Connection-level failures are `TransportError::Network`.
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Blocks the calling thread for a rate-limit backoff.
pub trait IBackoffSleeper: Send + Sync {
    /// Wait for `duration`, returning `TransportError::Cancelled` early if the
    /// token is cancelled meanwhile.
    fn sleep(&self, duration: Duration, cancel: &CancellationToken) -> Result<(), TransportError>;
}
