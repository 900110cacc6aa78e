//! Production transport backed by `reqwest::blocking`.

use std::collections::HashMap;
use std::time::Duration;

use cfsync_core::errors::TransportError;

use super::{ApiRequest, ApiResponse, HttpMethod, IHttpTransport};

/// Convert a string into a `TransportError::Network`.
fn net_err(reason: String) -> TransportError {
    TransportError::Network { reason }
}

/// Blocking HTTP transport. One client, reused for every request.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| net_err(e.to_string()))?;
        Ok(Self { client })
    }
}

impl IHttpTransport for ReqwestTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().map_err(|e| net_err(e.to_string()))?;

        let status = resp.status().as_u16();
        let headers: HashMap<String, String> = resp
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = resp
            .text()
            .map_err(|e| net_err(format!("failed to read response body: {e}")))?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
