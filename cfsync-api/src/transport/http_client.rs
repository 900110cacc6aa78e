//! Authenticated HTTP client with the rate-limit retry loop.

use std::fmt;
use std::sync::Arc;

use cfsync_core::config::ApiConfig;
use cfsync_core::constants::{
    self, CONTENT_TYPE_HEADER, CONTENT_TYPE_VALUE, HTTP_TOO_MANY_REQUESTS, MAX_ATTEMPTS,
    NO_VERSION, USER_AGENT_HEADER, VERSION_HEADER,
};
use cfsync_core::errors::{ApiError, CfsyncResult, TransportError};
use cfsync_core::{Cancellable, CancellationToken};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::retry::{self, ThreadSleeper};
use super::{ApiRequest, ApiResponse, HttpMethod, IBackoffSleeper, IHttpTransport};

/// Connection settings for [`HttpClient`].
#[derive(Clone)]
pub struct HttpClientConfig {
    /// Base URL of the management API, without trailing slash.
    pub base_url: String,
    /// Bearer token sent on every request.
    pub token: String,
    /// Environment substituted when a caller passes an empty one.
    pub default_environment: String,
}

impl HttpClientConfig {
    pub fn from_api_config(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url().to_string(),
            token: api.cma_token().to_string(),
            default_environment: api.environment().to_string(),
        }
    }
}

impl fmt::Debug for HttpClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("default_environment", &self.default_environment)
            .finish()
    }
}

/// Builds authenticated requests and executes them through an
/// [`IHttpTransport`], retrying on HTTP 429.
pub struct HttpClient {
    config: HttpClientConfig,
    transport: Arc<dyn IHttpTransport>,
    sleeper: Arc<dyn IBackoffSleeper>,
    cancel: CancellationToken,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig, transport: Arc<dyn IHttpTransport>) -> Self {
        Self {
            config,
            transport,
            sleeper: Arc::new(ThreadSleeper),
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the backoff sleeper (tests use a recording one).
    pub fn with_sleeper(mut self, sleeper: Arc<dyn IBackoffSleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Share a cancellation token with the caller.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// The environment to address: `env` unless empty, else the default.
    pub fn resolve_env<'a>(&'a self, env: &'a str) -> &'a str {
        if env.is_empty() {
            &self.config.default_environment
        } else {
            env
        }
    }

    /// Build a request with auth, content-type, and user-agent headers.
    /// The version header is only set for non-zero versions.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        version: u64,
        body: Option<String>,
    ) -> ApiRequest {
        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.token),
            ),
            (CONTENT_TYPE_HEADER.to_string(), CONTENT_TYPE_VALUE.to_string()),
            (USER_AGENT_HEADER.to_string(), constants::user_agent()),
        ];
        if version != NO_VERSION {
            headers.push((VERSION_HEADER.to_string(), version.to_string()));
        }
        ApiRequest {
            method,
            url: format!("{}{}", self.config.base_url, path),
            headers,
            body,
        }
    }

    /// Execute a request, retrying rate-limited responses.
    ///
    /// At most [`MAX_ATTEMPTS`] attempts are made. The final response is
    /// returned even if it is still a 429. Any other status returns at once;
    /// connection failures propagate without retry. Cancellation is checked
    /// before each attempt and during the backoff wait.
    pub fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        version: u64,
        body: Option<String>,
    ) -> Result<ApiResponse, TransportError> {
        let request = self.build_request(method, path, version, body);
        let span = tracing::debug_span!(
            "api_request",
            request_id = %uuid::Uuid::new_v4(),
            http_method = %method,
            http_path = path,
            version
        );
        let _entered = span.enter();

        let mut attempt = 1;
        loop {
            if self.cancel.is_cancelled() {
                return Err(TransportError::Cancelled);
            }

            let response = self.transport.send(&request)?;

            // A response already received is returned even if cancellation
            // arrived mid-flight: the remote may have applied the write.
            if response.status != HTTP_TOO_MANY_REQUESTS || attempt >= MAX_ATTEMPTS {
                tracing::debug!(status = response.status, attempt, "cfsync: response received");
                return Ok(response);
            }

            let wait = retry::backoff_for(attempt, &response);
            tracing::warn!(
                attempt,
                max_attempts = MAX_ATTEMPTS,
                wait_secs = wait.as_secs(),
                "cfsync: rate limited, backing off"
            );
            self.sleeper.sleep(wait, &self.cancel)?;
            attempt += 1;
        }
    }

    /// Serialize `body`, execute, map error statuses, and decode the JSON
    /// response into `T`. `operation` names the call in error messages.
    pub fn send_json<T, B>(
        &self,
        method: HttpMethod,
        path: &str,
        version: u64,
        body: Option<&B>,
        operation: &str,
    ) -> CfsyncResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Encode {
                operation: operation.to_string(),
                reason: e.to_string(),
            })?;

        let response = self.execute(method, path, version, payload)?;

        if response.is_error() {
            return Err(ApiError::Status {
                status: response.status,
                operation: operation.to_string(),
                body: response.body,
            }
            .into());
        }

        serde_json::from_str(&response.body).map_err(|e| {
            ApiError::Decode {
                operation: operation.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
