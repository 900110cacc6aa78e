use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use cfsync_api::{
    ApiClient, ApiRequest, ApiResponse, HttpClient, HttpClientConfig, HttpMethod,
    IBackoffSleeper, IHttpTransport,
};
use cfsync_core::constants::{EDITOR_INTERFACE_SUFFIX, VERSION_HEADER};
use cfsync_core::errors::TransportError;
use cfsync_core::{Cancellable, CancellationToken};
use serde_json::{json, Value};

/// Base URL the fake answers on.
pub const FAKE_BASE_URL: &str = "http://cfsync.test";

const PUBLISHED_SUFFIX: &str = "/published";

pub fn content_type_path(space: &str, env: &str, id: &str) -> String {
    format!("/spaces/{space}/environments/{env}/content_types/{id}")
}

pub fn editor_interface_path(space: &str, env: &str, id: &str) -> String {
    format!(
        "{}/{EDITOR_INTERFACE_SUFFIX}",
        content_type_path(space, env, id)
    )
}

/// One request as the fake saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub version: Option<u64>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn is_publish(&self) -> bool {
        self.path.ends_with(PUBLISHED_SUFFIX)
    }

    /// Ids of the fields in the body, in order.
    pub fn field_ids(&self) -> Vec<String> {
        self.fields()
            .iter()
            .filter_map(|f| f["id"].as_str().map(str::to_string))
            .collect()
    }

    /// Ids of the fields the body marks as omitted.
    pub fn omitted_ids(&self) -> Vec<String> {
        self.fields()
            .iter()
            .filter(|f| f["omitted"].as_bool() == Some(true))
            .filter_map(|f| f["id"].as_str().map(str::to_string))
            .collect()
    }

    fn fields(&self) -> Vec<Value> {
        self.body
            .as_ref()
            .and_then(|b| b["fields"].as_array().cloned())
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct FakeState {
    documents: HashMap<String, Value>,
    queued: VecDeque<ApiResponse>,
    requests: Vec<RecordedRequest>,
}

/// In-memory stand-in for the management API.
///
/// Writes to an existing document must carry its current version or get a
/// 409. Every successful write (including publish) bumps the version by one.
/// A PUT to a missing document creates it at version 1. Queued responses are
/// served before any of that logic runs.
#[derive(Default)]
pub struct FakeContentful {
    state: Mutex<FakeState>,
}

impl FakeContentful {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Seed a document. Its `sys.version` is kept as given.
    pub fn insert(&self, path: &str, document: Value) {
        self.lock().documents.insert(path.to_string(), document);
    }

    pub fn document(&self, path: &str) -> Option<Value> {
        self.lock().documents.get(path).cloned()
    }

    pub fn version_of(&self, path: &str) -> Option<u64> {
        self.document(path).and_then(|d| d["sys"]["version"].as_u64())
    }

    /// Serve `response` to the next request, ahead of the stored documents.
    pub fn queue_response(&self, response: ApiResponse) {
        self.lock().queued.push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    fn get(state: &FakeState, path: &str) -> ApiResponse {
        match state.documents.get(path) {
            Some(doc) => ApiResponse::new(200, doc.to_string()),
            None => not_found(),
        }
    }

    fn put(state: &mut FakeState, path: &str, version: Option<u64>, body: Option<Value>) -> ApiResponse {
        if let Some(target) = path.strip_suffix(PUBLISHED_SUFFIX) {
            let Some(doc) = state.documents.get_mut(target) else {
                return not_found();
            };
            let current = doc["sys"]["version"].as_u64().unwrap_or(1);
            if version != Some(current) {
                return version_mismatch();
            }
            doc["sys"]["version"] = json!(current + 1);
            doc["sys"]["publishedVersion"] = json!(current);
            return ApiResponse::new(200, doc.to_string());
        }

        let next = match state.documents.get(path) {
            Some(existing) => {
                let current = existing["sys"]["version"].as_u64().unwrap_or(1);
                if version != Some(current) {
                    return version_mismatch();
                }
                current + 1
            }
            None => 1,
        };

        let mut doc = match body {
            Some(Value::Object(map)) => Value::Object(map),
            _ => return ApiResponse::new(400, r#"{"sys":{"id":"BadRequest"}}"#),
        };
        let (id, kind) = match path.strip_suffix(&format!("/{EDITOR_INTERFACE_SUFFIX}")) {
            Some(_) => ("default".to_string(), "EditorInterface"),
            None => (
                path.rsplit('/').next().unwrap_or_default().to_string(),
                "ContentType",
            ),
        };
        doc["sys"] = json!({"id": id, "type": kind, "version": next});
        state.documents.insert(path.to_string(), doc.clone());
        ApiResponse::new(200, doc.to_string())
    }
}

fn not_found() -> ApiResponse {
    ApiResponse::new(404, r#"{"sys":{"type":"Error","id":"NotFound"}}"#)
}

fn version_mismatch() -> ApiResponse {
    ApiResponse::new(409, r#"{"sys":{"type":"Error","id":"VersionMismatch"}}"#)
}

impl IHttpTransport for FakeContentful {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let path = request
            .url
            .strip_prefix(FAKE_BASE_URL)
            .ok_or_else(|| TransportError::Network {
                reason: format!("unknown host in {}", request.url),
            })?
            .to_string();
        let version = request
            .header(VERSION_HEADER)
            .and_then(|v| v.parse::<u64>().ok());
        let body = request
            .body
            .as_deref()
            .and_then(|b| serde_json::from_str::<Value>(b).ok());

        let mut state = self.lock();
        state.requests.push(RecordedRequest {
            method: request.method,
            path: path.clone(),
            version,
            body: body.clone(),
        });

        if let Some(canned) = state.queued.pop_front() {
            return Ok(canned);
        }

        Ok(match request.method {
            HttpMethod::Get => Self::get(&state, &path),
            HttpMethod::Put => Self::put(&mut state, &path, version, body),
        })
    }
}

/// Backoff sleeper that records waits instead of blocking.
#[derive(Default)]
pub struct InstantSleeper {
    waits: Mutex<Vec<Duration>>,
}

impl InstantSleeper {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl IBackoffSleeper for InstantSleeper {
    fn sleep(&self, duration: Duration, cancel: &CancellationToken) -> Result<(), TransportError> {
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        if let Ok(mut waits) = self.waits.lock() {
            waits.push(duration);
        }
        Ok(())
    }
}

/// An [`ApiClient`] wired to `fake` with a non-blocking sleeper.
pub fn fake_client(fake: &Arc<FakeContentful>) -> ApiClient {
    let http = HttpClient::new(
        HttpClientConfig {
            base_url: FAKE_BASE_URL.to_string(),
            token: "test-token".to_string(),
            default_environment: "master".to_string(),
        },
        fake.clone(),
    )
    .with_sleeper(Arc::new(InstantSleeper::default()));
    ApiClient::new(http, "test-org")
}
