//! Test fixture loader and an in-memory management API for integration tests.
//!
//! JSON fixtures live under `test-fixtures/api/`. [`FakeContentful`] stands in
//! for the remote: it stores documents by path, enforces the version header,
//! bumps versions on every write, and records each request it sees.

mod fake_api;

pub use fake_api::{
    content_type_path, editor_interface_path, fake_client, FakeContentful, InstantSleeper,
    RecordedRequest, FAKE_BASE_URL,
};

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfsync_api::{ContentTypeDocument, EditorInterfaceDocument, Versioned};

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn content_type_fixture_decodes_as_document() {
        let doc: ContentTypeDocument = load_fixture("api/content_type.json");
        assert_eq!(doc.version(), 6);
        assert_eq!(doc.fields.len(), 5);
        assert_eq!(doc.display_field.as_deref(), Some("title"));
    }

    #[test]
    fn editor_interface_fixture_decodes_as_document() {
        let doc: EditorInterfaceDocument = load_fixture("api/editor_interface.json");
        assert_eq!(doc.version(), 21);
        assert_eq!(doc.controls.len(), 3);
        assert!(doc.controls[2].settings.is_none());
    }

    #[test]
    fn fake_rejects_other_hosts_as_network_failure() {
        use cfsync_api::{ApiRequest, HttpMethod, IHttpTransport};
        use cfsync_core::errors::TransportError;

        let fake = FakeContentful::new();
        let request = ApiRequest {
            method: HttpMethod::Get,
            url: "https://api.contentful.com/spaces/s".into(),
            headers: Vec::new(),
            body: None,
        };
        let err = fake.send(&request).unwrap_err();
        assert!(matches!(err, TransportError::Network { .. }));
        assert_eq!(fake.request_count(), 0);
    }
}
