//! Content type definitions: read, upsert, activate.

use cfsync_core::errors::CfsyncResult;

use crate::documents::ContentTypeDocument;
use crate::transport::{HttpClient, HttpMethod};

/// Operations on `/spaces/{space}/environments/{env}/content_types/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct ContentTypeService<'a> {
    http: &'a HttpClient,
}

impl<'a> ContentTypeService<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    fn path(&self, space_id: &str, env: &str, id: &str) -> String {
        format!(
            "/spaces/{}/environments/{}/content_types/{}",
            space_id,
            self.http.resolve_env(env),
            id
        )
    }

    /// Fetch the current definition. A missing content type is an
    /// `ApiError::Status` with status 404.
    pub fn read(&self, space_id: &str, env: &str, id: &str) -> CfsyncResult<ContentTypeDocument> {
        self.http.send_json::<_, ()>(
            HttpMethod::Get,
            &self.path(space_id, env, id),
            0,
            None,
            "reading content_type",
        )
    }

    /// Create or replace the definition, expecting the remote to be at `version`.
    pub fn put(
        &self,
        space_id: &str,
        env: &str,
        id: &str,
        version: u64,
        body: &ContentTypeDocument,
    ) -> CfsyncResult<ContentTypeDocument> {
        self.http.send_json(
            HttpMethod::Put,
            &self.path(space_id, env, id),
            version,
            Some(body),
            "updating content_type",
        )
    }

    /// Publish the definition at `version`.
    pub fn activate(
        &self,
        space_id: &str,
        env: &str,
        id: &str,
        version: u64,
    ) -> CfsyncResult<ContentTypeDocument> {
        self.http.send_json::<_, ()>(
            HttpMethod::Put,
            &format!("{}/published", self.path(space_id, env, id)),
            version,
            None,
            "activating content_type",
        )
    }
}
