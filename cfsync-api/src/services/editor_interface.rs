//! Editor interface layouts: read and upsert. Layouts have no publish step.

use cfsync_core::errors::CfsyncResult;

use crate::documents::EditorInterfaceDocument;
use crate::transport::{HttpClient, HttpMethod};

/// Operations on `.../content_types/{id}/editor_interface`.
#[derive(Debug, Clone, Copy)]
pub struct EditorInterfaceService<'a> {
    http: &'a HttpClient,
}

impl<'a> EditorInterfaceService<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    fn path(&self, space_id: &str, env: &str, id: &str) -> String {
        format!(
            "/spaces/{}/environments/{}/content_types/{}/editor_interface",
            space_id,
            self.http.resolve_env(env),
            id
        )
    }

    pub fn read(
        &self,
        space_id: &str,
        env: &str,
        id: &str,
    ) -> CfsyncResult<EditorInterfaceDocument> {
        self.http.send_json::<_, ()>(
            HttpMethod::Get,
            &self.path(space_id, env, id),
            0,
            None,
            "reading content_type editor interface",
        )
    }

    pub fn put(
        &self,
        space_id: &str,
        env: &str,
        id: &str,
        version: u64,
        body: &EditorInterfaceDocument,
    ) -> CfsyncResult<EditorInterfaceDocument> {
        self.http.send_json(
            HttpMethod::Put,
            &self.path(space_id, env, id),
            version,
            Some(body),
            "updating content_type editor interface",
        )
    }
}
