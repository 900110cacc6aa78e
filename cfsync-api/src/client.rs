//! Entry point bundling the HTTP client with the typed services.

use std::sync::Arc;

use cfsync_core::errors::CfsyncResult;
use cfsync_core::{CancellationToken, SyncConfig};

use crate::services::{ContentTypeService, EditorInterfaceService};
use crate::transport::{HttpClient, HttpClientConfig, ReqwestTransport};

/// Management API client scoped to one organization.
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    organization_id: String,
}

impl ApiClient {
    /// Wrap an already-configured HTTP client.
    pub fn new(http: HttpClient, organization_id: impl Into<String>) -> Self {
        Self {
            http,
            organization_id: organization_id.into(),
        }
    }

    /// Build a client talking to the real API over `reqwest`.
    pub fn from_config(config: &SyncConfig, cancel: CancellationToken) -> CfsyncResult<Self> {
        let transport = ReqwestTransport::new(config.api.timeout())?;
        let http = HttpClient::new(HttpClientConfig::from_api_config(&config.api), Arc::new(transport))
            .with_cancellation(cancel);
        tracing::info!(
            base_url = config.api.base_url(),
            organization_id = config.api.organization_id(),
            environment = config.api.environment(),
            "cfsync: api client ready"
        );
        Ok(Self::new(http, config.api.organization_id()))
    }

    pub fn content_types(&self) -> ContentTypeService<'_> {
        ContentTypeService::new(&self.http)
    }

    pub fn editor_interfaces(&self) -> EditorInterfaceService<'_> {
        EditorInterfaceService::new(&self.http)
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }
}
