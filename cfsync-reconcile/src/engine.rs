//! SyncEngine: owns the API client and converges desired states onto the
//! remote, one resource at a time.

use cfsync_api::ApiClient;
use cfsync_core::errors::CfsyncResult;
use cfsync_core::{Cancellable, CancellationToken, ReconcileStatus, SyncConfig};

use crate::reconciler::{
    content_type_needs_update, editor_interface_needs_update, ContentTypeReconciler,
    EditorInterfaceReconciler,
};
use crate::state::{ContentTypeState, EditorInterfaceState};

/// What a converge call did to the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergeOutcome {
    /// The resource did not exist (or had vanished) and was created.
    Created,
    /// The resource drifted and was updated.
    Updated,
    /// The remote already matched; nothing was written.
    Unchanged,
}

#[derive(Debug)]
pub struct SyncEngine {
    client: ApiClient,
}

impl SyncEngine {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Engine over the real API. `cancel` stops in-flight retry loops.
    pub fn from_config(config: &SyncConfig, cancel: CancellationToken) -> CfsyncResult<Self> {
        Ok(Self::new(ApiClient::from_config(config, cancel)?))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn content_types(&self) -> ContentTypeReconciler<'_> {
        ContentTypeReconciler::new(&self.client)
    }

    pub fn editor_interfaces(&self) -> EditorInterfaceReconciler<'_> {
        EditorInterfaceReconciler::new(&self.client)
    }

    /// Stop issuing requests. Sequences already under way fail with a
    /// cancellation error and keep their pending status.
    pub fn cancel(&self) {
        self.client.http().cancellation().cancel();
    }

    /// Bring the remote content type in line with `desired`.
    ///
    /// The remote fields as read act as the previous field list, so removing
    /// a field that still exists remotely goes through the omit phase and,
    /// for protected content types, is refused.
    pub fn converge_content_type(
        &self,
        desired: &mut ContentTypeState,
    ) -> CfsyncResult<ConvergeOutcome> {
        let reconciler = self.content_types();
        if desired.id.is_none() {
            reconciler.create(desired)?;
            return Ok(ConvergeOutcome::Created);
        }

        let mut observed = desired.clone();
        reconciler.read(&mut observed)?;
        if observed.id.is_none() {
            tracing::info!(
                content_type = %desired.content_type_id,
                "cfsync: content type vanished remotely, recreating"
            );
            desired.id = None;
            reconciler.create(desired)?;
            return Ok(ConvergeOutcome::Created);
        }

        desired.version = observed.version;
        if !content_type_needs_update(desired, &observed) {
            desired.status = ReconcileStatus::Active;
            return Ok(ConvergeOutcome::Unchanged);
        }
        reconciler.update(desired, &observed.fields)?;
        Ok(ConvergeOutcome::Updated)
    }

    /// Bring the remote editor interface in line with `desired`.
    pub fn converge_editor_interface(
        &self,
        desired: &mut EditorInterfaceState,
    ) -> CfsyncResult<ConvergeOutcome> {
        let reconciler = self.editor_interfaces();
        if desired.id.is_none() {
            reconciler.create(desired)?;
            return Ok(ConvergeOutcome::Created);
        }

        let mut observed = desired.clone();
        reconciler.read(&mut observed)?;
        if observed.id.is_none() {
            desired.id = None;
            reconciler.create(desired)?;
            return Ok(ConvergeOutcome::Created);
        }

        desired.version = observed.version;
        if !editor_interface_needs_update(desired, &observed) {
            desired.status = ReconcileStatus::Active;
            return Ok(ConvergeOutcome::Unchanged);
        }
        reconciler.update(desired)?;
        Ok(ConvergeOutcome::Updated)
    }
}
