//! Editor interface reconciliation.
//!
//! The remote creates a layout together with its content type, so "create"
//! is really the first update, sent at a fixed seed version. Layouts are never
//! activated.

use cfsync_api::{ApiClient, EditorInterfaceDocument, Versioned};
use cfsync_core::constants::EDITOR_INTERFACE_SEED_VERSION;
use cfsync_core::errors::{CfsyncError, CfsyncResult};
use cfsync_core::{EditorInterfaceId, ReconcileStatus};

use super::settle;
use crate::normalize::{controls_equivalent, controls_inbound, controls_outbound};
use crate::state::EditorInterfaceState;

fn parse_id(state: &EditorInterfaceState) -> CfsyncResult<EditorInterfaceId> {
    state
        .id
        .as_deref()
        .unwrap_or_default()
        .parse::<EditorInterfaceId>()
}

pub fn editor_interface_needs_update(
    desired: &EditorInterfaceState,
    observed: &EditorInterfaceState,
) -> bool {
    let same_identity = desired.space_id == observed.space_id
        && desired.content_type_id == observed.content_type_id
        && (desired.env_id.is_empty() || desired.env_id == observed.env_id);
    !(same_identity && controls_equivalent(&desired.controls, &observed.controls))
}

#[derive(Debug, Clone, Copy)]
pub struct EditorInterfaceReconciler<'a> {
    client: &'a ApiClient,
}

impl<'a> EditorInterfaceReconciler<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn document(state: &EditorInterfaceState) -> CfsyncResult<EditorInterfaceDocument> {
        Ok(EditorInterfaceDocument {
            sys: None,
            controls: controls_outbound(&state.controls)?,
        })
    }

    pub fn create(&self, state: &mut EditorInterfaceState) -> CfsyncResult<()> {
        let body = Self::document(state)?;

        state.status = ReconcileStatus::PendingCreate;
        let result = self.client.editor_interfaces().put(
            &state.space_id,
            &state.env_id,
            &state.content_type_id,
            EDITOR_INTERFACE_SEED_VERSION,
            &body,
        );
        let written = settle(&mut state.status, result)?;

        state.version = written.version();
        state.id = Some(state.resource_id().to_string());
        state.status = ReconcileStatus::Active;
        tracing::info!(
            id = state.id.as_deref(),
            version = state.version,
            controls = state.controls.len(),
            "cfsync: editor interface written"
        );
        Ok(())
    }

    /// Refresh `state` from the remote; 404 clears the identifier.
    pub fn read(&self, state: &mut EditorInterfaceState) -> CfsyncResult<()> {
        let id = parse_id(state)?;
        let document = match self.client.editor_interfaces().read(
            &id.space_id,
            &id.env_id,
            &id.content_type_id,
        ) {
            Ok(document) => document,
            Err(e) if e.is_not_found() => {
                tracing::warn!(id = %id, "cfsync: editor interface not found, treating as absent");
                state.id = None;
                state.status = ReconcileStatus::Absent;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        state.version = document.version();
        state.controls = controls_inbound(&document.controls);
        state.space_id = id.space_id;
        state.env_id = id.env_id;
        state.content_type_id = id.content_type_id;
        state.status = ReconcileStatus::Active;
        Ok(())
    }

    /// Single PUT at the recorded version.
    pub fn update(&self, state: &mut EditorInterfaceState) -> CfsyncResult<()> {
        let id = parse_id(state)?;
        let body = Self::document(state)?;

        state.status = ReconcileStatus::PendingUpdate;
        let result = self.client.editor_interfaces().put(
            &id.space_id,
            &id.env_id,
            &id.content_type_id,
            state.version,
            &body,
        );
        let written = settle(&mut state.status, result)?;

        state.version = written.version();
        state.status = ReconcileStatus::Active;
        tracing::info!(id = %id, version = state.version, "cfsync: editor interface updated");
        Ok(())
    }

    pub fn delete(&self, _state: &mut EditorInterfaceState) -> CfsyncResult<()> {
        Err(CfsyncError::NotImplemented {
            operation: "delete editor interface",
        })
    }

    pub fn import(&self, id: &str) -> CfsyncResult<EditorInterfaceState> {
        let parsed: EditorInterfaceId = id.parse()?;
        let mut state = EditorInterfaceState {
            id: Some(id.to_string()),
            ..EditorInterfaceState::new(parsed.space_id, parsed.env_id, parsed.content_type_id)
        };
        self.read(&mut state)?;
        Ok(state)
    }
}
