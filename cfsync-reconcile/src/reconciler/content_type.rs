//! Content type reconciliation.
//!
//! Create is a PUT at version 1 followed by an activation. Update follows an
//! [`UpdatePlan`], threading the version returned by each write into the next
//! one. Removing fields from a protected content type is refused before any
//! request is made.

use cfsync_api::{ApiClient, ContentTypeDocument, Versioned};
use cfsync_core::constants::{CONTENT_TYPE_CREATE_VERSION, MANAGED_DESCRIPTION_MARKER};
use cfsync_core::errors::{CfsyncError, CfsyncResult};
use cfsync_core::{ContentTypeId, Field, ReconcileStatus};

use super::settle;
use crate::normalize::{fields_equivalent, fields_inbound, fields_outbound};
use crate::plan::{UpdatePlan, UpdateStep};
use crate::state::ContentTypeState;

/// Description as sent: the managed marker, then the declared text if any.
pub fn managed_description(description: Option<&str>) -> String {
    format!(
        "{MANAGED_DESCRIPTION_MARKER}{}",
        description.unwrap_or_default()
    )
}

/// Description as observed: the marker removed, empty read as absent.
pub fn strip_managed_marker(description: &str) -> Option<String> {
    let text = description
        .strip_prefix(MANAGED_DESCRIPTION_MARKER)
        .unwrap_or(description);
    (!text.is_empty()).then(|| text.to_string())
}

fn parse_id(state: &ContentTypeState) -> CfsyncResult<ContentTypeId> {
    state
        .id
        .as_deref()
        .unwrap_or_default()
        .parse::<ContentTypeId>()
}

/// Whether `observed` has drifted from `desired`.
///
/// Identity differences count as drift, except an empty desired environment
/// which stands for whatever default the remote resolved. Validations and
/// default values compare as parsed JSON.
pub fn content_type_needs_update(desired: &ContentTypeState, observed: &ContentTypeState) -> bool {
    let same_identity = desired.space_id == observed.space_id
        && desired.content_type_id == observed.content_type_id
        && (desired.env_id.is_empty() || desired.env_id == observed.env_id);
    let desired_description = desired.description.as_deref().filter(|d| !d.is_empty());
    let observed_description = observed.description.as_deref().filter(|d| !d.is_empty());

    !(same_identity
        && desired.name == observed.name
        && desired_description == observed_description
        && desired.display_field == observed.display_field
        && fields_equivalent(&desired.fields, &observed.fields))
}

/// Reconciles one content type at a time over a shared API client.
#[derive(Debug, Clone, Copy)]
pub struct ContentTypeReconciler<'a> {
    client: &'a ApiClient,
}

impl<'a> ContentTypeReconciler<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Request body for `state` carrying `fields`.
    fn document(state: &ContentTypeState, fields: &[Field]) -> CfsyncResult<ContentTypeDocument> {
        Ok(ContentTypeDocument {
            sys: None,
            name: (!state.name.is_empty()).then(|| state.name.clone()),
            description: Some(managed_description(state.description.as_deref())),
            display_field: (!state.display_field.is_empty()).then(|| state.display_field.clone()),
            fields: fields_outbound(fields)?,
        })
    }

    /// Create the content type and activate it.
    pub fn create(&self, state: &mut ContentTypeState) -> CfsyncResult<()> {
        let body = Self::document(state, &state.fields)?;
        let service = self.client.content_types();

        state.status = ReconcileStatus::PendingCreate;
        let result = service.put(
            &state.space_id,
            &state.env_id,
            &state.content_type_id,
            CONTENT_TYPE_CREATE_VERSION,
            &body,
        );
        let created = settle(&mut state.status, result)?;
        state.version = created.version();

        let result = service.activate(
            &state.space_id,
            &state.env_id,
            &state.content_type_id,
            state.version,
        );
        let activated = settle(&mut state.status, result)?;

        state.version = activated.version();
        state.id = Some(state.resource_id().to_string());
        state.status = ReconcileStatus::Active;
        tracing::info!(
            id = state.id.as_deref(),
            version = state.version,
            fields = state.fields.len(),
            "cfsync: content type created"
        );
        Ok(())
    }

    /// Refresh `state` from the remote. A missing content type clears the
    /// identifier and marks the state `Absent` instead of failing.
    pub fn read(&self, state: &mut ContentTypeState) -> CfsyncResult<()> {
        let id = parse_id(state)?;
        let document = match self.client.content_types().read(
            &id.space_id,
            &id.env_id,
            &id.content_type_id,
        ) {
            Ok(document) => document,
            Err(e) if e.is_not_found() => {
                tracing::warn!(id = %id, "cfsync: content type not found, treating as absent");
                state.id = None;
                state.status = ReconcileStatus::Absent;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let fields = fields_inbound(&document.fields);
        state.version = document.version();
        state.name = document.name.unwrap_or_default();
        state.description = document
            .description
            .as_deref()
            .and_then(strip_managed_marker);
        state.display_field = document.display_field.unwrap_or_default();
        state.fields = fields;
        state.space_id = id.space_id;
        state.env_id = id.env_id;
        state.content_type_id = id.content_type_id;
        state.status = ReconcileStatus::Active;
        tracing::debug!(version = state.version, "cfsync: content type read");
        Ok(())
    }

    /// Converge the remote onto `state.fields`, given the field list that was
    /// desired before this change.
    ///
    /// When `state.protected` is set and fields would be removed, `state.fields`
    /// is restored to `previous_fields` and the update fails without touching
    /// the remote.
    pub fn update(&self, state: &mut ContentTypeState, previous_fields: &[Field]) -> CfsyncResult<()> {
        let id = parse_id(state)?;
        let plan = UpdatePlan::build(previous_fields, &state.fields);

        if state.protected && plan.has_deletions() {
            state.fields = previous_fields.to_vec();
            tracing::warn!(
                id = %id,
                deleted = ?plan.deleted_ids(),
                "cfsync: refusing to remove fields from protected content type"
            );
            return Err(CfsyncError::ProtectedFieldRemoval {
                field_ids: plan.deleted_ids().to_vec(),
            });
        }

        // Every payload is built before the first request goes out.
        let omitted_body = if plan.has_deletions() {
            Some(Self::document(state, &plan.omitted_fields(previous_fields))?)
        } else {
            None
        };
        let body = Self::document(state, &state.fields)?;
        let service = self.client.content_types();

        state.status = ReconcileStatus::PendingUpdate;
        for step in plan.steps() {
            let payload = match step {
                UpdateStep::PutOmitted => omitted_body.as_ref(),
                UpdateStep::PutFields => Some(&body),
                UpdateStep::ActivateOmitted | UpdateStep::ActivateFields => None,
            };
            let result = match payload {
                Some(payload) => service.put(
                    &id.space_id,
                    &id.env_id,
                    &id.content_type_id,
                    state.version,
                    payload,
                ),
                None => service.activate(
                    &id.space_id,
                    &id.env_id,
                    &id.content_type_id,
                    state.version,
                ),
            };
            let document = settle(&mut state.status, result)?;
            state.version = document.version();
            tracing::debug!(?step, version = state.version, "cfsync: update step applied");
        }

        state.status = ReconcileStatus::Active;
        tracing::info!(
            id = %id,
            version = state.version,
            deleted = plan.deleted_ids().len(),
            "cfsync: content type updated"
        );
        Ok(())
    }

    /// Content types are never deleted remotely.
    pub fn delete(&self, _state: &mut ContentTypeState) -> CfsyncResult<()> {
        Err(CfsyncError::NotImplemented {
            operation: "delete content type",
        })
    }

    /// Build a state for an existing content type from its identifier.
    /// The result is `Absent` with no identifier if the remote has none.
    pub fn import(&self, id: &str) -> CfsyncResult<ContentTypeState> {
        let parsed: ContentTypeId = id.parse()?;
        let mut state = ContentTypeState {
            id: Some(id.to_string()),
            ..ContentTypeState::new(
                parsed.space_id,
                parsed.env_id,
                parsed.content_type_id,
                "",
            )
        };
        self.read(&mut state)?;
        Ok(state)
    }
}
