//! Per-resource state snapshots owned by the caller.
//!
//! The caller fills in the desired attributes, hands the snapshot to a
//! reconciler, and persists what comes back. Reconcilers write the observed
//! attributes, `id`, `version` and `status` in place.

use cfsync_core::{ContentTypeId, Control, EditorInterfaceId, Field, ReconcileStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTypeState {
    /// Persisted identifier, `None` until created or when the remote is gone.
    pub id: Option<String>,
    pub space_id: String,
    /// Empty means the configured default environment.
    pub env_id: String,
    pub content_type_id: String,
    pub name: String,
    /// Description without the managed marker.
    pub description: Option<String>,
    pub display_field: String,
    pub fields: Vec<Field>,
    /// Refuse updates that would remove fields. Local only, never sent.
    pub protected: bool,
    pub version: u64,
    pub status: ReconcileStatus,
}

impl ContentTypeState {
    pub fn new(
        space_id: impl Into<String>,
        env_id: impl Into<String>,
        content_type_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            space_id: space_id.into(),
            env_id: env_id.into(),
            content_type_id: content_type_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_display_field(mut self, display_field: impl Into<String>) -> Self {
        self.display_field = display_field.into();
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    pub fn resource_id(&self) -> ContentTypeId {
        ContentTypeId::new(&self.space_id, &self.env_id, &self.content_type_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorInterfaceState {
    pub id: Option<String>,
    pub space_id: String,
    pub env_id: String,
    pub content_type_id: String,
    pub controls: Vec<Control>,
    pub version: u64,
    pub status: ReconcileStatus,
}

impl EditorInterfaceState {
    pub fn new(
        space_id: impl Into<String>,
        env_id: impl Into<String>,
        content_type_id: impl Into<String>,
    ) -> Self {
        Self {
            space_id: space_id.into(),
            env_id: env_id.into(),
            content_type_id: content_type_id.into(),
            ..Default::default()
        }
    }

    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    pub fn resource_id(&self) -> EditorInterfaceId {
        EditorInterfaceId::new(&self.space_id, &self.env_id, &self.content_type_id)
    }
}
