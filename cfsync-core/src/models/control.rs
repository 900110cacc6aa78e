//! External shape of editor interface controls.

use serde::{Deserialize, Serialize};

/// Binds one field to a presentation widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub field_id: String,
    pub widget_id: String,
    pub widget_namespace: String,
    /// Widget settings. At most one entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<Settings>>,
}

/// Widget settings block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default = "default_true")]
    pub bulk_editing: bool,
    #[serde(default = "default_true")]
    pub show_link_entity_action: bool,
    #[serde(default = "default_true")]
    pub show_create_entity_action: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            help_text: None,
            bulk_editing: true,
            show_link_entity_action: true,
            show_create_entity_action: true,
        }
    }
}

impl Control {
    pub fn new(
        field_id: impl Into<String>,
        widget_id: impl Into<String>,
        widget_namespace: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            widget_id: widget_id.into(),
            widget_namespace: widget_namespace.into(),
            settings: None,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(vec![settings]);
        self
    }
}

impl Settings {
    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }
}
