//! External (flat, list-based) shape of a content type field.
//!
//! This is the representation operators declare and the one persisted between
//! runs. Nested descriptors are modelled as lists bounded to one entry, and
//! validation rules as serialized JSON strings so they stay readable.

use serde::{Deserialize, Serialize};

/// One typed attribute definition within a content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Stable identifier; immutable once the field exists remotely.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Target entity type, only for `Link` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    /// Default value as JSON text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Item descriptor for `Array` fields. At most one entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Items>>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub omitted: bool,
    /// Validation rules, each one a JSON object serialized as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<Vec<String>>,
}

/// Element descriptor of a list-typed field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<Vec<String>>,
}

impl Field {
    /// A field with every optional attribute absent and every flag false.
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type: field_type.into(),
            ..Default::default()
        }
    }

    pub fn with_link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = Some(link_type.into());
        self
    }

    pub fn with_default_value(mut self, json: impl Into<String>) -> Self {
        self.default_value = Some(json.into());
        self
    }

    pub fn with_items(mut self, items: Items) -> Self {
        self.items = Some(vec![items]);
        self
    }

    pub fn with_validation(mut self, json: impl Into<String>) -> Self {
        self.validations.get_or_insert_with(Vec::new).push(json.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn localized(mut self) -> Self {
        self.localized = true;
        self
    }
}

impl Items {
    pub fn new(item_type: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            ..Default::default()
        }
    }

    pub fn with_link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = Some(link_type.into());
        self
    }

    pub fn with_validation(mut self, json: impl Into<String>) -> Self {
        self.validations.get_or_insert_with(Vec::new).push(json.into());
        self
    }
}
