//! Typed API documents: the nested camelCase JSON shape the management API
//! reads and writes.
//!
//! Structurally invalid documents (e.g. `fields` that is not a list, a
//! validation rule that is not an object) fail to decode at the client
//! boundary instead of surfacing deep inside normalization.

use cfsync_core::constants::DEFAULT_DOCUMENT_VERSION;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One validation rule: an arbitrary JSON object.
pub type ValidationRule = Map<String, Value>;

/// System metadata attached by the remote to every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// Documents that carry optimistic-concurrency metadata.
pub trait Versioned {
    fn sys(&self) -> Option<&SysMeta>;

    /// `sys.version`, or 1 when the document has none.
    fn version(&self) -> u64 {
        self.sys()
            .and_then(|s| s.version)
            .unwrap_or(DEFAULT_DOCUMENT_VERSION)
    }
}

/// Content type as sent to and returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<SysMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<ApiField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiField {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ApiItems>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub omitted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<Vec<ValidationRule>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiItems {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<Vec<ValidationRule>>,
}

/// Editor interface as sent to and returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorInterfaceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<SysMeta>,
    #[serde(default)]
    pub controls: Vec<ApiControl>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiControl {
    pub field_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ApiSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_editing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_link_entity_action: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_create_entity_action: Option<bool>,
}

impl Versioned for ContentTypeDocument {
    fn sys(&self) -> Option<&SysMeta> {
        self.sys.as_ref()
    }
}

impl Versioned for EditorInterfaceDocument {
    fn sys(&self) -> Option<&SysMeta> {
        self.sys.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn version_defaults_to_one_without_sys() {
        let doc: ContentTypeDocument = serde_json::from_value(json!({"name": "Post"})).unwrap();
        assert_eq!(doc.version(), 1);

        let doc: EditorInterfaceDocument =
            serde_json::from_value(json!({"sys": {"id": "default"}, "controls": []})).unwrap();
        assert_eq!(doc.version(), 1);
    }

    #[test]
    fn version_read_from_sys() {
        let doc: ContentTypeDocument =
            serde_json::from_value(json!({"sys": {"version": 7, "type": "ContentType"}})).unwrap();
        assert_eq!(doc.version(), 7);
        assert_eq!(doc.sys.unwrap().kind.as_deref(), Some("ContentType"));
    }

    #[test]
    fn field_uses_camel_case_keys() {
        let field = ApiField {
            id: "author".into(),
            name: "Author".into(),
            field_type: "Link".into(),
            link_type: Some("Entry".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["linkType"], "Entry");
        assert_eq!(value["type"], "Link");
        assert!(value.get("defaultValue").is_none());
        assert!(value.get("items").is_none());
        assert!(value.get("validations").is_none());
    }

    #[test]
    fn non_object_validation_is_rejected_on_decode() {
        let result: Result<ApiField, _> = serde_json::from_value(json!({
            "id": "title", "name": "Title", "type": "Symbol",
            "validations": ["not an object"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn fields_must_be_a_list() {
        let result: Result<ContentTypeDocument, _> =
            serde_json::from_value(json!({"fields": {"id": "x"}}));
        assert!(result.is_err());
    }

    #[test]
    fn null_default_value_decodes_as_absent() {
        let field: ApiField = serde_json::from_value(json!({
            "id": "n", "name": "N", "type": "Integer", "defaultValue": null
        }))
        .unwrap();
        assert_eq!(field.default_value, None);
    }
}
