//! Content type fields.
//!
//! Outbound: `link_type` and `default_value` become `linkType` and
//! `defaultValue` (the latter parsed from JSON text), empty strings are
//! dropped, every validation string is parsed into a JSON object, and the
//! one-entry `items` list is unwrapped into a nested object that gets the same
//! treatment. Inbound is the inverse. Validation objects and default values are
//! written back as compact JSON text, so key order and whitespace may differ
//! from what was declared. Use [`super::validation_equivalent`] to compare.

use cfsync_api::{ApiField, ApiItems, ValidationRule};
use cfsync_core::errors::ShapeError;
use cfsync_core::{Field, Items};
use serde_json::Value;

use super::{non_empty, single};

pub fn fields_outbound(fields: &[Field]) -> Result<Vec<ApiField>, ShapeError> {
    fields.iter().map(field_outbound).collect()
}

pub fn fields_inbound(fields: &[ApiField]) -> Vec<Field> {
    fields.iter().map(field_inbound).collect()
}

pub fn field_outbound(field: &Field) -> Result<ApiField, ShapeError> {
    let items = single(field.items.as_deref(), &field.id, "items")?
        .map(|items| items_outbound(&field.id, items))
        .transpose()?;

    Ok(ApiField {
        id: field.id.clone(),
        name: field.name.clone(),
        field_type: field.field_type.clone(),
        link_type: non_empty(field.link_type.as_deref()),
        default_value: default_value_outbound(field)?,
        items,
        required: field.required,
        localized: field.localized,
        disabled: field.disabled,
        omitted: field.omitted,
        validations: validations_outbound(&field.id, field.validations.as_deref())?,
    })
}

pub fn field_inbound(field: &ApiField) -> Field {
    Field {
        id: field.id.clone(),
        name: field.name.clone(),
        field_type: field.field_type.clone(),
        link_type: non_empty(field.link_type.as_deref()),
        default_value: default_value_inbound(field.default_value.as_ref()),
        items: field.items.as_ref().map(|items| vec![items_inbound(items)]),
        required: field.required,
        localized: field.localized,
        disabled: field.disabled,
        omitted: field.omitted,
        validations: validations_inbound(field.validations.as_deref()),
    }
}

fn items_outbound(field_id: &str, items: &Items) -> Result<ApiItems, ShapeError> {
    Ok(ApiItems {
        item_type: items.item_type.clone(),
        link_type: non_empty(items.link_type.as_deref()),
        validations: validations_outbound(field_id, items.validations.as_deref())?,
    })
}

fn items_inbound(items: &ApiItems) -> Items {
    Items {
        item_type: items.item_type.clone(),
        link_type: non_empty(items.link_type.as_deref()),
        validations: validations_inbound(items.validations.as_deref()),
    }
}

fn default_value_outbound(field: &Field) -> Result<Option<Value>, ShapeError> {
    let Some(text) = non_empty(field.default_value.as_deref()) else {
        return Ok(None);
    };
    let value: Value =
        serde_json::from_str(&text).map_err(|e| ShapeError::InvalidDefaultValue {
            field_id: field.id.clone(),
            reason: e.to_string(),
        })?;
    Ok((!value.is_null()).then_some(value))
}

/// `null` and `{}` read back as absent.
fn default_value_inbound(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn validations_outbound(
    field_id: &str,
    validations: Option<&[String]>,
) -> Result<Option<Vec<ValidationRule>>, ShapeError> {
    let Some(validations) = validations else {
        return Ok(None);
    };
    validations
        .iter()
        .enumerate()
        .map(|(index, text)| {
            serde_json::from_str::<ValidationRule>(text).map_err(|e| {
                ShapeError::InvalidValidation {
                    field_id: field_id.to_string(),
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn validations_inbound(validations: Option<&[ValidationRule]>) -> Option<Vec<String>> {
    validations.map(|rules| {
        rules
            .iter()
            .map(|rule| Value::Object(rule.clone()).to_string())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_field_has_no_optional_keys_on_the_wire() {
        let api = field_outbound(&Field::new("title", "Title", "Symbol")).unwrap();
        let wire = serde_json::to_value(&api).unwrap();
        let keys: Vec<&str> = wire.as_object().unwrap().keys().map(String::as_str).collect();
        for absent in ["linkType", "defaultValue", "items", "validations"] {
            assert!(!keys.contains(&absent), "{absent} leaked: {wire}");
        }
    }

    #[test]
    fn empty_strings_are_dropped() {
        let field = Field {
            link_type: Some(String::new()),
            default_value: Some(String::new()),
            ..Field::new("body", "Body", "Text")
        };
        let api = field_outbound(&field).unwrap();
        assert_eq!(api.link_type, None);
        assert_eq!(api.default_value, None);
    }

    #[test]
    fn single_validation_round_trips() {
        let field = Field::new("slug", "Slug", "Symbol").with_validation(r#"{"unique":true}"#);
        let api = field_outbound(&field).unwrap();
        assert_eq!(
            serde_json::to_value(&api).unwrap()["validations"],
            json!([{"unique": true}])
        );
        assert_eq!(field_inbound(&api), field);
    }

    #[test]
    fn items_are_unwrapped_and_rewrapped() {
        let field = Field::new("tags", "Tags", "Array").with_items(
            Items::new("Link")
                .with_link_type("Asset")
                .with_validation(r#"{"linkMimetypeGroup":["image"]}"#),
        );
        let api = field_outbound(&field).unwrap();
        let wire = serde_json::to_value(&api).unwrap();
        assert_eq!(wire["items"]["type"], "Link");
        assert_eq!(wire["items"]["linkType"], "Asset");
        assert_eq!(wire["items"]["validations"][0]["linkMimetypeGroup"][0], "image");

        assert_eq!(field_inbound(&api), field);
    }

    #[test]
    fn empty_items_list_is_absent() {
        let field = Field {
            items: Some(vec![]),
            ..Field::new("tags", "Tags", "Array")
        };
        assert_eq!(field_outbound(&field).unwrap().items, None);
    }

    #[test]
    fn more_than_one_items_entry_is_rejected() {
        let field = Field {
            items: Some(vec![Items::new("Symbol"), Items::new("Symbol")]),
            ..Field::new("tags", "Tags", "Array")
        };
        let err = field_outbound(&field).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::TooManyNested { key: "items", count: 2, .. }
        ));
    }

    #[test]
    fn malformed_validation_names_field_and_index() {
        let field = Field::new("title", "Title", "Symbol")
            .with_validation(r#"{"unique":true}"#)
            .with_validation("{not json");
        match field_outbound(&field).unwrap_err() {
            ShapeError::InvalidValidation { field_id, index, .. } => {
                assert_eq!(field_id, "title");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_validation_is_rejected() {
        let field = Field::new("title", "Title", "Symbol").with_validation("[1,2]");
        assert!(matches!(
            field_outbound(&field),
            Err(ShapeError::InvalidValidation { .. })
        ));
    }

    #[test]
    fn malformed_default_value_is_rejected() {
        let field = Field::new("views", "Views", "Integer").with_default_value("{\"en-US\":");
        assert!(matches!(
            field_outbound(&field),
            Err(ShapeError::InvalidDefaultValue { .. })
        ));
    }

    #[test]
    fn default_value_is_parsed_json() {
        let field = Field::new("views", "Views", "Integer").with_default_value(r#"{"en-US":0}"#);
        let api = field_outbound(&field).unwrap();
        assert_eq!(api.default_value, Some(json!({"en-US": 0})));
        assert_eq!(field_inbound(&api).default_value.as_deref(), Some(r#"{"en-US":0}"#));
    }

    #[test]
    fn null_or_empty_default_reads_back_absent() {
        for value in [json!(null), json!({})] {
            let api = ApiField {
                id: "n".into(),
                name: "N".into(),
                field_type: "Object".into(),
                default_value: Some(value),
                ..Default::default()
            };
            assert_eq!(field_inbound(&api).default_value, None);
        }
    }

    #[test]
    fn outbound_leaves_input_untouched() {
        let fields = vec![Field::new("a", "A", "Symbol").with_validation(r#"{"size":{"max":5}}"#)];
        let before = fields.clone();
        fields_outbound(&fields).unwrap();
        assert_eq!(fields, before);
    }
}
