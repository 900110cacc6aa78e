//! Semantic comparison of external shapes.
//!
//! The remote re-serializes JSON, so a validation read back after a write can
//! differ textually from the declared one while meaning the same thing.
//! These helpers compare parsed JSON, and treat an absent list the same as an
//! empty one.

use cfsync_core::{Control, Field, Items, Settings};
use serde_json::Value;

/// Two validation strings describe the same rule. Falls back to a plain
/// string comparison when either side is not valid JSON.
pub fn validation_equivalent(a: &str, b: &str) -> bool {
    match (
        serde_json::from_str::<Value>(a),
        serde_json::from_str::<Value>(b),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

pub fn validations_equivalent(a: Option<&[String]>, b: Option<&[String]>) -> bool {
    let (a, b) = (a.unwrap_or_default(), b.unwrap_or_default());
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(a, b)| validation_equivalent(a, b))
}

/// Default values match once `null`, `{}` and absence are folded together.
pub fn default_values_equivalent(a: Option<&str>, b: Option<&str>) -> bool {
    fn parse(text: Option<&str>) -> Option<Result<Value, String>> {
        let text = text.filter(|t| !t.is_empty())?;
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Null) => None,
            Ok(Value::Object(map)) if map.is_empty() => None,
            Ok(value) => Some(Ok(value)),
            Err(_) => Some(Err(text.to_string())),
        }
    }
    parse(a) == parse(b)
}

fn link_types_equivalent(a: Option<&str>, b: Option<&str>) -> bool {
    a.filter(|s| !s.is_empty()) == b.filter(|s| !s.is_empty())
}

fn items_equivalent(a: Option<&[Items]>, b: Option<&[Items]>) -> bool {
    let (a, b) = (a.unwrap_or_default(), b.unwrap_or_default());
    a.len() == b.len()
        && a.iter().zip(b).all(|(a, b)| {
            a.item_type == b.item_type
                && link_types_equivalent(a.link_type.as_deref(), b.link_type.as_deref())
                && validations_equivalent(a.validations.as_deref(), b.validations.as_deref())
        })
}

fn field_equivalent(a: &Field, b: &Field) -> bool {
    a.id == b.id
        && a.name == b.name
        && a.field_type == b.field_type
        && link_types_equivalent(a.link_type.as_deref(), b.link_type.as_deref())
        && default_values_equivalent(a.default_value.as_deref(), b.default_value.as_deref())
        && items_equivalent(a.items.as_deref(), b.items.as_deref())
        && a.required == b.required
        && a.localized == b.localized
        && a.disabled == b.disabled
        && a.omitted == b.omitted
        && validations_equivalent(a.validations.as_deref(), b.validations.as_deref())
}

/// Field lists match position by position.
pub fn fields_equivalent(a: &[Field], b: &[Field]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| field_equivalent(a, b))
}

/// An empty help text is never sent, so it matches an absent one.
fn settings_equivalent(a: &Settings, b: &Settings) -> bool {
    a.help_text.as_deref().filter(|s| !s.is_empty())
        == b.help_text.as_deref().filter(|s| !s.is_empty())
        && a.bulk_editing == b.bulk_editing
        && a.show_link_entity_action == b.show_link_entity_action
        && a.show_create_entity_action == b.show_create_entity_action
}

pub fn controls_equivalent(a: &[Control], b: &[Control]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(a, b)| {
            let (sa, sb) = (
                a.settings.as_deref().unwrap_or_default(),
                b.settings.as_deref().unwrap_or_default(),
            );
            a.field_id == b.field_id
                && a.widget_id == b.widget_id
                && a.widget_namespace == b.widget_namespace
                && sa.len() == sb.len()
                && sa.iter().zip(sb).all(|(a, b)| settings_equivalent(a, b))
        })
}
