//! Editor interface controls.

use cfsync_api::{ApiControl, ApiSettings};
use cfsync_core::errors::ShapeError;
use cfsync_core::{Control, Settings};

use super::{non_empty, single};

pub fn controls_outbound(controls: &[Control]) -> Result<Vec<ApiControl>, ShapeError> {
    controls.iter().map(control_outbound).collect()
}

pub fn controls_inbound(controls: &[ApiControl]) -> Vec<Control> {
    controls.iter().map(control_inbound).collect()
}

pub fn control_outbound(control: &Control) -> Result<ApiControl, ShapeError> {
    let settings = single(control.settings.as_deref(), &control.field_id, "settings")?;
    Ok(ApiControl {
        field_id: control.field_id.clone(),
        widget_id: non_empty(Some(control.widget_id.as_str())),
        widget_namespace: non_empty(Some(control.widget_namespace.as_str())),
        settings: settings.map(settings_outbound),
    })
}

pub fn control_inbound(control: &ApiControl) -> Control {
    Control {
        field_id: control.field_id.clone(),
        widget_id: control.widget_id.clone().unwrap_or_default(),
        widget_namespace: control.widget_namespace.clone().unwrap_or_default(),
        settings: control
            .settings
            .as_ref()
            .map(|s| vec![settings_inbound(s)]),
    }
}

fn settings_outbound(settings: &Settings) -> ApiSettings {
    ApiSettings {
        help_text: non_empty(settings.help_text.as_deref()),
        bulk_editing: Some(settings.bulk_editing),
        show_link_entity_action: Some(settings.show_link_entity_action),
        show_create_entity_action: Some(settings.show_create_entity_action),
    }
}

/// Flags the remote left out take their documented default of `true`.
fn settings_inbound(settings: &ApiSettings) -> Settings {
    Settings {
        help_text: non_empty(settings.help_text.as_deref()),
        bulk_editing: settings.bulk_editing.unwrap_or(true),
        show_link_entity_action: settings.show_link_entity_action.unwrap_or(true),
        show_create_entity_action: settings.show_create_entity_action.unwrap_or(true),
    }
}
