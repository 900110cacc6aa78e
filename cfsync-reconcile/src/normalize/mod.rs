//! Field Normalizer: converts between the flat, list-based external shape and
//! the nested API documents.
//!
//! Pure functions. Inputs are borrowed and never modified; every output is
//! freshly built. Outbound conversion runs before any network call, so a
//! malformed validation or default value fails the operation up front.

pub mod controls;
pub mod equivalence;
pub mod fields;

pub use controls::{control_inbound, control_outbound, controls_inbound, controls_outbound};
pub use equivalence::{
    controls_equivalent, default_values_equivalent, fields_equivalent, validation_equivalent,
    validations_equivalent,
};
pub use fields::{field_inbound, field_outbound, fields_inbound, fields_outbound};

/// `Some(s)` unless `s` is absent or empty.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Unwrap a list bounded to one entry: empty or absent is `None`.
pub(crate) fn single<'a, T>(
    list: Option<&'a [T]>,
    owner: &str,
    key: &'static str,
) -> Result<Option<&'a T>, cfsync_core::errors::ShapeError> {
    match list.unwrap_or_default() {
        [] => Ok(None),
        [one] => Ok(Some(one)),
        many => Err(cfsync_core::errors::ShapeError::TooManyNested {
            owner: owner.to_string(),
            key,
            count: many.len(),
        }),
    }
}
