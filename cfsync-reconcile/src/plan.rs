//! Update planning for content types.
//!
//! Removing a field is a two-phase change: the remote refuses to drop a field
//! that was never omitted, so the old field list is first published with the
//! removed fields marked `omitted`, and only then is the new list published.

use std::collections::HashSet;

use cfsync_core::Field;

/// One remote write in an update sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStep {
    /// PUT the previous fields with the deleted ones marked omitted.
    PutOmitted,
    /// Activate the result of `PutOmitted`.
    ActivateOmitted,
    /// PUT the new fields.
    PutFields,
    /// Activate the result of `PutFields`.
    ActivateFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    deleted_ids: Vec<String>,
    steps: Vec<UpdateStep>,
}

impl UpdatePlan {
    pub fn build(previous: &[Field], desired: &[Field]) -> Self {
        let deleted_ids = deleted_field_ids(previous, desired);
        let mut steps = Vec::with_capacity(4);
        if !deleted_ids.is_empty() {
            steps.extend([UpdateStep::PutOmitted, UpdateStep::ActivateOmitted]);
        }
        steps.extend([UpdateStep::PutFields, UpdateStep::ActivateFields]);
        Self { deleted_ids, steps }
    }

    pub fn deleted_ids(&self) -> &[String] {
        &self.deleted_ids
    }

    pub fn steps(&self) -> &[UpdateStep] {
        &self.steps
    }

    pub fn has_deletions(&self) -> bool {
        !self.deleted_ids.is_empty()
    }

    /// The previous field list with every deleted field marked omitted.
    pub fn omitted_fields(&self, previous: &[Field]) -> Vec<Field> {
        previous
            .iter()
            .cloned()
            .map(|mut field| {
                if self.deleted_ids.contains(&field.id) {
                    field.omitted = true;
                }
                field
            })
            .collect()
    }
}

/// Ids present in `previous` and missing from `desired`, in `previous` order,
/// each reported once.
pub fn deleted_field_ids(previous: &[Field], desired: &[Field]) -> Vec<String> {
    let kept: HashSet<&str> = desired.iter().map(|f| f.id.as_str()).collect();
    let mut seen = HashSet::new();
    previous
        .iter()
        .map(|f| f.id.as_str())
        .filter(|id| !kept.contains(id) && seen.insert(*id))
        .map(str::to_string)
        .collect()
}
