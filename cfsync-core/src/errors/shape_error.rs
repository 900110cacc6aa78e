use super::error_code::{self, CfsyncErrorCode};

/// Malformed field or control data found while normalizing.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("field {field_id}: invalid validation rule at index {index}: {reason}")]
    InvalidValidation {
        field_id: String,
        index: usize,
        reason: String,
    },

    #[error("field {field_id}: invalid default value: {reason}")]
    InvalidDefaultValue { field_id: String, reason: String },

    #[error("{owner}: {key} accepts at most one entry, got {count}")]
    TooManyNested {
        owner: String,
        key: &'static str,
        count: usize,
    },
}

impl CfsyncErrorCode for ShapeError {
    fn error_code(&self) -> &'static str {
        error_code::SHAPE_ERROR
    }
}
