//! CfsyncErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this so callers (and log queries) can match on
/// a stable code instead of the rendered message.
pub trait CfsyncErrorCode {
    /// Returns the error code string (e.g., "TRANSPORT_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted diagnostic string: `[ERROR_CODE] message`.
    fn diagnostic(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
pub const CANCELLED: &str = "CANCELLED";
pub const API_ERROR: &str = "API_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const VERSION_CONFLICT: &str = "VERSION_CONFLICT";
pub const DECODE_ERROR: &str = "DECODE_ERROR";
pub const SHAPE_ERROR: &str = "SHAPE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_ID: &str = "INVALID_ID";
pub const PROTECTED_FIELD_REMOVAL: &str = "PROTECTED_FIELD_REMOVAL";
pub const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";
