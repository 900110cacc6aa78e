use super::error_code::{self, CfsyncErrorCode};
use crate::constants::{HTTP_CONFLICT, HTTP_NOT_FOUND};

/// Errors reported by the remote API or raised while decoding its documents.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Any response with status >= 400. `body` is the raw response body.
    #[error("contentful-api: received http status code {status} when {operation}\n\n{body}")]
    Status {
        status: u16,
        operation: String,
        body: String,
    },

    #[error("contentful-api: invalid document when {operation}: {reason}")]
    Decode { operation: String, reason: String },

    #[error("contentful-api: failed to encode request body when {operation}: {reason}")]
    Encode { operation: String, reason: String },
}

impl ApiError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The remote resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(HTTP_NOT_FOUND)
    }

    /// The remote version advanced past the one the write expected.
    pub fn is_version_conflict(&self) -> bool {
        self.status() == Some(HTTP_CONFLICT)
    }
}

impl CfsyncErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            _ if self.is_not_found() => error_code::NOT_FOUND,
            _ if self.is_version_conflict() => error_code::VERSION_CONFLICT,
            Self::Status { .. } => error_code::API_ERROR,
            Self::Decode { .. } | Self::Encode { .. } => error_code::DECODE_ERROR,
        }
    }
}
