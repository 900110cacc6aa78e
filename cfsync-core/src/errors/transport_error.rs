use super::error_code::{self, CfsyncErrorCode};

/// Network-level failures. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("request cancelled")]
    Cancelled,
}

impl CfsyncErrorCode for TransportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            Self::Network { .. } => error_code::TRANSPORT_ERROR,
        }
    }
}
