//! Error handling for cfsync.
//! One error enum per subsystem, `thiserror` only, unified under `CfsyncError`.

pub mod api_error;
pub mod config_error;
pub mod error_code;
pub mod shape_error;
pub mod transport_error;

pub use api_error::ApiError;
pub use config_error::ConfigError;
pub use error_code::CfsyncErrorCode;
pub use shape_error::ShapeError;
pub use transport_error::TransportError;

/// Top-level error returned by every reconcile operation.
#[derive(Debug, thiserror::Error)]
pub enum CfsyncError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Got invalid id: {id}")]
    InvalidId { id: String },

    #[error("Protected is set to true and these field(s) will be removed: {}", field_ids.join(", "))]
    ProtectedFieldRemoval { field_ids: Vec<String> },

    #[error("{operation}: not implemented")]
    NotImplemented { operation: &'static str },
}

impl CfsyncError {
    /// A read found no remote resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_not_found())
    }

    /// A write was rejected because the remote version moved on.
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_version_conflict())
    }
}

impl CfsyncErrorCode for CfsyncError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(e) => e.error_code(),
            Self::Api(e) => e.error_code(),
            Self::Shape(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::InvalidId { .. } => error_code::INVALID_ID,
            Self::ProtectedFieldRemoval { .. } => error_code::PROTECTED_FIELD_REMOVAL,
            Self::NotImplemented { .. } => error_code::NOT_IMPLEMENTED,
        }
    }
}

pub type CfsyncResult<T> = Result<T, CfsyncError>;
