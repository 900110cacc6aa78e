//! # cfsync-core
//!
//! Foundation crate for cfsync.
//! Defines the external resource shapes, identifiers, errors, config, and
//! tracing setup shared by the API client and the reconciler.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::SyncConfig;
pub use errors::{CfsyncError, CfsyncResult};
pub use models::{
    ContentTypeId, Control, EditorInterfaceId, Field, Items, ReconcileStatus, Settings,
};
pub use traits::{Cancellable, CancellationToken};
