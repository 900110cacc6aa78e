//! Create, read, update, delete and import for each managed resource kind.

pub mod content_type;
pub mod editor_interface;

pub use content_type::{content_type_needs_update, ContentTypeReconciler};
pub use editor_interface::{editor_interface_needs_update, EditorInterfaceReconciler};

use cfsync_core::errors::CfsyncResult;
use cfsync_core::ReconcileStatus;

/// Pass `result` through, moving `status` to `Conflict` when the remote
/// rejected a write because its version moved on.
fn settle<T>(status: &mut ReconcileStatus, result: CfsyncResult<T>) -> CfsyncResult<T> {
    if let Err(ref e) = result {
        if e.is_version_conflict() {
            tracing::warn!(error = %e, "cfsync: remote version moved on, marking conflict");
            *status = ReconcileStatus::Conflict;
        }
    }
    result
}
