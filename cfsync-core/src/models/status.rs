use serde::{Deserialize, Serialize};

/// Where a resource instance stands in its reconcile lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileStatus {
    /// No remote resource is known (never created, or gone on read).
    #[default]
    Absent,
    /// A create is in flight or was interrupted.
    PendingCreate,
    /// Local state matches the last successful remote write or read.
    Active,
    /// An update is in flight or was interrupted; remote state is unknown.
    PendingUpdate,
    /// The remote version advanced out-of-band and rejected a write.
    Conflict,
}
