//! Stop signal for reconcile sequences.
//!
//! A sequence stops at the next attempt boundary or backoff slice after
//! [`Cancellable::cancel`]. Steps the remote already answered stay applied:
//! the caller's state keeps the version of the last acknowledged write and a
//! `Pending*` status, so the next run re-reads before writing again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    /// Ask every holder of this signal to stop. Cannot be undone.
    fn cancel(&self);
}

/// Shared by the engine, its API client and the backoff sleeper. Clones
/// observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    stop: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.stop.store(true, Ordering::Release);
    }
}
