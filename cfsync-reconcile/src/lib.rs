//! # cfsync-reconcile
//!
//! Converges declared content types and editor interfaces onto the
//! Contentful Management API.
//!
//! Control flow: reconciler → normalizer (shape the data) → API client
//! (persist) → transport (network). [`SyncEngine`] is the entry point for
//! callers that just want a resource to match its declaration.

pub mod engine;
pub mod normalize;
pub mod plan;
pub mod reconciler;
pub mod state;

pub use engine::{ConvergeOutcome, SyncEngine};
pub use plan::{UpdatePlan, UpdateStep};
pub use reconciler::{
    content_type_needs_update, editor_interface_needs_update, ContentTypeReconciler,
    EditorInterfaceReconciler,
};
pub use state::{ContentTypeState, EditorInterfaceState};
