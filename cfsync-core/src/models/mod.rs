//! External resource shapes and identifiers.

pub mod control;
pub mod field;
pub mod resource_id;
pub mod status;

pub use control::{Control, Settings};
pub use field::{Field, Items};
pub use resource_id::{ContentTypeId, EditorInterfaceId};
pub use status::ReconcileStatus;
