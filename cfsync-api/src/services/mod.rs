//! Typed operations over the two management API sub-resources.

pub mod content_type;
pub mod editor_interface;

pub use content_type::ContentTypeService;
pub use editor_interface::EditorInterfaceService;
