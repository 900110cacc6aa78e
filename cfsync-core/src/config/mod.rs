//! Configuration system for cfsync.
//! TOML-based, layered: overrides > file > environment > defaults.

pub mod api_config;
pub mod defaults;
pub mod sync_config;

pub use api_config::ApiConfig;
pub use sync_config::{ConfigOverrides, SyncConfig};
