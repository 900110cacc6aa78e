//! Observability for cfsync.
//! `tracing` with `EnvFilter`, configured through `CFSYNC_LOG`.

pub mod setup;

pub use setup::init_tracing;
