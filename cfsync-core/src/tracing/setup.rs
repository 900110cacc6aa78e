//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::defaults::{DEFAULT_LOG_FILTER, ENV_LOG_FILTER};

static INIT: Once = Once::new();

/// Initialize cfsync logging.
///
/// Reads `CFSYNC_LOG` for per-target levels, e.g.
/// `CFSYNC_LOG=cfsync_api=debug,cfsync_reconcile=info`.
/// Falls back to `cfsync=info` if `CFSYNC_LOG` is unset or invalid.
///
/// Idempotent; later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        // A host process may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}
