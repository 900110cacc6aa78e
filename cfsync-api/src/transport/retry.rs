//! Rate-limit backoff policy.
//!
//! The wait before retry `n` (1-based attempt that got the 429) is `2^n`
//! seconds, unless the response carries an integer
//! `X-Contentful-RateLimit-Reset` header, which takes precedence.

use std::time::{Duration, Instant};

use cfsync_core::constants::RATE_LIMIT_RESET_HEADER;
use cfsync_core::errors::TransportError;
use cfsync_core::{Cancellable, CancellationToken};

use super::{ApiResponse, IBackoffSleeper};

/// Granularity at which a sleeping thread notices cancellation.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Exponential default for the given attempt: `2^attempt` seconds.
pub fn exponential_backoff(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt))
}

/// Reset hint from the response, if present and a valid integer.
/// Negative hints mean "retry now".
pub fn reset_hint(response: &ApiResponse) -> Option<Duration> {
    response
        .header(RATE_LIMIT_RESET_HEADER)
        .and_then(|v| v.parse::<i64>().ok())
        .map(|secs| Duration::from_secs(secs.max(0) as u64))
}

/// How long to wait after `attempt` came back rate-limited.
pub fn backoff_for(attempt: u32, response: &ApiResponse) -> Duration {
    reset_hint(response).unwrap_or_else(|| exponential_backoff(attempt))
}

/// Real sleeper: blocks the thread, polling the cancellation token.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl IBackoffSleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration, cancel: &CancellationToken) -> Result<(), TransportError> {
        // A reset hint too large to add to the clock has no deadline; only
        // cancellation ends the wait.
        let deadline = Instant::now().checked_add(duration);
        loop {
            if cancel.is_cancelled() {
                return Err(TransportError::Cancelled);
            }
            let slice = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(());
                    }
                    (deadline - now).min(CANCEL_POLL_INTERVAL)
                }
                None => CANCEL_POLL_INTERVAL,
            };
            std::thread::sleep(slice);
        }
    }
}
