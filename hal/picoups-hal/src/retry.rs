//! Setup retry policy
//!
//! Some setup steps fail for a short window after the kernel creates the
//! underlying device (a freshly exported GPIO line has no `direction`
//! attribute yet, or it is not yet writable). Those steps are retried with
//! quadratic backoff.

use embedded_hal::delay::DelayNs;
use tracing::debug;

/// Retries after the first attempt; attempts are numbered `0..=MAX_RETRIES`
pub const MAX_RETRIES: u32 = 8;

/// Delay before attempt `attempt`, in whole milliseconds
pub fn backoff_ms(attempt: u32) -> u32 {
    attempt * attempt
}

/// Run `op` until it succeeds or [`MAX_RETRIES`] retries are used up
///
/// `op` receives the attempt number. Attempt 0 runs immediately; attempt `n`
/// runs after sleeping [`backoff_ms(n)`](backoff_ms). The last error is
/// returned if every attempt fails.
pub fn retry_with_backoff<T, E, D, F>(delay: &mut D, mut op: F) -> Result<T, E>
where
    D: DelayNs,
    F: FnMut(u32) -> Result<T, E>,
{
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            delay.delay_ms(backoff_ms(attempt));
        }

        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= MAX_RETRIES => return Err(err),
            Err(_) => {
                debug!(attempt, "setup step failed, retrying");
                attempt += 1;
            }
        }
    }
}
