use std::{thread, time::Duration};

use strata_db_types::DbResult;
use tracing::warn;

// Configuration constants for tests
pub(crate) const TEST_RETRY_COUNT: u16 = 3;
pub(crate) const TEST_RETRY_DELAY_MS: u64 = 10;

/// database operations configuration
#[derive(Debug, Clone)]
pub struct SledDbConfig {
    pub retry_count: u16,
    pub retry_delay: Duration,
}

impl SledDbConfig {
    pub fn new(retry_count: u16, retry_delay: Duration) -> Self {
        Self {
            retry_count,
            retry_delay,
        }
    }

    pub fn new_with_constant_backoff(retry_count: u16, delay_ms: u64) -> Self {
        Self::new(retry_count, Duration::from_millis(delay_ms))
    }

    /// Create test configuration with faster retry delays
    pub fn test() -> Self {
        Self::new_with_constant_backoff(TEST_RETRY_COUNT, TEST_RETRY_DELAY_MS)
    }

    /// Runs a write with this config's retry settings.
    ///
    /// `retry_count` is the number of retries after the first attempt, so the write is
    /// attempted at most `retry_count + 1` times. The error of the last attempt is
    /// returned.
    pub fn with_retry<R>(&self, op: &str, mut f: impl FnMut() -> DbResult<R>) -> DbResult<R> {
        let mut attempt: u16 = 0;
        loop {
            match f() {
                Ok(res) => return Ok(res),
                Err(err) if attempt < self.retry_count => {
                    attempt += 1;
                    warn!(%op, %attempt, %err, "db write failed, retrying");
                    thread::sleep(self.retry_delay);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
