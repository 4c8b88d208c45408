//! Bounded, fixed-delay retry for synchronous operations.

use std::{thread, time::Duration};

/// Calls `f` up to `tries` times, sleeping `delay` between attempts.
///
/// Returns the first success. If every attempt fails, the error of the last attempt is
/// returned. A `tries` of 0 still makes one attempt.
pub fn retry<T, E>(
    tries: usize,
    delay: Duration,
    mut f: impl FnMut() -> Result<T, E>,
) -> Result<T, E> {
    for _ in 1..tries {
        match f() {
            Ok(res) => return Ok(res),
            Err(_) => thread::sleep(delay),
        }
    }
    f()
}
