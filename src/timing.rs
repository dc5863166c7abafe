// SPDX-License-Identifier: MIT

use std::time::{Duration, Instant};

/// A value together with how long it took to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in seconds.
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Runs `f` and measures it with the monotonic clock.
pub fn time<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start_time = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start_time.elapsed(),
    }
}
