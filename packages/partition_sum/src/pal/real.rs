use std::time::Instant;

use crate::pal::TimeSource;

/// Reads the operating system monotonic clock via the standard library.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct MonotonicTimeSource;

impl TimeSource for MonotonicTimeSource {
    #[cfg_attr(test, mutants::skip)] // Real clock reads cannot be given expectations.
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}
