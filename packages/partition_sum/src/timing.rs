use std::time::Duration;

use crate::pal::{TimeSource, TimeSourceFacade};

/// Measures the wall-clock duration of operations using a monotonic clock.
///
/// The clock is read immediately before and immediately after the measured operation, so the
/// measured interval contains the operation and nothing else the stopwatch does.
///
/// # Examples
///
/// ```
/// use partition_sum::Stopwatch;
///
/// let mut stopwatch = Stopwatch::new();
///
/// let timed = stopwatch.measure(|| (1..=10).sum::<u32>());
///
/// assert_eq!(*timed.value(), 55);
/// println!("summing took {:?}", timed.elapsed());
/// ```
#[derive(Debug)]
pub struct Stopwatch {
    time_source: TimeSourceFacade,
}

impl Stopwatch {
    /// Creates a stopwatch backed by the operating system monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        Self::from_time_source(TimeSourceFacade::real())
    }

    pub(crate) fn from_time_source(time_source: impl Into<TimeSourceFacade>) -> Self {
        Self {
            time_source: time_source.into(),
        }
    }

    /// Executes `operation` and returns its result together with how long it took.
    pub fn measure<R>(&mut self, operation: impl FnOnce() -> R) -> Timed<R> {
        let start = self.time_source.now();
        let value = operation();
        let end = self.time_source.now();

        Timed {
            elapsed: end.saturating_duration_since(start),
            value,
        }
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of an operation measured by a [`Stopwatch`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub struct Timed<T> {
    elapsed: Duration,
    value: T,
}

impl<T> Timed<T> {
    /// How long the operation took.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The value the operation returned.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Splits into the elapsed duration and the value the operation returned.
    #[must_use]
    pub fn into_parts(self) -> (Duration, T) {
        (self.elapsed, self.value)
    }
}

impl<T, E> Timed<Result<T, E>> {
    /// Turns a measured fallible operation into a fallible measurement, so the error can be
    /// propagated with `?`.
    ///
    /// # Errors
    ///
    /// Returns the error that the measured operation returned.
    pub fn transpose(self) -> Result<Timed<T>, E> {
        let elapsed = self.elapsed;

        self.value.map(|value| Timed { elapsed, value })
    }
}
