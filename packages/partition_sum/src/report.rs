use std::fmt::{self, Display};
use std::num::NonZero;
use std::time::Duration;

use crate::PartitionStrategy;

/// One completed step of a benchmark run.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Measurement {
    /// The random buffer was generated.
    Generation {
        /// Number of values generated.
        len: usize,

        /// Time spent generating the values.
        elapsed: Duration,
    },

    /// The buffer was summed on the calling thread without any workers.
    Baseline {
        /// Time spent summing.
        elapsed: Duration,

        /// The resulting sum.
        sum: f32,
    },

    /// The buffer was summed by a set of worker threads.
    Parallel {
        /// Number of worker threads used.
        worker_count: NonZero<usize>,

        /// How the buffer was divided between the workers.
        strategy: PartitionStrategy,

        /// Number of values summed.
        len: usize,

        /// Time spent summing, including spawning and joining the workers.
        elapsed: Duration,

        /// The resulting sum.
        sum: f32,

        /// Baseline duration divided by this duration, if this duration is not zero.
        speedup: Option<f64>,
    },
}

impl Measurement {
    /// Time spent on this step.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::Generation { elapsed, .. }
            | Self::Baseline { elapsed, .. }
            | Self::Parallel { elapsed, .. } => *elapsed,
        }
    }

    /// The sum computed by this step, if it computed one.
    #[must_use]
    pub fn sum(&self) -> Option<f32> {
        match self {
            Self::Generation { .. } => None,
            Self::Baseline { sum, .. } | Self::Parallel { sum, .. } => Some(*sum),
        }
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generation { len, elapsed } => write!(
                f,
                "random array of {len} values took {} microsecs",
                elapsed.as_micros()
            ),
            Self::Baseline { elapsed, sum } => write!(
                f,
                "non-thread sum took {} microsecs, sum = {sum}",
                elapsed.as_micros()
            ),
            Self::Parallel {
                worker_count,
                strategy,
                len,
                elapsed,
                sum,
                speedup,
            } => {
                write!(
                    f,
                    "{worker_count} threads, sz = {len}, {strategy} sum took {} microsecs, sum = {sum}",
                    elapsed.as_micros()
                )?;

                match speedup {
                    Some(speedup) => write!(f, ", speedup {speedup:.2}x"),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Every measurement of a benchmark run, in the order they were taken.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    measurements: Vec<Measurement>,
}

impl Report {
    pub(crate) fn push(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    /// The measurements, in the order they were taken.
    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter()
    }

    /// Number of measurements taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether no measurements were taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// The multithreaded measurement that took the least time, if any. Ties go to the
    /// earliest measurement.
    #[must_use]
    pub fn fastest_parallel(&self) -> Option<&Measurement> {
        self.measurements
            .iter()
            .filter(|m| matches!(m, Measurement::Parallel { .. }))
            .reduce(|fastest, m| {
                if m.elapsed() < fastest.elapsed() {
                    m
                } else {
                    fastest
                }
            })
    }
}

/// How many times faster `elapsed` is than `baseline`.
pub(crate) fn speedup(baseline: Duration, elapsed: Duration) -> Option<f64> {
    if elapsed.is_zero() {
        return None;
    }

    Some(baseline.as_secs_f64() / elapsed.as_secs_f64())
}
