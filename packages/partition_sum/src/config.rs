use std::num::NonZero;

use new_zealand::nz;
use nonempty::{NonEmpty, nonempty};

use crate::PartitionStrategy;

/// Number of values summed by the default benchmark (512 MiB of `f32`).
pub const DEFAULT_ARRAY_LEN: usize = 1 << 27;

/// The parameters of one benchmark run.
///
/// The defaults are fixed at build time. Other values are only meant for tests and for
/// embedding the harness in other benchmarks.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use nonempty::nonempty;
/// use partition_sum::BenchmarkConfig;
///
/// let config = BenchmarkConfig::default()
///     .with_array_len(4096)
///     .with_thread_counts(nonempty![nz!(1), nz!(4)]);
///
/// assert_eq!(config.array_len(), 4096);
/// assert_eq!(config.thread_counts().len(), 2);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct BenchmarkConfig {
    array_len: usize,
    thread_counts: NonEmpty<NonZero<usize>>,
    strategies: NonEmpty<PartitionStrategy>,
}

impl BenchmarkConfig {
    /// Number of values in the generated buffer.
    #[must_use]
    pub fn array_len(&self) -> usize {
        self.array_len
    }

    /// Worker counts to benchmark, in the order they are reported.
    #[must_use]
    pub fn thread_counts(&self) -> &NonEmpty<NonZero<usize>> {
        &self.thread_counts
    }

    /// Partitioning strategies compared for every worker count, in the order they are reported.
    #[must_use]
    pub fn strategies(&self) -> &NonEmpty<PartitionStrategy> {
        &self.strategies
    }

    /// Replaces the number of values in the generated buffer.
    pub fn with_array_len(mut self, array_len: usize) -> Self {
        self.array_len = array_len;
        self
    }

    /// Replaces the worker counts to benchmark.
    pub fn with_thread_counts(mut self, thread_counts: NonEmpty<NonZero<usize>>) -> Self {
        self.thread_counts = thread_counts;
        self
    }

    /// Replaces the strategies to compare.
    pub fn with_strategies(mut self, strategies: NonEmpty<PartitionStrategy>) -> Self {
        self.strategies = strategies;
        self
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            array_len: DEFAULT_ARRAY_LEN,
            // One worker shows the pure threading overhead, the rest span typical
            // performance core counts up to well past them.
            thread_counts: nonempty![nz!(1), nz!(6), nz!(8), nz!(12), nz!(24)],
            strategies: nonempty![PartitionStrategy::Strided, PartitionStrategy::Batched],
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_compares_strided_then_batched() {
        let config = BenchmarkConfig::default();

        assert_eq!(config.array_len(), DEFAULT_ARRAY_LEN);
        assert_eq!(
            config.strategies().iter().copied().collect::<Vec<_>>(),
            PartitionStrategy::all()
        );
        assert_eq!(*config.thread_counts().first(), nz!(1));
    }

    #[test]
    fn builders_replace_values() {
        let config = BenchmarkConfig::default()
            .with_array_len(10)
            .with_thread_counts(nonempty![nz!(3)])
            .with_strategies(nonempty![PartitionStrategy::Batched]);

        assert_eq!(config.array_len(), 10);
        assert_eq!(config.thread_counts(), &nonempty![nz!(3)]);
        assert_eq!(config.strategies(), &nonempty![PartitionStrategy::Batched]);
    }
}
