use std::iter::StepBy;
use std::num::NonZero;
use std::ops::Range;

use new_zealand::nz;

use crate::sum_strided;

/// The slice of the buffer assigned to one worker: the indices `start`, `start + stride`,
/// `start + 2 * stride` and so on, bounded above (exclusive) by `end`.
///
/// A partition with `start >= end` is empty and visits nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Partition {
    start: usize,
    stride: NonZero<usize>,
    end: usize,
}

impl Partition {
    /// Creates a partition visiting every `stride`-th index from `start` up to `end`.
    #[must_use]
    pub fn new(start: usize, stride: NonZero<usize>, end: usize) -> Self {
        Self { start, stride, end }
    }

    /// The first index visited, if the partition is not empty.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Distance between consecutive visited indices.
    #[must_use]
    pub fn stride(&self) -> NonZero<usize> {
        self.stride
    }

    /// Exclusive upper bound of the visited indices.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Whether the partition visits no indices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of indices the partition visits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end
            .saturating_sub(self.start)
            .div_ceil(self.stride.get())
    }

    /// The visited indices, in increasing order.
    #[must_use]
    pub fn indices(&self) -> StepBy<Range<usize>> {
        (self.start..self.end).step_by(self.stride.get())
    }

    /// Sums the values this partition visits.
    ///
    /// # Panics
    ///
    /// Panics if the partition is not empty and reaches past the end of `values`.
    #[must_use]
    pub fn sum(&self, values: &[f32]) -> f32 {
        sum_strided(values, self.start, self.stride, self.end)
    }
}

/// How a buffer is divided among a fixed number of workers.
///
/// Both strategies hand out disjoint partitions that together visit every index of the buffer
/// exactly once. They differ only in the memory access pattern each worker sees.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use partition_sum::PartitionStrategy;
///
/// let strided = PartitionStrategy::Strided.partition(1, nz!(4), 10);
/// assert_eq!(strided.indices().collect::<Vec<_>>(), [1, 5, 9]);
///
/// let batched = PartitionStrategy::Batched.partition(1, nz!(4), 10);
/// assert_eq!(batched.indices().collect::<Vec<_>>(), [3, 4, 5]);
/// ```
#[derive(Clone, Copy, Debug, derive_more::Display, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the two strategies are the whole comparison"
)]
pub enum PartitionStrategy {
    /// Worker `i` visits `i`, `i + worker_count`, `i + 2 * worker_count` and so on.
    ///
    /// Adjacent workers touch adjacent elements at nearly the same time and no single worker
    /// reads memory sequentially, which defeats cache line reuse and prefetching.
    #[display("stride")]
    Strided,

    /// Worker `i` visits one contiguous chunk of `ceil(array_size / worker_count)` elements
    /// (the last chunks may be shorter or empty).
    ///
    /// Every worker reads memory sequentially, which is what caches and prefetchers favor.
    #[display("batched")]
    Batched,
}

impl PartitionStrategy {
    /// All strategies, in the order they are reported.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Strided, Self::Batched]
    }

    /// Calculates the partition that worker `worker_index` of `worker_count` must reduce over a
    /// buffer of `array_size` values.
    ///
    /// # Panics
    ///
    /// Panics if `worker_index` is not less than `worker_count`.
    #[must_use]
    pub fn partition(
        self,
        worker_index: usize,
        worker_count: NonZero<usize>,
        array_size: usize,
    ) -> Partition {
        assert!(
            worker_index < worker_count.get(),
            "worker index {worker_index} is out of range for {worker_count} workers"
        );

        match self {
            Self::Strided => Partition::new(worker_index, worker_count, array_size),
            Self::Batched => {
                let chunk_len = array_size.div_ceil(worker_count.get());

                // Chunk bounds past the array size are clamped, so saturating here is exact.
                let start = worker_index.saturating_mul(chunk_len);

                let end = worker_index
                    .saturating_add(1)
                    .saturating_mul(chunk_len)
                    .min(array_size);

                Partition::new(start, nz!(1), end)
            }
        }
    }
}
