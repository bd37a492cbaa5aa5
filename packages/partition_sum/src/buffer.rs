use std::fmt::{self, Debug};
use std::iter;

use rand::Rng;

use crate::{Error, Result};

/// Inclusive lower bound of the values produced by [`Buffer::generate()`].
pub const MIN_VALUE: f32 = -0.5;

/// Exclusive upper bound of the values produced by [`Buffer::generate()`].
pub const MAX_VALUE: f32 = 0.5;

/// An immutable array of `f32` values that every reduction in a benchmark run reads from.
///
/// The buffer is created once per run and shared by reference with all worker threads. Nothing
/// mutates it after creation, so concurrent reads need no synchronization.
///
/// # Examples
///
/// ```
/// use partition_sum::{Buffer, MAX_VALUE, MIN_VALUE};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let buffer = Buffer::generate(1024, &mut rng).unwrap();
///
/// assert_eq!(buffer.len(), 1024);
/// assert!(buffer.as_slice().iter().all(|v| (MIN_VALUE..MAX_VALUE).contains(v)));
/// ```
#[derive(Clone, PartialEq)]
pub struct Buffer {
    values: Box<[f32]>,
}

impl Buffer {
    /// Generates a buffer of `len` values, each drawn independently and uniformly from
    /// `[MIN_VALUE, MAX_VALUE)` using the provided random source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if memory for `len` values cannot be obtained.
    pub fn generate(len: usize, rng: &mut impl Rng) -> Result<Self> {
        let mut values = Vec::new();

        values
            .try_reserve_exact(len)
            .map_err(|source| Error::AllocationFailure {
                what: "random array",
                count: len,
                source,
            })?;

        values.extend(iter::repeat_with(|| rng.random_range(MIN_VALUE..MAX_VALUE)).take(len));

        Ok(Self {
            values: values.into_boxed_slice(),
        })
    }

    /// The values in the buffer, in index order.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Number of values in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the buffer holds no values at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AsRef<[f32]> for Buffer {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}

impl From<Vec<f32>> for Buffer {
    fn from(values: Vec<f32>) -> Self {
        Self {
            values: values.into_boxed_slice(),
        }
    }
}

// Benchmark buffers hold hundreds of millions of values, so we only show the size.
impl Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.values.len())
            .finish_non_exhaustive()
    }
}
