use std::num::NonZero;

/// Sums `values[start]`, `values[start + stride]`, `values[start + 2 * stride]` and so on, for
/// every such index below `end`.
///
/// The sum is accumulated from `0.0` in index order, so two calls that visit the same indices in
/// the same order produce bit-identical results. An empty range (`start >= end`) sums to `0.0`.
///
/// This is a pure function and is safe to call from any number of threads over the same slice.
///
/// # Panics
///
/// Panics if the range is not empty and `end` is past the end of `values`. This indicates a
/// defective partition and is not a recoverable condition.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use partition_sum::sum_strided;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
///
/// assert_eq!(sum_strided(&values, 0, nz!(1), 5), 15.0);
/// assert_eq!(sum_strided(&values, 1, nz!(2), 5), 6.0);
/// assert_eq!(sum_strided(&values, 4, nz!(1), 2), 0.0);
/// ```
#[must_use]
pub fn sum_strided(values: &[f32], start: usize, stride: NonZero<usize>, end: usize) -> f32 {
    if start >= end {
        return 0.0;
    }

    let range = values
        .get(start..end)
        .expect("partition must lie entirely within the buffer");

    range
        .iter()
        .step_by(stride.get())
        .fold(0.0, |sum, value| sum + value)
}
