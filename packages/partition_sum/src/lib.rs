#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Measures how the way an array is divided among worker threads affects the speed of summing it.
//!
//! A large buffer of random `f32` values is summed once on the calling thread (the baseline)
//! and then by several sets of worker threads, each set dividing the buffer according to a
//! [`PartitionStrategy`]:
//!
//! - [`PartitionStrategy::Strided`] - worker `i` of `k` sums every `k`-th element starting at
//!   `i`. Work is interleaved, so no worker reads memory sequentially.
//! - [`PartitionStrategy::Batched`] - worker `i` of `k` sums the `i`-th contiguous chunk of the
//!   buffer. Every worker reads memory sequentially.
//!
//! Both strategies visit every element exactly once, so they compute the same sum up to
//! floating-point rounding. The difference shows up in elapsed time, which depends on cache
//! locality, the number of workers and the optimization level the code was compiled with.
//!
//! This package is a development tool for observing hardware effects, not a general-purpose
//! parallel reduction library. Workers are plain OS threads spawned and joined for every sum.
//!
//! # Example
//!
//! ```
//! use new_zealand::nz;
//! use partition_sum::{Buffer, PartitionStrategy, Stopwatch, parallel_sum, sum_strided};
//!
//! let buffer = Buffer::generate(1 << 16, &mut rand::rng()).unwrap();
//! let values = buffer.as_slice();
//!
//! let mut stopwatch = Stopwatch::new();
//!
//! let baseline = stopwatch.measure(|| sum_strided(values, 0, nz!(1), values.len()));
//! let strided = stopwatch.measure(|| parallel_sum(values, nz!(4), PartitionStrategy::Strided));
//! let batched = stopwatch.measure(|| parallel_sum(values, nz!(4), PartitionStrategy::Batched));
//!
//! println!("baseline {:?}", baseline.elapsed());
//! println!("strided  {:?}", strided.elapsed());
//! println!("batched  {:?}", batched.elapsed());
//! ```
//!
//! The `partition_sum` binary runs the whole comparison with fixed parameters (see
//! [`BenchmarkConfig`]) and prints one line per measurement.

mod buffer;
mod config;
mod engine;
mod error;
mod harness;
mod pal;
mod partitioning;
mod reduce;
mod report;
mod timing;

pub use buffer::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use harness::*;
pub use partitioning::*;
pub use reduce::*;
pub use report::{Measurement, Report};
pub use timing::*;
