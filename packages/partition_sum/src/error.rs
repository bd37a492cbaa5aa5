use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Errors that can stop a benchmark run.
///
/// Partitioning defects are not represented here. A partition that reaches outside the buffer
/// is a programming error and panics instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Memory for a buffer of values could not be obtained.
    #[error("failed to allocate {count} values for the {what}")]
    AllocationFailure {
        /// What the memory was intended for.
        what: &'static str,

        /// How many `f32` values were requested.
        count: usize,

        /// The underlying allocation error.
        #[source]
        source: TryReserveError,
    },

    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker thread {worker_index}")]
    WorkerSpawn {
        /// Index of the worker whose thread could not be started.
        worker_index: usize,

        /// The underlying I/O error reported by the operating system.
        #[source]
        source: io::Error,
    },
}

/// A specialized `Result` type for benchmark operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
