use std::num::NonZero;
use std::thread;

use new_zealand::nz;

use crate::{Error, Partition, PartitionStrategy, Result, sum_strided};

/// Sums `values` using `worker_count` freshly spawned worker threads, dividing the work between
/// them according to `strategy`.
///
/// Each worker sums its own partition into a private slot. Once every worker has been joined,
/// the slots are summed in worker order to produce the result. Workers never communicate with
/// each other, so for a given buffer, worker count and strategy the result does not depend on
/// thread scheduling.
///
/// With a single worker, both strategies visit the whole buffer in order and the result is
/// bit-identical to [`sum_strided()`] over the whole buffer.
///
/// # Errors
///
/// Returns [`Error::AllocationFailure`] if the per-worker slots cannot be allocated and
/// [`Error::WorkerSpawn`] if the operating system refuses to start a worker thread. Workers that
/// were already started are joined before the error is returned.
///
/// # Panics
///
/// If any worker panics, the panic is propagated to the caller once all workers have finished.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use partition_sum::{PartitionStrategy, parallel_sum};
///
/// let values = vec![0.25_f32; 1000];
///
/// let sum = parallel_sum(&values, nz!(4), PartitionStrategy::Batched).unwrap();
/// assert_eq!(sum, 250.0);
/// ```
pub fn parallel_sum(
    values: &[f32],
    worker_count: NonZero<usize>,
    strategy: PartitionStrategy,
) -> Result<f32> {
    sum_partitions(values, worker_count, |worker_index| {
        strategy.partition(worker_index, worker_count, values.len())
    })
}

/// Spawns one worker per partition produced by `partition_of`, joins them all and sums their
/// partial results in worker order.
fn sum_partitions(
    values: &[f32],
    worker_count: NonZero<usize>,
    partition_of: impl Fn(usize) -> Partition,
) -> Result<f32> {
    let mut slots = allocate_slots(worker_count)?;

    // Leaving the scope joins every worker, whether it finished normally or panicked.
    thread::scope(|scope| -> Result<()> {
        for (worker_index, slot) in slots.iter_mut().enumerate() {
            let partition = partition_of(worker_index);

            thread::Builder::new()
                .name(format!("partition-sum-{worker_index}"))
                .spawn_scoped(scope, move || {
                    *slot = partition.sum(values);
                })
                .map_err(|source| Error::WorkerSpawn {
                    worker_index,
                    source,
                })?;
        }

        Ok(())
    })?;

    Ok(sum_strided(&slots, 0, nz!(1), slots.len()))
}

fn allocate_slots(worker_count: NonZero<usize>) -> Result<Vec<f32>> {
    let mut slots = Vec::new();

    slots
        .try_reserve_exact(worker_count.get())
        .map_err(|source| Error::AllocationFailure {
            what: "partial sums",
            count: worker_count.get(),
            source,
        })?;

    slots.resize(worker_count.get(), 0.0);

    Ok(slots)
}
