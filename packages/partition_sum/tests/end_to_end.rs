//! Exercises the public API the way the benchmark binary does, over a buffer small enough for
//! a test run.

#![allow(clippy::indexing_slicing, reason = "test code with known array bounds")]

use std::collections::HashSet;

use new_zealand::nz;
use nonempty::nonempty;
use partition_sum::{
    BenchmarkConfig, Buffer, MAX_VALUE, MIN_VALUE, Measurement, PartitionStrategy, Stopwatch,
    parallel_sum, run, sum_strided,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const LEN: usize = 1024;

fn assert_close(a: f32, b: f32) {
    let tolerance = 1e-3 * a.abs().max(b.abs()).max(1.0);

    assert!(
        (a - b).abs() <= tolerance,
        "{a} and {b} differ by more than {tolerance}"
    );
}

#[test]
fn strided_batched_and_baseline_agree() {
    let mut rng = StdRng::seed_from_u64(2024);
    let buffer = Buffer::generate(LEN, &mut rng).unwrap();

    assert_eq!(buffer.len(), LEN);
    assert!(
        buffer
            .as_slice()
            .iter()
            .all(|v| (MIN_VALUE..MAX_VALUE).contains(v))
    );

    let values = buffer.as_slice();

    let baseline = sum_strided(values, 0, nz!(1), values.len());
    let strided = parallel_sum(values, nz!(4), PartitionStrategy::Strided).unwrap();
    let batched = parallel_sum(values, nz!(4), PartitionStrategy::Batched).unwrap();

    assert_close(baseline, strided);
    assert_close(baseline, batched);
    assert_close(strided, batched);
}

#[test]
fn four_workers_split_1024_values_evenly() {
    for &strategy in PartitionStrategy::all() {
        let mut seen = HashSet::new();

        for worker_index in 0..4 {
            let partition = strategy.partition(worker_index, nz!(4), LEN);

            assert_eq!(partition.len(), 256, "{strategy} worker {worker_index}");

            for index in partition.indices() {
                assert!(index < LEN);
                assert!(seen.insert(index), "{strategy} visited {index} twice");
            }
        }

        assert_eq!(seen.len(), LEN);
    }
}

#[test]
fn single_worker_is_bit_identical_to_baseline() {
    let buffer = Buffer::generate(LEN, &mut StdRng::seed_from_u64(11)).unwrap();
    let values = buffer.as_slice();

    let baseline = sum_strided(values, 0, nz!(1), values.len());

    for &strategy in PartitionStrategy::all() {
        let sum = parallel_sum(values, nz!(1), strategy).unwrap();

        assert_eq!(sum.to_bits(), baseline.to_bits(), "{strategy}");
    }
}

#[test]
fn full_run_reports_every_configuration() {
    let config = BenchmarkConfig::default()
        .with_array_len(LEN)
        .with_thread_counts(nonempty![nz!(1), nz!(4), nz!(24)]);

    let mut lines = Vec::new();

    let report = run(
        &config,
        &mut StdRng::seed_from_u64(77),
        &mut Stopwatch::new(),
        |m| lines.push(m.to_string()),
    )
    .unwrap();

    // Generation, baseline, then two strategies for each of three worker counts.
    assert_eq!(report.len(), 8);
    assert_eq!(lines.len(), 8);

    assert!(lines[0].starts_with("random array of 1024 values took "));
    assert!(lines[1].starts_with("non-thread sum took "));
    assert!(lines[2].starts_with("1 threads, sz = 1024, stride sum took "));
    assert!(lines[3].starts_with("1 threads, sz = 1024, batched sum took "));
    assert!(lines[6].starts_with("24 threads, sz = 1024, stride sum took "));
    assert!(lines[7].starts_with("24 threads, sz = 1024, batched sum took "));

    let baseline = report
        .measurements()
        .find_map(|m| match m {
            Measurement::Baseline { sum, .. } => Some(*sum),
            _ => None,
        })
        .unwrap();

    for measurement in report.measurements() {
        if let Measurement::Parallel { sum, .. } = measurement {
            assert_close(*sum, baseline);
        }
    }

    assert!(matches!(
        report.fastest_parallel(),
        Some(Measurement::Parallel { .. })
    ));
}
