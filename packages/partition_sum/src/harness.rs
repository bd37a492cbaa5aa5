use new_zealand::nz;
use rand::Rng;

use crate::report::speedup;
use crate::{
    BenchmarkConfig, Buffer, Measurement, Report, Result, Stopwatch, parallel_sum, sum_strided,
};

/// Executes a complete benchmark run as described by `config`.
///
/// The steps are, in order:
///
/// 1. Generate the random buffer using `rng`.
/// 1. Sum the buffer on the calling thread (the baseline).
/// 1. For each worker count, sum the buffer with each strategy.
///
/// Every step is timed with `stopwatch` and handed to `on_measurement` as soon as it completes,
/// before the next step starts. If a step fails, the run stops and that step is not reported.
///
/// # Errors
///
/// Returns an error if the buffer or the per-worker state cannot be allocated, or if a worker
/// thread cannot be started.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use nonempty::nonempty;
/// use partition_sum::{BenchmarkConfig, Stopwatch, run};
///
/// let config = BenchmarkConfig::default()
///     .with_array_len(1024)
///     .with_thread_counts(nonempty![nz!(2)]);
///
/// let report = run(&config, &mut rand::rng(), &mut Stopwatch::new(), |m| {
///     println!("{m}");
/// })
/// .unwrap();
///
/// // Generation, baseline, then strided and batched with 2 workers.
/// assert_eq!(report.len(), 4);
/// ```
pub fn run(
    config: &BenchmarkConfig,
    rng: &mut impl Rng,
    stopwatch: &mut Stopwatch,
    mut on_measurement: impl FnMut(&Measurement),
) -> Result<Report> {
    let mut report = Report::default();

    let mut record = |measurement: Measurement| {
        on_measurement(&measurement);
        report.push(measurement);
    };

    let (elapsed, buffer) = stopwatch
        .measure(|| Buffer::generate(config.array_len(), rng))
        .transpose()?
        .into_parts();

    record(Measurement::Generation {
        len: buffer.len(),
        elapsed,
    });

    let values = buffer.as_slice();

    let (baseline_elapsed, baseline_sum) = stopwatch
        .measure(|| sum_strided(values, 0, nz!(1), values.len()))
        .into_parts();

    record(Measurement::Baseline {
        elapsed: baseline_elapsed,
        sum: baseline_sum,
    });

    for &worker_count in config.thread_counts().iter() {
        for &strategy in config.strategies().iter() {
            let (elapsed, sum) = stopwatch
                .measure(|| parallel_sum(values, worker_count, strategy))
                .transpose()?
                .into_parts();

            record(Measurement::Parallel {
                worker_count,
                strategy,
                len: values.len(),
                elapsed,
                sum,
                speedup: speedup(baseline_elapsed, elapsed),
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::{Duration, Instant};

    use nonempty::nonempty;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::PartitionStrategy;
    use crate::pal::MockTimeSource;

    const TICK: Duration = Duration::from_millis(10);

    /// A stopwatch whose clock advances by `TICK` on every read, so every measurement
    /// takes exactly one tick.
    fn ticking_stopwatch() -> Stopwatch {
        let base = Instant::now();
        let mut ticks: u32 = 0;

        let mut time_source = MockTimeSource::new();

        time_source.expect_now().returning(move || {
            ticks = ticks.checked_add(1).unwrap();
            base.checked_add(TICK.checked_mul(ticks).unwrap()).unwrap()
        });

        Stopwatch::from_time_source(time_source)
    }

    #[test]
    fn steps_are_reported_in_order() {
        let config = BenchmarkConfig::default()
            .with_array_len(1024)
            .with_thread_counts(nonempty![nz!(1), nz!(4)]);

        let mut observed = Vec::new();

        let report = run(
            &config,
            &mut StdRng::seed_from_u64(3),
            &mut ticking_stopwatch(),
            |m| observed.push(m.clone()),
        )
        .unwrap();

        assert_eq!(report.measurements().cloned().collect::<Vec<_>>(), observed);

        let steps: Vec<_> = observed
            .iter()
            .map(|m| match m {
                Measurement::Generation { .. } => "generation".to_string(),
                Measurement::Baseline { .. } => "baseline".to_string(),
                Measurement::Parallel {
                    worker_count,
                    strategy,
                    ..
                } => format!("{worker_count} {strategy}"),
            })
            .collect();

        assert_eq!(
            steps,
            [
                "generation",
                "baseline",
                "1 stride",
                "1 batched",
                "4 stride",
                "4 batched"
            ]
        );
    }

    #[test]
    fn every_step_is_timed_separately() {
        let config = BenchmarkConfig::default()
            .with_array_len(256)
            .with_thread_counts(nonempty![nz!(2), nz!(3)]);

        let report = run(
            &config,
            &mut StdRng::seed_from_u64(4),
            &mut ticking_stopwatch(),
            |_| {},
        )
        .unwrap();

        for measurement in report.measurements() {
            assert_eq!(measurement.elapsed(), TICK);

            if let Measurement::Parallel { speedup, len, .. } = measurement {
                assert_eq!(*len, 256);
                assert!((speedup.unwrap() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn sums_agree_with_baseline() {
        let config = BenchmarkConfig::default()
            .with_array_len(4096)
            .with_thread_counts(nonempty![nz!(1), nz!(3), nz!(8)]);

        let report = run(
            &config,
            &mut StdRng::seed_from_u64(5),
            &mut Stopwatch::new(),
            |_| {},
        )
        .unwrap();

        let sums: Vec<f32> = report.measurements().filter_map(Measurement::sum).collect();
        let (baseline, parallel) = sums.split_first().unwrap();

        // Baseline plus two strategies for each of three worker counts.
        assert_eq!(parallel.len(), 6);

        for sum in parallel {
            assert!((sum - baseline).abs() <= 1e-3 * baseline.abs().max(1.0));
        }
    }

    #[test]
    fn empty_array_sums_to_zero_everywhere() {
        let config = BenchmarkConfig::default()
            .with_array_len(0)
            .with_thread_counts(nonempty![nz!(1), nz!(5)])
            .with_strategies(nonempty![
                PartitionStrategy::Batched,
                PartitionStrategy::Strided
            ]);

        let report = run(
            &config,
            &mut StdRng::seed_from_u64(6),
            &mut ticking_stopwatch(),
            |_| {},
        )
        .unwrap();

        assert_eq!(report.len(), 6);

        for sum in report.measurements().filter_map(Measurement::sum) {
            assert_eq!(sum.to_bits(), 0.0_f32.to_bits());
        }
    }

    #[test]
    fn failed_generation_reports_nothing() {
        let config = BenchmarkConfig::default().with_array_len(usize::MAX);

        let mut observed = 0_usize;

        let result = run(
            &config,
            &mut StdRng::seed_from_u64(7),
            &mut ticking_stopwatch(),
            |_| observed = observed.checked_add(1).unwrap(),
        );

        assert!(matches!(
            result,
            Err(crate::Error::AllocationFailure { .. })
        ));
        assert_eq!(observed, 0);
    }
}
