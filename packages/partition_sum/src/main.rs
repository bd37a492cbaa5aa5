#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Compares strided and batched multithreaded summation of a large random array.
//!
//! The array size and the worker counts are fixed at build time. One line is printed per
//! measurement as soon as it completes.

use std::process::ExitCode;

use partition_sum::{BenchmarkConfig, Measurement, Stopwatch, run};

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    let config = BenchmarkConfig::default();

    let result = run(
        &config,
        &mut rand::rng(),
        &mut Stopwatch::new(),
        |measurement| println!("{measurement}"),
    );

    match result {
        Ok(report) => {
            if let Some(Measurement::Parallel {
                worker_count,
                strategy,
                ..
            }) = report.fastest_parallel()
            {
                println!("fastest: {worker_count} threads, {strategy}");
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
