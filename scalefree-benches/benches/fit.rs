//! Power-law fitting benchmarks.
//!
//! Compares a full scan over every observed `k_min` with a fit at a single
//! known `k_min`, on histograms drawn from the reference power law.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use scalefree_benches::{
    error::BenchSetupError, fixtures::power_law_histogram, params::FitBenchParams,
};
use scalefree_core::{KMinCandidates, PowerLawFitter};

/// Seed used for all reference samples in this benchmark.
const SEED: u64 = 42;

/// Minimum degree of the reference power law.
const K_MIN: usize = 5;

/// Sample sizes to benchmark.
const SAMPLE_COUNTS: &[usize] = &[1_000, 10_000, 100_000];

fn fit_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("powerlaw_fit");
    group.sample_size(20);

    let full_scan = PowerLawFitter::new();
    let fixed = PowerLawFitter::new().with_candidates(KMinCandidates::Explicit(vec![K_MIN]));

    for &sample_count in SAMPLE_COUNTS {
        let bench_params = FitBenchParams {
            sample_count,
            k_min: K_MIN,
        };
        let histogram = power_law_histogram(&bench_params, SEED)?;
        group.bench_with_input(
            BenchmarkId::new("full_scan", &bench_params),
            &histogram,
            |b, prepared| b.iter(|| full_scan.fit(prepared)),
        );
        group.bench_with_input(
            BenchmarkId::new("fixed_k_min", &bench_params),
            &histogram,
            |b, prepared| b.iter(|| fixed.fit(prepared)),
        );
    }

    group.finish();
    Ok(())
}

fn fit(c: &mut Criterion) {
    if let Err(err) = fit_impl(c) {
        panic!("fit benchmark setup failed: {err}");
    }
}

criterion_group!(benches, fit);
criterion_main!(benches);
