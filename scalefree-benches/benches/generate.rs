//! Preferential-attachment growth benchmarks.
//!
//! Measures end-to-end network growth, seed construction included, across
//! final sizes and attachment counts.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use scalefree_benches::{error::BenchSetupError, params::GenerateBenchParams};
use scalefree_core::{GeneratorParams, generate_seeded};

/// Seed used for every grown network in this benchmark.
const SEED: u64 = 42;

/// Seed-network size.
const INITIAL_SIZE: usize = 5;

/// Final network sizes to benchmark.
const FINAL_SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Edges attached per new node.
const EDGES_PER_STEP: &[usize] = &[2, 5];

fn generate_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);

    for &final_size in FINAL_SIZES {
        for &edges_per_step in EDGES_PER_STEP {
            let generator =
                GeneratorParams::new(final_size, INITIAL_SIZE, edges_per_step)?.with_rng_seed(SEED);
            let bench_params = GenerateBenchParams {
                final_size,
                edges_per_step,
            };
            group.bench_with_input(
                BenchmarkId::from_parameter(&bench_params),
                &generator,
                |b, prepared| b.iter(|| generate_seeded(prepared)),
            );
        }
    }

    group.finish();
    Ok(())
}

fn generate(c: &mut Criterion) {
    if let Err(err) = generate_impl(c) {
        panic!("generate benchmark setup failed: {err}");
    }
}

criterion_group!(benches, generate);
criterion_main!(benches);
