//! End-to-end runs across generator, analyser, fitter, and evaluator.

use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;
use scalefree_core::{
    CollectingSink, ComparisonBuilder, Distribution, DistributionMode, GeneratorParams,
    KMinCandidates, PowerLawFitter, RandomGraphModel, SeedTopology, StatisticValue,
    build_random_graph, degree_sequence, distribution, generate_seeded, load,
};
use scalefree_test_support::tracing::record;

#[rstest]
fn generated_network_flows_through_the_analyser() {
    let params = GeneratorParams::new(2_000, 5, 2)
        .expect("parameters are valid")
        .with_rng_seed(2024);
    let graph = generate_seeded(&params).expect("growth succeeds");
    let sequence = degree_sequence(&graph);
    assert_eq!(sequence.total_degree(), 2 * graph.edge_count());

    let Distribution::ComplementaryCdf(ccdf) =
        distribution(&sequence, DistributionMode::ComplementaryCdf)
    else {
        panic!("requested the complementary CDF");
    };
    // Every grown node has degree at least two, and the seed clique has four.
    assert_eq!(ccdf.at(2), 1.0);
    assert!(ccdf.at(20) > 0.0);

    let fit = PowerLawFitter::new()
        .fit(&sequence.histogram())
        .expect("grown tail is rich");
    assert!((2.0..=3.5).contains(&fit.exponent), "exponent {}", fit.exponent);
    assert!(fit.k_min >= 2);
}

#[rstest]
fn random_baseline_is_poorly_described_by_a_power_law() {
    let mut rng = SmallRng::seed_from_u64(8);
    let graph = build_random_graph(2_000, RandomGraphModel::EdgeCount(4_000), &mut rng)
        .expect("model is valid");
    let histogram = degree_sequence(&graph).histogram();
    // A Poisson tail decays far faster than any heavy tail of the same mean.
    let fit = PowerLawFitter::new()
        .with_candidates(KMinCandidates::Explicit(vec![6]))
        .fit(&histogram)
        .expect("several degrees above six");
    assert!(fit.exponent > 4.5, "exponent {}", fit.exponent);
}

#[rstest]
fn path_seed_comparison_emits_spans_and_statistics() {
    let comparison = ComparisonBuilder::new()
        .with_sizes(500, 3, 2)
        .with_seed_topology(SeedTopology::Path)
        .with_seed(5)
        .build()
        .expect("configuration is valid");

    let (report, layer) = record(|| comparison.run());
    let report = report.expect("comparison runs");
    assert_eq!(report.scale_free_edges, 2 + 497 * 2);

    let span = layer.span("evaluator.compare").expect("comparison span closed");
    assert_eq!(span.fields.get("seed").map(String::as_str), Some("5"));
    assert!(layer.span("generator.generate").is_some());
    assert!(layer.span("random.build").is_some());
    assert!(layer.span("powerlaw.fit").is_some());

    let mut sink = CollectingSink::default();
    report.emit(&mut sink);
    assert_eq!(
        sink.get("scale_free", "edges"),
        Some(StatisticValue::Count(report.scale_free_edges))
    );
}

#[rstest]
fn loaded_generated_edges_reproduce_the_graph() {
    let params = GeneratorParams::new(300, 4, 3)
        .expect("parameters are valid")
        .with_rng_seed(77);
    let graph = generate_seeded(&params).expect("growth succeeds");
    let records = graph
        .edges()
        .map(|(left, right)| Ok((format!("n{left}"), format!("n{right}"))));
    let network = load(records).expect("edges load");

    assert_eq!(network.graph().edge_count(), graph.edge_count());
    assert_eq!(network.report().dropped(), 0);
    let mut loaded: Vec<usize> = network.degree_sequence().degrees().to_vec();
    let mut original: Vec<usize> = degree_sequence(&graph).degrees().to_vec();
    loaded.sort_unstable();
    original.sort_unstable();
    assert_eq!(loaded, original);
}
