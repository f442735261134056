use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use super::*;
use crate::{ScaleFreeError, generate, test_utils::suite_proptest_config};

fn star(leaves: usize) -> Graph {
    let mut graph = Graph::new(leaves + 1);
    for leaf in 1..=leaves {
        graph.add_edge(0, leaf).expect("star edges are simple");
    }
    graph
}

#[rstest]
fn star_degree_sequence_and_histogram() {
    let sequence = degree_sequence(&star(4));
    assert_eq!(sequence.degrees(), &[4, 1, 1, 1, 1]);
    assert_eq!(sequence.max_degree(), 4);
    assert!((sequence.mean_degree() - 1.6).abs() < 1e-12);

    let histogram = sequence.histogram();
    assert_eq!(histogram.counts(), &[0, 4, 0, 0, 1]);
    assert_eq!(histogram.node_count(), 5);
    assert_eq!(histogram.max_degree(), 4);
    assert_eq!(histogram.distinct_degrees_from(1), 2);
    assert_eq!(histogram.distinct_degrees_from(2), 1);
    assert_eq!(histogram.observed().collect::<Vec<_>>(), vec![(1, 4), (4, 1)]);
}

#[rstest]
fn isolated_nodes_count_at_degree_zero() {
    let sequence = degree_sequence(&Graph::new(3));
    let histogram = sequence.histogram();
    assert_eq!(histogram.counts(), &[3]);
    assert_eq!(histogram.complementary_cdf().probabilities(), &[1.0]);
}

#[rstest]
fn empty_sequence_yields_unit_distributions() {
    let histogram = DegreeSequence::default().histogram();
    assert_eq!(histogram.normalized(), vec![1.0]);
    assert_eq!(histogram.complementary_cdf().probabilities(), &[1.0]);
    assert_eq!(DegreeSequence::default().mean_degree(), 0.0);
}

#[rstest]
fn normalized_histogram_sums_to_one() {
    let histogram = DegreeSequence::from_degrees(vec![1, 2, 2, 3, 3, 3]).histogram();
    let normalized = histogram.normalized();
    assert!((normalized.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    assert!((normalized[3] - 0.5).abs() < 1e-12);
}

#[rstest]
fn from_counts_matches_sequence_histogram() {
    let histogram = DegreeHistogram::from_counts(vec![0, 2, 1]);
    assert_eq!(
        histogram,
        DegreeSequence::from_degrees(vec![1, 2, 1]).histogram()
    );
    assert_eq!(histogram.count(9), 0);
    assert_eq!(DegreeHistogram::from_counts(Vec::new()).counts(), &[0]);
}

#[rstest]
fn highest_degree_nodes_break_ties_by_id() {
    let sequence = DegreeSequence::from_degrees(vec![2, 5, 3, 5, 1]);
    assert_eq!(sequence.highest_degree_nodes(3), vec![(1, 5), (3, 5), (2, 3)]);
    assert_eq!(sequence.highest_degree_nodes(10).len(), 5);
}

#[rstest]
#[case::histogram(DistributionMode::Histogram)]
#[case::ccdf(DistributionMode::ComplementaryCdf)]
fn distribution_reports_its_mode(#[case] mode: DistributionMode) {
    let sequence = degree_sequence(&star(3));
    let dist = distribution(&sequence, mode);
    assert_eq!(dist.mode(), mode);
    assert_eq!(dist.rows().len(), 4);
}

#[rstest]
fn ccdf_beyond_max_degree_is_zero() {
    let ccdf = degree_sequence(&star(2)).histogram().complementary_cdf();
    assert_eq!(ccdf.at(0), 1.0);
    assert!((ccdf.at(2) - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(ccdf.at(3), 0.0);
}

#[rstest]
fn theoretical_power_law_is_normalised() {
    let law = theoretical_power_law(50, 2.5).expect("finite exponent");
    assert_eq!(law.len(), 51);
    assert_eq!(law[0], 0.0);
    assert!((law.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    assert!(law.windows(2).skip(1).all(|pair| pair[0] > pair[1]));
    assert_eq!(theoretical_power_law(0, 2.0).expect("finite exponent"), vec![0.0]);
}

#[rstest]
#[case::nan(f64::NAN)]
#[case::infinite(f64::INFINITY)]
fn theoretical_power_law_rejects_non_finite_exponents(#[case] exponent: f64) {
    let err = theoretical_power_law(5, exponent).expect_err("exponent must be finite");
    assert!(matches!(err, ScaleFreeError::InvalidParameters { .. }));
}

#[rstest]
fn histogram_ks_distance_compares_common_prefix() {
    assert_eq!(
        histogram_ks_distance(&[0.2, 0.3, 0.5], &[0.2, 0.3, 0.5]).expect("non-empty"),
        0.0
    );
    let distance = histogram_ks_distance(&[0.0, 1.0], &[0.25, 0.25, 0.5]).expect("non-empty");
    assert!((distance - 0.5).abs() < 1e-12);
    assert!(histogram_ks_distance(&[], &[1.0]).is_err());
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn ccdf_is_non_increasing_from_one(degrees in prop::collection::vec(0_usize..50, 1..200)) {
        let sequence = DegreeSequence::from_degrees(degrees);
        let ccdf = sequence.histogram().complementary_cdf();
        let probabilities = ccdf.probabilities();
        prop_assert_eq!(probabilities[0], 1.0);
        prop_assert_eq!(probabilities.len(), sequence.max_degree() + 1);
        prop_assert!(probabilities.windows(2).all(|pair| pair[0] >= pair[1]));
        prop_assert!(probabilities.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn generated_degree_sum_is_twice_edge_count(
        extra in 1_usize..300,
        edges_per_step in 1_usize..=3,
        seed in any::<u64>(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let graph = generate(3 + extra, 3, edges_per_step, &mut rng).expect("valid parameters");
        let sequence = degree_sequence(&graph);
        prop_assert_eq!(sequence.total_degree(), 2 * graph.edge_count());
        prop_assert_eq!(sequence.histogram().node_count(), graph.node_count());
    }
}
