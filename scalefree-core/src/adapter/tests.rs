use rstest::rstest;
use scalefree_test_support::tracing::record;
use tracing::Level;

use super::*;
use crate::CollectingSink;

fn malformed(line: usize) -> MalformedRecord {
    MalformedRecord::new(
        Some(line),
        MalformedReason::TooFewColumns {
            required: 2,
            found: 1,
        },
    )
}

#[rstest]
fn one_malformed_record_is_counted_and_the_rest_ingested() {
    let records = vec![
        Ok(("p1".to_owned(), "p2".to_owned())),
        Ok(("p2".to_owned(), "p3".to_owned())),
        Err(malformed(3)),
        Ok(("p3".to_owned(), "p4".to_owned())),
    ];
    let (network, layer) = record(|| load(records));
    let network = network.expect("records load");

    assert_eq!(network.graph().node_count(), 4);
    assert_eq!(network.graph().edge_count(), 3);
    assert_eq!(
        *network.report(),
        LoadReport {
            accepted_edges: 3,
            malformed_records: 1,
            self_loops: 0,
            duplicate_edges: 0,
        }
    );

    let warnings: Vec<_> = layer
        .events()
        .into_iter()
        .filter(|event| event.level == Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].fields.get("malformed").map(String::as_str), Some("1"));
    assert!(layer.span("adapter.load").is_some());
}

#[rstest]
fn identifiers_are_dense_in_first_seen_order() {
    let network = load(vec![Ok((30, 10)), Ok((10, 20)), Ok((40, 30))]).expect("records load");
    assert_eq!(network.identifiers(), &[30, 10, 20, 40]);
    assert_eq!(network.node_of(&20), Some(2));
    assert_eq!(network.node_of(&99), None);
    assert!(network.graph().contains_edge(0, 1));
}

#[rstest]
fn self_loops_and_reversed_duplicates_are_dropped() {
    let network = load(vec![
        Ok(("a", "b")),
        Ok(("b", "a")),
        Ok(("a", "b")),
        Ok(("z", "z")),
    ])
    .expect("records load");
    let report = *network.report();
    assert_eq!(report.accepted_edges, 1);
    assert_eq!(report.duplicate_edges, 2);
    assert_eq!(report.self_loops, 1);
    assert_eq!(report.dropped(), 3);
    // A self-loop alone does not introduce a node.
    assert_eq!(network.identifiers(), &["a", "b"]);
}

#[rstest]
fn degree_sum_is_twice_accepted_edges() {
    let records: Vec<_> = (0..200_u32)
        .map(|i| Ok((i % 17, (i * 7 + 3) % 31)))
        .collect();
    let network = load(records).expect("records load");
    let sequence = network.degree_sequence();
    assert_eq!(sequence.total_degree(), 2 * network.report().accepted_edges);
    assert_eq!(network.report().accepted_edges, network.graph().edge_count());
}

#[rstest]
fn clean_input_logs_no_warning() {
    let (network, layer) = record(|| load(vec![Ok((1, 2)), Ok((2, 3))]));
    assert!(network.is_ok());
    assert!(layer.events().iter().all(|event| event.level != Level::WARN));
}

#[rstest]
fn highest_degree_maps_back_to_identifiers() {
    let network = load(vec![
        Ok(("hub", "a")),
        Ok(("hub", "b")),
        Ok(("hub", "c")),
        Ok(("a", "b")),
    ])
    .expect("records load");
    assert_eq!(network.highest_degree(2), vec![(&"hub", 3), (&"a", 2)]);
    let (graph, identifiers, report) = network.into_parts();
    assert_eq!(graph.node_count(), identifiers.len());
    assert_eq!(report.accepted_edges, 4);
}

#[rstest]
fn report_emits_every_count() {
    let report = LoadReport {
        accepted_edges: 5,
        malformed_records: 1,
        self_loops: 2,
        duplicate_edges: 3,
    };
    let mut sink = CollectingSink::default();
    report.emit("load", &mut sink);
    assert_eq!(sink.entries().len(), 4);
    assert_eq!(
        sink.get("load", "self_loops"),
        Some(StatisticValue::Count(2))
    );
}

#[rstest]
#[case(MalformedRecord::new(Some(7), MalformedReason::MissingEndpoint), "line 7: empty interactor field")]
#[case(MalformedRecord::new(Some(2), MalformedReason::InvalidEncoding), "line 2: line is not valid UTF-8")]
#[case(
    MalformedRecord::new(None, MalformedReason::TooFewColumns { required: 9, found: 3 }),
    "expected at least 9 columns, found 3"
)]
fn malformed_records_render_for_logs(#[case] record: MalformedRecord, #[case] expected: &str) {
    assert_eq!(record.to_string(), expected);
}

mod catalog {
    use super::*;

    fn catalog() -> InteractionCatalog<String, String> {
        let rows = [
            ("9606", "TP53", "MDM2"),
            ("4932", "CDC28", "CLN2"),
            ("9606", "TP53", "BRCA1"),
            ("9606", "MDM2", "TP53"),
            ("7227", "a", "b"),
            ("4932", "CDC28", "CLB2"),
            ("9606", "BRCA1", "BARD1"),
        ];
        let mut records: Vec<core::result::Result<(String, String, String), MalformedRecord>> =
            rows.iter()
                .map(|&(g, a, b)| Ok((g.to_owned(), a.to_owned(), b.to_owned())))
                .collect();
        records.push(Err(MalformedRecord::new(Some(9), MalformedReason::MissingGroup)));
        InteractionCatalog::from_records(records).expect("records load")
    }

    #[rstest]
    fn groups_keep_first_seen_order() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        let groups: Vec<&str> = catalog.groups().map(String::as_str).collect();
        assert_eq!(groups, vec!["9606", "4932", "7227"]);
    }

    #[rstest]
    fn largest_networks_are_sorted_by_interactions() {
        let catalog = catalog();
        let largest: Vec<(&str, usize)> = catalog
            .largest_networks(5)
            .into_iter()
            .map(|(group, size)| (group.as_str(), size))
            .collect();
        assert_eq!(largest, vec![("9606", 3), ("4932", 2), ("7227", 1)]);
        assert_eq!(catalog.largest_networks(1).len(), 1);
    }

    #[rstest]
    fn unknown_group_is_an_error() {
        let err = catalog()
            .network_size(&"10090".to_owned())
            .expect_err("group has no records");
        assert_eq!(
            err,
            ScaleFreeError::UnknownGroup {
                group: "10090".to_owned()
            }
        );
    }

    #[rstest]
    fn highest_degree_interactors_per_group() {
        let catalog = catalog();
        let top = catalog
            .highest_degree_interactors(&"9606".to_owned(), 2)
            .expect("group exists");
        let top: Vec<(&str, usize)> = top.into_iter().map(|(id, d)| (id.as_str(), d)).collect();
        assert_eq!(top, vec![("TP53", 2), ("BRCA1", 2)]);
    }

    #[rstest]
    fn total_report_includes_ungrouped_rows() {
        let report = catalog().total_report();
        assert_eq!(report.accepted_edges, 6);
        assert_eq!(report.duplicate_edges, 1);
        assert_eq!(report.malformed_records, 1);
    }
}
