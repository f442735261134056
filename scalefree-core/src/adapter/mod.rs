//! Conversion of real interaction data into dense graphs.
//!
//! Records carry arbitrary identifiers. The adapter assigns dense node
//! indices in first-seen order, drops self-loops and repeated interactions,
//! and counts rows a reader could not decode instead of failing on them.

mod catalog;

use std::{collections::HashMap, fmt, hash::Hash};

use tracing::{debug, instrument, warn};

use crate::{
    DegreeSequence, Graph, Result, StatisticValue, StatisticsSink, degree_sequence,
    error::ScaleFreeError,
};

pub use self::catalog::InteractionCatalog;

/// Why a record could not be turned into an edge.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MalformedReason {
    /// An endpoint field was empty.
    MissingEndpoint,
    /// The group field was empty.
    MissingGroup,
    /// The line was not valid UTF-8.
    InvalidEncoding,
    /// The row had fewer columns than the format needs.
    TooFewColumns {
        /// Columns the format reads from.
        required: usize,
        /// Columns the row actually had.
        found: usize,
    },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoint => f.write_str("empty interactor field"),
            Self::MissingGroup => f.write_str("empty group field"),
            Self::InvalidEncoding => f.write_str("line is not valid UTF-8"),
            Self::TooFewColumns { required, found } => {
                write!(f, "expected at least {required} columns, found {found}")
            }
        }
    }
}

/// A record the reader could not decode.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MalformedRecord {
    /// One-based source line, when the reader knows it.
    pub line: Option<usize>,
    /// What was wrong with the record.
    pub reason: MalformedReason,
}

impl MalformedRecord {
    /// Creates a record for `line` failing with `reason`.
    #[must_use]
    pub const fn new(line: Option<usize>, reason: MalformedReason) -> Self {
        Self { line, reason }
    }
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

/// Counts describing how a record stream was ingested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LoadReport {
    /// Edges added to the graph.
    pub accepted_edges: usize,
    /// Records the reader could not decode.
    pub malformed_records: usize,
    /// Records whose endpoints were the same identifier.
    pub self_loops: usize,
    /// Records repeating an interaction already seen, in either orientation.
    pub duplicate_edges: usize,
}

impl LoadReport {
    /// Returns the number of records that did not become edges.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.malformed_records + self.self_loops + self.duplicate_edges
    }

    fn absorb(&mut self, other: &Self) {
        self.accepted_edges += other.accepted_edges;
        self.malformed_records += other.malformed_records;
        self.self_loops += other.self_loops;
        self.duplicate_edges += other.duplicate_edges;
    }

    /// Hands the counts to `sink` under `scope`.
    pub fn emit<S: StatisticsSink>(&self, scope: &str, mut sink: S) {
        sink.record(scope, "accepted_edges", StatisticValue::Count(self.accepted_edges));
        sink.record(scope, "malformed_records", StatisticValue::Count(self.malformed_records));
        sink.record(scope, "self_loops", StatisticValue::Count(self.self_loops));
        sink.record(scope, "duplicate_edges", StatisticValue::Count(self.duplicate_edges));
    }
}

/// A graph built from external identifiers together with its identifier
/// table and ingestion counts.
#[derive(Clone, Debug)]
pub struct LoadedNetwork<K> {
    graph: Graph,
    identifiers: Vec<K>,
    index: HashMap<K, usize>,
    report: LoadReport,
}

impl<K: Eq + Hash> LoadedNetwork<K> {
    /// Returns the dense graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// Returns the identifiers indexed by node id.
    #[must_use]
    #[rustfmt::skip]
    pub fn identifiers(&self) -> &[K] { &self.identifiers }

    /// Returns the ingestion counts.
    #[must_use]
    #[rustfmt::skip]
    pub fn report(&self) -> &LoadReport { &self.report }

    /// Returns the node id assigned to `identifier`.
    #[must_use]
    pub fn node_of(&self, identifier: &K) -> Option<usize> {
        self.index.get(identifier).copied()
    }

    /// Returns the degree sequence of the graph.
    #[must_use]
    pub fn degree_sequence(&self) -> DegreeSequence {
        degree_sequence(&self.graph)
    }

    /// Returns up to `count` identifiers with the highest degree, ties broken
    /// by first appearance.
    #[must_use]
    pub fn highest_degree(&self, count: usize) -> Vec<(&K, usize)> {
        self.degree_sequence()
            .highest_degree_nodes(count)
            .into_iter()
            .filter_map(|(node, degree)| self.identifiers.get(node).map(|id| (id, degree)))
            .collect()
    }

    /// Splits the network into graph, identifier table, and report.
    #[must_use]
    pub fn into_parts(self) -> (Graph, Vec<K>, LoadReport) {
        (self.graph, self.identifiers, self.report)
    }
}

/// Builds a dense graph from decoded edge records.
///
/// # Errors
/// Only graph invariant violations propagate; bad records are counted in the
/// returned [`LoadReport`].
///
/// # Examples
/// ```
/// use scalefree_core::{MalformedReason, MalformedRecord, load};
///
/// let records = vec![
///     Ok(("a", "b")),
///     Ok(("b", "a")),
///     Ok(("c", "c")),
///     Err(MalformedRecord::new(Some(4), MalformedReason::MissingEndpoint)),
///     Ok(("b", "c")),
/// ];
/// let network = load(records)?;
/// assert_eq!(network.identifiers(), &["a", "b", "c"]);
/// assert_eq!(network.graph().edge_count(), 2);
/// assert_eq!(network.report().dropped(), 3);
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[instrument(name = "adapter.load", err, skip(records))]
pub fn load<K, I>(records: I) -> Result<LoadedNetwork<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = core::result::Result<(K, K), MalformedRecord>>,
{
    let mut builder = NetworkBuilder::default();
    for record in records {
        builder.push(record);
    }
    let network = builder.finish()?;
    log_report(network.report());
    Ok(network)
}

fn log_report(report: &LoadReport) {
    if report.dropped() > 0 {
        warn!(
            accepted = report.accepted_edges,
            malformed = report.malformed_records,
            self_loops = report.self_loops,
            duplicates = report.duplicate_edges,
            "dropped records while loading network"
        );
    } else {
        debug!(accepted = report.accepted_edges, "network loaded");
    }
}

/// Accumulates records before the node count is known.
struct NetworkBuilder<K> {
    identifiers: Vec<K>,
    index: HashMap<K, usize>,
    edges: Vec<(usize, usize)>,
    report: LoadReport,
}

impl<K> Default for NetworkBuilder<K> {
    fn default() -> Self {
        Self {
            identifiers: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            report: LoadReport::default(),
        }
    }
}

impl<K: Eq + Hash + Clone> NetworkBuilder<K> {
    fn push(&mut self, record: core::result::Result<(K, K), MalformedRecord>) {
        match record {
            Err(malformed) => {
                debug!(record = %malformed, "skipping malformed record");
                self.report.malformed_records += 1;
            }
            Ok((left, right)) if left == right => self.report.self_loops += 1,
            Ok((left, right)) => {
                let edge = (self.intern(left), self.intern(right));
                self.edges.push(edge);
            }
        }
    }

    fn intern(&mut self, identifier: K) -> usize {
        if let Some(&node) = self.index.get(&identifier) {
            return node;
        }
        let node = self.identifiers.len();
        self.index.insert(identifier.clone(), node);
        self.identifiers.push(identifier);
        node
    }

    fn finish(self) -> Result<LoadedNetwork<K>> {
        let mut report = self.report;
        let mut graph = Graph::new(self.identifiers.len());
        for (left, right) in self.edges {
            match graph.add_edge(left, right) {
                Ok(()) => report.accepted_edges += 1,
                Err(ScaleFreeError::DuplicateEdge { .. }) => report.duplicate_edges += 1,
                Err(err) => return Err(err),
            }
        }
        Ok(LoadedNetwork {
            graph,
            identifiers: self.identifiers,
            index: self.index,
            report,
        })
    }
}

#[cfg(test)]
mod tests;
