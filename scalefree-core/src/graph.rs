//! Simple undirected graph over dense node identifiers.

use crate::{Result, error::ScaleFreeError};

/// Undirected graph without self-loops or parallel edges.
///
/// Nodes are the dense integers `0..node_count()`; the node set is fixed at
/// construction and only edges are added afterwards.
///
/// # Examples
/// ```
/// use scalefree_core::Graph;
///
/// let mut graph = Graph::new(3);
/// graph.add_edge(0, 1)?;
/// graph.add_edge(2, 1)?;
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.degree(1), Some(2));
/// assert!(graph.add_edge(1, 0).is_err());
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `node_count` isolated nodes.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edge_count: 0,
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.adjacency.len() }

    /// Returns the number of undirected edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns the degree of `node`, or `None` when it is out of range.
    #[must_use]
    pub fn degree(&self, node: usize) -> Option<usize> {
        self.adjacency.get(node).map(Vec::len)
    }

    /// Returns the neighbours of `node` in insertion order.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> Option<&[usize]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    /// Returns `true` when an edge joins `left` and `right`.
    ///
    /// Only the shorter adjacency list is scanned, so checks against hubs
    /// stay cheap while the other endpoint is a fresh node.
    #[must_use]
    pub fn contains_edge(&self, left: usize, right: usize) -> bool {
        let (Some(a), Some(b)) = (self.adjacency.get(left), self.adjacency.get(right)) else {
            return false;
        };
        if a.len() <= b.len() {
            a.contains(&right)
        } else {
            b.contains(&left)
        }
    }

    /// Adds the undirected edge `{left, right}`.
    ///
    /// # Errors
    /// Returns [`ScaleFreeError::NodeOutOfRange`] for an unknown endpoint,
    /// [`ScaleFreeError::SelfLoop`] when both endpoints match, and
    /// [`ScaleFreeError::DuplicateEdge`] when the edge already exists.
    pub fn add_edge(&mut self, left: usize, right: usize) -> Result<()> {
        let node_count = self.node_count();
        for node in [left, right] {
            if node >= node_count {
                return Err(ScaleFreeError::NodeOutOfRange { node, node_count });
            }
        }
        if left == right {
            return Err(ScaleFreeError::SelfLoop { node: left });
        }
        if self.contains_edge(left, right) {
            return Err(ScaleFreeError::DuplicateEdge {
                left: left.min(right),
                right: left.max(right),
            });
        }
        self.adjacency[left].push(right);
        self.adjacency[right].push(left);
        self.edge_count += 1;
        Ok(())
    }

    /// Iterates every edge once in canonical `(smaller, larger)` form.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(node, neighbours)| {
                neighbours
                    .iter()
                    .filter(move |&&other| node < other)
                    .map(move |&other| (node, other))
            })
    }

    /// Counts connected components with an iterative traversal.
    #[must_use]
    pub fn component_count(&self) -> usize {
        let mut visited = vec![false; self.node_count()];
        let mut stack = Vec::new();
        let mut components = 0;
        for start in 0..self.node_count() {
            if visited[start] {
                continue;
            }
            components += 1;
            visited[start] = true;
            stack.push(start);
            while let Some(node) = stack.pop() {
                for &next in &self.adjacency[node] {
                    if !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }
        }
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn add_edge_updates_both_endpoints() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 3).expect("edge must be accepted");
        assert_eq!(graph.neighbours(0), Some(&[3][..]));
        assert_eq!(graph.neighbours(3), Some(&[0][..]));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge(3, 0));
    }

    #[rstest]
    #[case::self_loop(1, 1, ScaleFreeError::SelfLoop { node: 1 })]
    #[case::out_of_range(0, 9, ScaleFreeError::NodeOutOfRange { node: 9, node_count: 3 })]
    #[case::duplicate(2, 0, ScaleFreeError::DuplicateEdge { left: 0, right: 2 })]
    fn add_edge_rejects_invalid_edges(
        #[case] left: usize,
        #[case] right: usize,
        #[case] expected: ScaleFreeError,
    ) {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 2).expect("seed edge must be accepted");
        let err = graph.add_edge(left, right).expect_err("edge must be rejected");
        assert_eq!(err, expected);
        assert_eq!(graph.edge_count(), 1);
    }

    #[rstest]
    fn edges_are_canonical_and_unique() {
        let mut graph = Graph::new(4);
        for (a, b) in [(3, 0), (1, 2), (2, 3)] {
            graph.add_edge(a, b).expect("edge must be accepted");
        }
        let mut edges: Vec<_> = graph.edges().collect();
        edges.sort_unstable();
        assert_eq!(edges, vec![(0, 3), (1, 2), (2, 3)]);
    }

    #[rstest]
    #[case(0, &[], 0)]
    #[case(3, &[], 3)]
    #[case(4, &[(0, 1), (2, 3)], 2)]
    #[case(4, &[(0, 1), (1, 2), (2, 3)], 1)]
    fn component_count_matches_structure(
        #[case] nodes: usize,
        #[case] edges: &[(usize, usize)],
        #[case] expected: usize,
    ) {
        let mut graph = Graph::new(nodes);
        for &(a, b) in edges {
            graph.add_edge(a, b).expect("edge must be accepted");
        }
        assert_eq!(graph.component_count(), expected);
    }
}
