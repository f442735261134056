//! Degree-proportional node sampling for preferential attachment.
//!
//! The sampler keeps a replication list in which every node appears once per
//! unit of weight. Drawing a uniform slot therefore selects a node with
//! probability proportional to its weight in O(1), and raising a weight is an
//! O(1) append.

use std::collections::HashSet;

use rand::{Rng, distributions::Distribution, distributions::WeightedIndex};
use tracing::debug;

use crate::{Result, error::ScaleFreeError};

/// Rejection attempts allowed per requested node before falling back to
/// explicit exclusion.
pub const REJECTION_ATTEMPTS_PER_DRAW: usize = 32;

/// Weighted node sampler backed by a replication list.
///
/// Every registered node carries at least one slot so it stays selectable
/// even before it has any edges.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::DegreeSampler;
///
/// let mut sampler = DegreeSampler::initialize(&[1, 2, 1]);
/// sampler.register(3, 2)?;
/// sampler.increment(0, 1)?;
/// assert_eq!(sampler.total_slots(), 8);
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let picked = sampler.sample_distinct(3, &mut rng)?;
/// assert_eq!(picked.len(), 3);
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DegreeSampler {
    slots: Vec<usize>,
    weights: Vec<usize>,
    registered: usize,
}

impl DegreeSampler {
    /// Seeds the sampler with nodes `0..seed_degrees.len()`.
    ///
    /// Each node receives `max(degree, 1)` slots.
    #[must_use]
    pub fn initialize(seed_degrees: &[usize]) -> Self {
        let mut sampler = Self::default();
        for (node, &degree) in seed_degrees.iter().enumerate() {
            sampler.push_node(node, degree);
        }
        sampler
    }

    /// Reserves room for `nodes` nodes and `slots` total slots.
    pub fn reserve(&mut self, nodes: usize, slots: usize) {
        self.weights.reserve(nodes);
        self.slots.reserve(slots);
    }

    /// Returns the number of registered nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.registered }

    /// Returns the length of the replication list.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_slots(&self) -> usize { self.slots.len() }

    /// Returns the slot weight of `node`, or `None` when it is unregistered.
    #[must_use]
    pub fn weight(&self, node: usize) -> Option<usize> {
        self.weights.get(node).copied().filter(|&weight| weight > 0)
    }

    /// Registers `node` with `max(initial_degree, 1)` slots.
    ///
    /// # Errors
    /// Returns [`ScaleFreeError::InvalidParameters`] when `node` is already
    /// registered.
    pub fn register(&mut self, node: usize, initial_degree: usize) -> Result<()> {
        if self.weight(node).is_some() {
            return Err(ScaleFreeError::invalid(format!(
                "node {node} is already registered with the sampler"
            )));
        }
        self.push_node(node, initial_degree);
        Ok(())
    }

    /// Adds `amount` slots for an already registered `node`.
    ///
    /// # Errors
    /// Returns [`ScaleFreeError::InvalidParameters`] when `node` is not
    /// registered.
    pub fn increment(&mut self, node: usize, amount: usize) -> Result<()> {
        let weight = self
            .weights
            .get_mut(node)
            .filter(|weight| **weight > 0)
            .ok_or_else(|| {
                ScaleFreeError::invalid(format!("node {node} is not registered with the sampler"))
            })?;
        *weight += amount;
        self.slots.extend(std::iter::repeat_n(node, amount));
        Ok(())
    }

    /// Draws `count` distinct nodes, each pick weighted by slot count.
    ///
    /// Duplicates are rejected for up to `count * REJECTION_ATTEMPTS_PER_DRAW`
    /// draws; any remaining picks come from a weighted draw over the nodes
    /// not chosen yet, so the call always terminates.
    ///
    /// # Errors
    /// Returns [`ScaleFreeError::InsufficientNodes`] when `count` exceeds the
    /// number of registered nodes.
    pub fn sample_distinct<R: Rng>(&self, count: usize, rng: &mut R) -> Result<Vec<usize>> {
        if count > self.registered || (count > 0 && self.slots.is_empty()) {
            return Err(ScaleFreeError::InsufficientNodes {
                requested: count,
                available: self.registered,
            });
        }

        let mut chosen = Vec::with_capacity(count);
        let budget = count.saturating_mul(REJECTION_ATTEMPTS_PER_DRAW);
        let mut attempts = 0_usize;
        while chosen.len() < count && attempts < budget {
            attempts += 1;
            let node = self.slots[rng.gen_range(0..self.slots.len())];
            if !chosen.contains(&node) {
                chosen.push(node);
            }
        }

        if chosen.len() < count {
            debug!(
                requested = count,
                drawn = chosen.len(),
                attempts,
                "rejection budget exhausted, sampling from exclusion set"
            );
            #[cfg(feature = "metrics")]
            metrics::counter!("scalefree_sampler_fallbacks").increment(1);
            self.fill_excluding(&mut chosen, count, rng)?;
        }
        Ok(chosen)
    }

    fn fill_excluding<R: Rng>(
        &self,
        chosen: &mut Vec<usize>,
        count: usize,
        rng: &mut R,
    ) -> Result<()> {
        let excluded: HashSet<usize> = chosen.iter().copied().collect();
        let mut candidates: Vec<(usize, usize)> = self
            .weights
            .iter()
            .enumerate()
            .filter(|&(node, &weight)| weight > 0 && !excluded.contains(&node))
            .map(|(node, &weight)| (node, weight))
            .collect();

        while chosen.len() < count {
            let insufficient = || ScaleFreeError::InsufficientNodes {
                requested: count,
                available: self.registered,
            };
            let index = WeightedIndex::<usize>::new(candidates.iter().map(|&(_, weight)| weight))
                .map_err(|_| insufficient())?
                .sample(rng);
            let (node, _) = candidates.swap_remove(index);
            chosen.push(node);
        }
        Ok(())
    }

    fn push_node(&mut self, node: usize, degree: usize) {
        let weight = degree.max(1);
        if self.weights.len() <= node {
            self.weights.resize(node + 1, 0);
        }
        self.weights[node] = weight;
        self.registered += 1;
        self.slots.extend(std::iter::repeat_n(node, weight));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use crate::test_utils::suite_proptest_config;

    #[rstest]
    fn initialize_gives_isolated_nodes_one_slot() {
        let sampler = DegreeSampler::initialize(&[0, 3, 1]);
        assert_eq!(sampler.node_count(), 3);
        assert_eq!(sampler.weight(0), Some(1));
        assert_eq!(sampler.weight(1), Some(3));
        assert_eq!(sampler.total_slots(), 5);
    }

    #[rstest]
    fn sample_distinct_rejects_oversized_requests() {
        let sampler = DegreeSampler::initialize(&[1, 2, 1]);
        let mut rng = SmallRng::seed_from_u64(3);
        let err = sampler
            .sample_distinct(5, &mut rng)
            .expect_err("five of three nodes must fail");
        assert_eq!(
            err,
            ScaleFreeError::InsufficientNodes {
                requested: 5,
                available: 3
            }
        );
    }

    #[rstest]
    fn sample_distinct_zero_is_empty() {
        let sampler = DegreeSampler::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let picked = sampler.sample_distinct(0, &mut rng).expect("zero draws succeed");
        assert!(picked.is_empty());
    }

    #[rstest]
    fn register_rejects_duplicates_and_increment_rejects_unknown() {
        let mut sampler = DegreeSampler::initialize(&[1]);
        assert!(matches!(
            sampler.register(0, 4),
            Err(ScaleFreeError::InvalidParameters { .. })
        ));
        assert!(matches!(
            sampler.increment(7, 1),
            Err(ScaleFreeError::InvalidParameters { .. })
        ));
        sampler.register(7, 0).expect("sparse ids are accepted");
        sampler.increment(7, 2).expect("registered node accepts increments");
        assert_eq!(sampler.weight(7), Some(3));
        assert_eq!(sampler.weight(4), None);
    }

    #[rstest]
    fn exhausting_every_node_falls_back_to_exclusion() {
        // One node owns almost every slot, so rejection rarely finds the rest.
        let mut sampler = DegreeSampler::initialize(&[1, 1, 1]);
        sampler.increment(0, 100_000).expect("node 0 is registered");
        let mut rng = SmallRng::seed_from_u64(11);
        let mut picked = sampler.sample_distinct(3, &mut rng).expect("three of three");
        picked.sort_unstable();
        assert_eq!(picked, vec![0, 1, 2]);
    }

    #[rstest]
    fn heavier_nodes_are_drawn_more_often() {
        let sampler = DegreeSampler::initialize(&[1, 9]);
        let mut rng = SmallRng::seed_from_u64(99);
        let heavy = (0..2_000)
            .filter_map(|_| sampler.sample_distinct(1, &mut rng).ok())
            .filter(|picked| picked.first() == Some(&1))
            .count();
        assert!((1_600..=1_990).contains(&heavy), "heavy draws: {heavy}");
    }

    proptest! {
        #![proptest_config(suite_proptest_config(128))]

        #[test]
        fn sample_distinct_never_repeats(
            degrees in prop::collection::vec(0_usize..20, 1..40),
            seed in any::<u64>(),
            fraction in 0.0_f64..=1.0,
        ) {
            let sampler = DegreeSampler::initialize(&degrees);
            let count = ((degrees.len() as f64) * fraction).floor() as usize;
            let mut rng = SmallRng::seed_from_u64(seed);
            let picked = sampler.sample_distinct(count, &mut rng).expect("count fits");
            prop_assert_eq!(picked.len(), count);
            let unique: HashSet<usize> = picked.iter().copied().collect();
            prop_assert_eq!(unique.len(), count);
            prop_assert!(picked.iter().all(|&node| node < degrees.len()));
        }
    }
}
