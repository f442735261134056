//! Interaction records grouped into one network per organism.

use std::{collections::HashMap, fmt, hash::Hash};

use tracing::{info, instrument};

use super::{LoadReport, LoadedNetwork, MalformedRecord, NetworkBuilder, log_report};
use crate::{Result, error::ScaleFreeError};

/// Networks keyed by an organism identifier such as a taxon id.
///
/// # Examples
/// ```
/// use scalefree_core::InteractionCatalog;
///
/// let catalog = InteractionCatalog::from_records(vec![
///     Ok(("9606", "TP53", "MDM2")),
///     Ok(("9606", "TP53", "BRCA1")),
///     Ok(("4932", "CDC28", "CLN2")),
/// ])?;
/// assert_eq!(catalog.network_size(&"9606")?, 2);
/// assert_eq!(catalog.largest_networks(1), vec![(&"9606", 2)]);
/// assert!(catalog.network_size(&"10090").is_err());
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct InteractionCatalog<G, K> {
    order: Vec<G>,
    networks: HashMap<G, LoadedNetwork<K>>,
    ungrouped_malformed: usize,
}

impl<G, K> InteractionCatalog<G, K>
where
    G: Eq + Hash + Clone + fmt::Display,
    K: Eq + Hash + Clone,
{
    /// Groups `(group, left, right)` records by group and loads each group
    /// as its own network.
    ///
    /// Malformed records cannot be attributed to a group and are counted
    /// once for the whole catalog.
    ///
    /// # Errors
    /// Only graph invariant violations propagate, as in [`super::load`].
    #[instrument(name = "adapter.catalog", err, skip(records))]
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = core::result::Result<(G, K, K), MalformedRecord>>,
    {
        let mut order = Vec::new();
        let mut builders: HashMap<G, NetworkBuilder<K>> = HashMap::new();
        let mut ungrouped_malformed = 0_usize;
        for record in records {
            match record {
                Err(_) => ungrouped_malformed += 1,
                Ok((group, left, right)) => {
                    let builder = builders.entry(group.clone()).or_insert_with(|| {
                        order.push(group);
                        NetworkBuilder::default()
                    });
                    builder.push(Ok((left, right)));
                }
            }
        }

        let mut networks = HashMap::with_capacity(builders.len());
        for (group, builder) in builders {
            networks.insert(group, builder.finish()?);
        }
        let catalog = Self {
            order,
            networks,
            ungrouped_malformed,
        };
        let total = catalog.total_report();
        log_report(&total);
        info!(
            groups = catalog.len(),
            edges = total.accepted_edges,
            "interaction catalog loaded"
        );
        Ok(catalog)
    }

    /// Returns the number of groups.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.order.len() }

    /// Returns `true` when no group has any interaction.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Iterates the groups in first-seen order.
    pub fn groups(&self) -> impl Iterator<Item = &G> {
        self.order.iter()
    }

    /// Returns the network for `group`.
    ///
    /// # Errors
    /// Returns [`ScaleFreeError::UnknownGroup`] when `group` has no records.
    pub fn network(&self, group: &G) -> Result<&LoadedNetwork<K>> {
        self.networks
            .get(group)
            .ok_or_else(|| ScaleFreeError::UnknownGroup {
                group: group.to_string(),
            })
    }

    /// Returns the number of distinct interactions recorded for `group`.
    ///
    /// # Errors
    /// Returns [`ScaleFreeError::UnknownGroup`] when `group` has no records.
    pub fn network_size(&self, group: &G) -> Result<usize> {
        Ok(self.network(group)?.graph().edge_count())
    }

    /// Returns up to `count` groups with the most interactions, largest
    /// first; ties keep first-seen order.
    #[must_use]
    pub fn largest_networks(&self, count: usize) -> Vec<(&G, usize)> {
        let mut sizes: Vec<(&G, usize)> = self
            .order
            .iter()
            .filter_map(|group| {
                self.networks
                    .get(group)
                    .map(|network| (group, network.graph().edge_count()))
            })
            .collect();
        sizes.sort_by(|left, right| right.1.cmp(&left.1));
        sizes.truncate(count);
        sizes
    }

    /// Returns up to `count` interactors of `group` with the highest degree.
    ///
    /// # Errors
    /// Returns [`ScaleFreeError::UnknownGroup`] when `group` has no records.
    pub fn highest_degree_interactors(&self, group: &G, count: usize) -> Result<Vec<(&K, usize)>> {
        Ok(self.network(group)?.highest_degree(count))
    }

    /// Returns the counts summed over every group plus the malformed records
    /// that could not be attributed to one.
    #[must_use]
    pub fn total_report(&self) -> LoadReport {
        let mut total = LoadReport {
            malformed_records: self.ungrouped_malformed,
            ..LoadReport::default()
        };
        for network in self.networks.values() {
            total.absorb(network.report());
        }
        total
    }
}
