//! Scale-free network generation and power-law analysis.
//!
//! Grows networks by preferential attachment, measures their degree
//! distributions, fits discrete power laws, compares them against random
//! baselines, and ingests real interaction data into the same graph model.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adapter;
mod distribution;
mod error;
mod evaluator;
mod generator;
mod graph;
mod powerlaw;
mod random;
mod rng;
mod sampler;
mod sink;

#[cfg(test)]
mod test_utils;

pub use crate::{
    adapter::{
        InteractionCatalog, LoadReport, LoadedNetwork, MalformedReason, MalformedRecord, load,
    },
    distribution::{
        ComplementaryCdf, DegreeHistogram, DegreeSequence, Distribution, DistributionMode,
        degree_sequence, distribution, histogram_ks_distance, theoretical_power_law,
    },
    error::{Result, ScaleFreeError, ScaleFreeErrorCode},
    evaluator::{
        Comparison, ComparisonBuilder, ComparisonReport, DEFAULT_EDGES_PER_STEP,
        DEFAULT_FINAL_SIZE, DEFAULT_INITIAL_SIZE, compare, compare_many,
    },
    generator::{
        DEFAULT_RNG_SEED, GeneratorParams, SeedTopology, generate, generate_seeded, generate_with,
    },
    graph::Graph,
    powerlaw::{
        KMinCandidates, MIN_DISTINCT_DEGREES, PowerLawFit, PowerLawFitter, fit,
        sample_discrete_power_law,
    },
    random::{RandomGraphModel, build_random_graph},
    rng::{mix_seed, stream_rng},
    sampler::{DegreeSampler, REJECTION_ATTEMPTS_PER_DRAW},
    sink::{CollectingSink, StatisticValue, StatisticsSink, TracingSink},
};
