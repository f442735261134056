//! Error types for the scale-free core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced by graph construction, sampling, and fitting.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ScaleFreeError {
    /// Sizes, probabilities, or other parameters violated a precondition.
    #[error("invalid parameters: {reason}")]
    InvalidParameters {
        /// Human-readable description of the violated precondition.
        reason: String,
    },
    /// The sampler was asked for more distinct nodes than are registered.
    #[error("requested {requested} distinct nodes but only {available} are registered")]
    InsufficientNodes {
        /// Number of distinct nodes requested by the caller.
        requested: usize,
        /// Number of nodes currently registered with the sampler.
        available: usize,
    },
    /// No candidate minimum degree left enough data to fit a power law.
    #[error(
        "cannot fit a power law for k_min in {k_min_low}..={k_min_high}: \
         only {distinct_degrees} distinct positive degrees observed"
    )]
    DegenerateDistribution {
        /// Smallest candidate minimum degree that was attempted.
        k_min_low: usize,
        /// Largest candidate minimum degree that was attempted.
        k_min_high: usize,
        /// Number of distinct positive degree values in the input.
        distinct_degrees: usize,
    },
    /// An edge would connect a node to itself.
    #[error("self-loop on node {node} is not allowed")]
    SelfLoop {
        /// Node that both endpoints referenced.
        node: usize,
    },
    /// An edge between the two nodes already exists.
    #[error("edge ({left}, {right}) already exists")]
    DuplicateEdge {
        /// Smaller endpoint of the duplicate edge.
        left: usize,
        /// Larger endpoint of the duplicate edge.
        right: usize,
    },
    /// An edge referenced a node id outside the graph.
    #[error("node {node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange {
        /// The invalid node id.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// A catalog lookup named an organism group with no interactions.
    #[error("no interaction data for group `{group}`")]
    UnknownGroup {
        /// Display form of the requested group key.
        group: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`ScaleFreeError`] variants.
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    enum ScaleFreeErrorCode for ScaleFreeError {
        /// Parameters violated a precondition.
        InvalidParameters => InvalidParameters { .. } => "SCALEFREE_INVALID_PARAMETERS",
        /// The sampler could not supply enough distinct nodes.
        InsufficientNodes => InsufficientNodes { .. } => "SCALEFREE_INSUFFICIENT_NODES",
        /// Power-law fitting was impossible for the supplied data.
        DegenerateDistribution => DegenerateDistribution { .. } => "SCALEFREE_DEGENERATE_DISTRIBUTION",
        /// An edge would connect a node to itself.
        SelfLoop => SelfLoop { .. } => "SCALEFREE_SELF_LOOP",
        /// An edge already exists.
        DuplicateEdge => DuplicateEdge { .. } => "SCALEFREE_DUPLICATE_EDGE",
        /// An edge referenced a node outside the graph.
        NodeOutOfRange => NodeOutOfRange { .. } => "SCALEFREE_NODE_OUT_OF_RANGE",
        /// A catalog lookup named an unknown group.
        UnknownGroup => UnknownGroup { .. } => "SCALEFREE_UNKNOWN_GROUP",
    }
}

impl ScaleFreeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            reason: reason.into(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ScaleFreeError>;
