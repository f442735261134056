//! Command implementations and argument parsing for the `scalefree` binary.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use scalefree_core::{
    ComparisonBuilder, ComparisonReport, DEFAULT_EDGES_PER_STEP, DEFAULT_FINAL_SIZE,
    DEFAULT_INITIAL_SIZE, DEFAULT_RNG_SEED, DistributionMode, GeneratorParams, Graph,
    InteractionCatalog, KMinCandidates, LoadReport, LoadedNetwork, PowerLawFit, PowerLawFitter,
    RandomGraphModel, ScaleFreeError, ScaleFreeErrorCode, SeedTopology, TracingSink,
    compare_many, degree_sequence, distribution, generate_seeded, load,
};
use scalefree_providers_edgelist::{EdgeListError, EdgeListFormat, EdgeListReader, write_edges};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_TOP_INTERACTORS: usize = 10;
const DEFAULT_RUNS: usize = 1;
const DEFAULT_SOURCE_NAME: &str = "edges";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "scalefree",
    about = "Grow scale-free networks and fit power laws to degree distributions."
)]
pub struct Cli {
    /// Format of the command summary written to stdout.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Grow a network by preferential attachment.
    Generate(GenerateArgs),
    /// Compare a grown network against a random baseline.
    Compare(CompareArgs),
    /// Fit a power law to the degree distribution of an interaction file.
    Fit(FitArgs),
}

/// Summary renderings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for terminals.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Seed network shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Topology {
    /// Every pair of seed nodes connected.
    Clique,
    /// Seed nodes joined in a chain.
    Path,
}

impl From<Topology> for SeedTopology {
    fn from(value: Topology) -> Self {
        match value {
            Topology::Clique => Self::Clique,
            Topology::Path => Self::Path,
        }
    }
}

/// Views of the degree distribution printed by `generate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DistributionView {
    /// Node counts per degree.
    #[default]
    Histogram,
    /// Fraction of nodes with at least each degree.
    Ccdf,
}

impl From<DistributionView> for DistributionMode {
    fn from(value: DistributionView) -> Self {
        match value {
            DistributionView::Histogram => Self::Histogram,
            DistributionView::Ccdf => Self::ComplementaryCdf,
        }
    }
}

/// Sizes and seed shared by `generate` and `compare`.
#[derive(Debug, Args, Clone)]
pub struct SizeArgs {
    /// Number of nodes in the grown network.
    #[arg(long, default_value_t = DEFAULT_FINAL_SIZE)]
    pub nodes: usize,

    /// Number of nodes in the seed network.
    #[arg(long, default_value_t = DEFAULT_INITIAL_SIZE)]
    pub initial: usize,

    /// Edges each new node attaches with.
    #[arg(long = "edges-per-step", default_value_t = DEFAULT_EDGES_PER_STEP)]
    pub edges_per_step: usize,

    /// Shape of the seed network.
    #[arg(long, value_enum, default_value_t = Topology::Clique)]
    pub topology: Topology,

    /// Seed for the random streams.
    #[arg(long, default_value_t = DEFAULT_RNG_SEED)]
    pub seed: u64,
}

impl SizeArgs {
    fn params(&self) -> Result<GeneratorParams, ScaleFreeError> {
        Ok(
            GeneratorParams::new(self.nodes, self.initial, self.edges_per_step)?
                .with_seed_topology(self.topology.into())
                .with_rng_seed(self.seed),
        )
    }
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Network sizes and seed.
    #[command(flatten)]
    pub sizes: SizeArgs,

    /// Write the edge list to this path, one tab-separated pair per line.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Distribution view included in the summary.
    #[arg(long, value_enum, default_value_t = DistributionView::Histogram)]
    pub view: DistributionView,
}

/// Random baseline selection; density-matched G(n, p) when neither is set.
#[derive(Debug, Args, Clone, Default)]
#[group(required = false, multiple = false)]
pub struct BaselineArgs {
    /// Edge probability of a G(n, p) baseline.
    #[arg(long = "edge-probability")]
    pub edge_probability: Option<f64>,

    /// Exact edge count of a G(n, m) baseline.
    #[arg(long = "random-edges")]
    pub random_edges: Option<usize>,
}

impl BaselineArgs {
    fn model(&self) -> Option<RandomGraphModel> {
        match (self.edge_probability, self.random_edges) {
            (Some(probability), _) => Some(RandomGraphModel::EdgeProbability(probability)),
            (None, Some(edges)) => Some(RandomGraphModel::EdgeCount(edges)),
            (None, None) => None,
        }
    }
}

/// Options accepted by the `compare` command.
#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Network sizes and seed.
    #[command(flatten)]
    pub sizes: SizeArgs,

    /// Random baseline model.
    #[command(flatten)]
    pub baseline: BaselineArgs,

    /// Independent runs; each derives its own seed from `--seed`.
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    pub runs: usize,
}

/// Column layout presets for `fit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputLayout {
    /// Tab-separated pairs in the first two columns.
    #[default]
    Plain,
    /// BioGRID tab-separated release layout, grouped by taxon.
    Biogrid,
}

/// Options accepted by the `fit` command.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Path to a delimited interaction file.
    pub path: PathBuf,

    /// Preset column layout; the options below override it.
    #[arg(long, value_enum, default_value_t = InputLayout::Plain)]
    pub layout: InputLayout,

    /// Field delimiter: a single character, `tab`, or `\t`.
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Zero-based endpoint columns as `LEFT,RIGHT`.
    #[arg(long, value_parser = parse_columns)]
    pub columns: Option<(usize, usize)>,

    /// Zero-based column naming the organism group.
    #[arg(long = "group-column")]
    pub group_column: Option<usize>,

    /// Group to analyse; defaults to the group with the most interactions.
    #[arg(long)]
    pub group: Option<String>,

    /// Treat the first line as a header.
    #[arg(long = "skip-header")]
    pub skip_header: bool,

    /// Candidate minimum degrees; every observed degree when omitted.
    #[arg(long = "k-min", value_delimiter = ',')]
    pub k_min: Vec<usize>,

    /// Number of highest-degree interactors to report.
    #[arg(long, default_value_t = DEFAULT_TOP_INTERACTORS)]
    pub top: usize,
}

impl FitArgs {
    fn input_format(&self) -> EdgeListFormat {
        let mut format = match self.layout {
            InputLayout::Plain => EdgeListFormat::default(),
            InputLayout::Biogrid => EdgeListFormat::biogrid(),
        };
        if let Some(delimiter) = self.delimiter {
            format = format.with_delimiter(delimiter);
        }
        if let Some((left, right)) = self.columns {
            format = format.with_columns(left, right);
        }
        if self.group_column.is_some() {
            format = format.with_group_column(self.group_column);
        }
        if self.skip_header {
            format = format.with_skip_header(true);
        }
        format
    }

    fn candidates(&self) -> KMinCandidates {
        if self.k_min.is_empty() {
            KMinCandidates::All
        } else {
            KMinCandidates::Explicit(self.k_min.clone())
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// Opening or creating a file failed.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input held no usable interactions.
    #[error("no interactions found in `{path}`")]
    EmptyInput {
        /// Path of the empty input.
        path: PathBuf,
    },
    /// Reading or writing an edge list failed.
    #[error(transparent)]
    EdgeList(#[from] EdgeListError),
    /// Generation, comparison, or fitting failed.
    #[error(transparent)]
    Core(#[from] ScaleFreeError),
}

impl CliError {
    /// Returns the stable code of a core failure.
    #[must_use]
    pub fn code(&self) -> Option<ScaleFreeErrorCode> {
        match self {
            Self::Core(core) => Some(core.code()),
            _ => None,
        }
    }
}

/// Outcome of the `generate` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateSummary {
    /// Nodes in the grown network.
    pub nodes: usize,
    /// Edges in the grown network.
    pub edges: usize,
    /// Connected components; one for every grown network.
    pub components: usize,
    /// Seed the network was grown from.
    pub seed: u64,
    /// Seed network shape.
    pub topology: SeedTopology,
    /// Largest degree.
    pub max_degree: usize,
    /// Mean degree.
    pub mean_degree: f64,
    /// View used for `rows`.
    pub view: DistributionMode,
    /// `(degree, value)` rows of the distribution.
    pub rows: Vec<(usize, f64)>,
    /// Where the edge list was written, if requested.
    pub output: Option<PathBuf>,
}

/// Outcome of the `compare` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareSummary {
    /// One report per run, in run order.
    pub runs: Vec<ComparisonReport>,
}

/// Outcome of the `fit` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitSummary {
    /// Name derived from the input file.
    pub source: String,
    /// Group analysed, when the input is grouped.
    pub group: Option<String>,
    /// Ingestion counts for the analysed network.
    pub report: LoadReport,
    /// Nodes in the analysed network.
    pub nodes: usize,
    /// Edges in the analysed network.
    pub edges: usize,
    /// Fitted power law.
    pub fit: PowerLawFit,
    /// Highest-degree interactors, largest first.
    pub top_interactors: Vec<(String, usize)>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ExecutionSummary {
    /// Result of `generate`.
    Generate(GenerateSummary),
    /// Result of `compare`.
    Compare(CompareSummary),
    /// Result of `fit`.
    Fit(FitSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading input or any core operation fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use scalefree_cli::cli::{Cli, ExecutionSummary, run_cli};
///
/// let cli = Cli::try_parse_from(["scalefree", "generate", "--nodes", "40", "--initial", "3"])?;
/// let ExecutionSummary::Generate(summary) = run_cli(cli)? else {
///     unreachable!("generate yields a generate summary");
/// };
/// assert_eq!(summary.edges, 3 + 37 * 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(args) => {
            span.record("command", field::display("generate"));
            run_generate(&args).map(ExecutionSummary::Generate)
        }
        Command::Compare(args) => {
            span.record("command", field::display("compare"));
            run_compare(&args).map(ExecutionSummary::Compare)
        }
        Command::Fit(args) => {
            span.record("command", field::display("fit"));
            run_fit(&args).map(ExecutionSummary::Fit)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(args),
    fields(nodes = args.sizes.nodes, seed = args.sizes.seed),
)]
pub(super) fn run_generate(args: &GenerateArgs) -> Result<GenerateSummary, CliError> {
    let params = args.sizes.params()?;
    let graph = generate_seeded(&params)?;
    if let Some(path) = &args.output {
        write_graph(&graph, path)?;
    }

    let sequence = degree_sequence(&graph);
    let view = DistributionMode::from(args.view);
    let summary = GenerateSummary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        components: graph.component_count(),
        seed: params.rng_seed(),
        topology: params.seed_topology(),
        max_degree: sequence.max_degree(),
        mean_degree: sequence.mean_degree(),
        view,
        rows: distribution(&sequence, view).rows(),
        output: args.output.clone(),
    };
    info!(
        nodes = summary.nodes,
        edges = summary.edges,
        max_degree = summary.max_degree,
        "command completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.write_edges", err, skip(graph, path), fields(path = %path.display()))]
fn write_graph(graph: &Graph, path: &Path) -> Result<usize, CliError> {
    let file = File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(write_edges(BufWriter::new(file), graph.edges(), '\t')?)
}

#[instrument(
    name = "cli.compare",
    err,
    skip(args),
    fields(nodes = args.sizes.nodes, runs = args.runs, baseline = field::Empty),
)]
pub(super) fn run_compare(args: &CompareArgs) -> Result<CompareSummary, CliError> {
    if args.runs == 0 {
        return Err(ScaleFreeError::InvalidParameters {
            reason: "runs must be at least 1".to_owned(),
        }
        .into());
    }
    let sizes = &args.sizes;
    let mut builder = ComparisonBuilder::new()
        .with_sizes(sizes.nodes, sizes.initial, sizes.edges_per_step)
        .with_seed_topology(sizes.topology.into())
        .with_seed(sizes.seed);
    if let Some(model) = args.baseline.model() {
        builder = builder.with_random_model(model);
    }
    let comparison = builder.build()?;
    Span::current().record("baseline", field::debug(comparison.random_model()));

    let runs = if args.runs == 1 {
        vec![comparison.run()?]
    } else {
        compare_many(&vec![comparison; args.runs], sizes.seed)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?
    };
    for report in &runs {
        report.emit(TracingSink);
    }
    info!(runs = runs.len(), "command completed");
    Ok(CompareSummary { runs })
}

#[instrument(
    name = "cli.fit",
    err,
    skip(args),
    fields(path = %args.path.display(), group = field::Empty),
)]
pub(super) fn run_fit(args: &FitArgs) -> Result<FitSummary, CliError> {
    let reader = EdgeListReader::new(args.input_format())?;
    let input = open_reader(&args.path)?;

    if args.group.is_none() && reader.format().group_column().is_none() {
        let network = load(reader.read_records(input)?)?;
        return summarize(args, None, &network);
    }

    let catalog = InteractionCatalog::from_records(reader.read_grouped_records(input)?)?;
    let group = match &args.group {
        Some(group) => group.clone(),
        None => catalog
            .largest_networks(1)
            .first()
            .map(|(group, _)| (*group).clone())
            .ok_or_else(|| CliError::EmptyInput {
                path: args.path.clone(),
            })?,
    };
    Span::current().record("group", field::display(&group));
    let network = catalog.network(&group)?;
    summarize(args, Some(group), network)
}

fn summarize(
    args: &FitArgs,
    group: Option<String>,
    network: &LoadedNetwork<String>,
) -> Result<FitSummary, CliError> {
    if network.graph().edge_count() == 0 {
        return Err(CliError::EmptyInput {
            path: args.path.clone(),
        });
    }
    network.report().emit("load", TracingSink);

    let histogram = network.degree_sequence().histogram();
    let fit = PowerLawFitter::new()
        .with_candidates(args.candidates())
        .fit(&histogram)?;
    let top_interactors = network
        .highest_degree(args.top)
        .into_iter()
        .map(|(identifier, degree)| (identifier.clone(), degree))
        .collect();

    info!(
        exponent = fit.exponent,
        k_min = fit.k_min,
        tail_size = fit.tail_size,
        "command completed"
    );
    Ok(FitSummary {
        source: derive_source_name(&args.path),
        group,
        report: *network.report(),
        nodes: network.graph().node_count(),
        edges: network.graph().edge_count(),
        fit,
        top_interactors,
    })
}

#[instrument(name = "cli.open_reader", err, fields(path = field::Empty))]
pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| DEFAULT_SOURCE_NAME.to_owned(), ToOwned::to_owned)
}

pub(super) fn parse_delimiter(raw: &str) -> Result<char, String> {
    if matches!(raw, "tab" | "\\t") {
        return Ok('\t');
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) => Ok(delimiter),
        _ => Err(format!(
            "expected a single character, `tab`, or `\\t`, got `{raw}`"
        )),
    }
}

pub(super) fn parse_columns(raw: &str) -> Result<(usize, usize), String> {
    let (left, right) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected `LEFT,RIGHT`, got `{raw}`"))?;
    let column = |value: &str| {
        value
            .trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid column `{value}`: {err}"))
    };
    Ok((column(left)?, column(right)?))
}
