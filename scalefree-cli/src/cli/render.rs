//! Rendering of command summaries as text or JSON.

use std::io::{self, Write};

use scalefree_core::{CollectingSink, DistributionMode};

use super::commands::{
    CompareSummary, ExecutionSummary, FitSummary, GenerateSummary, OutputFormat,
};

/// Renders `summary` to `writer` in the requested `format`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use scalefree_cli::cli::{Cli, OutputFormat, render_summary, run_cli};
///
/// let cli = Cli::try_parse_from(["scalefree", "generate", "--nodes", "20", "--initial", "3"])?;
/// let summary = run_cli(cli)?;
/// let mut buffer = Vec::new();
/// render_summary(&summary, OutputFormat::Text, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.contains("edges: 37"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(
    summary: &ExecutionSummary,
    format: OutputFormat,
    mut writer: impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, summary)?;
            writeln!(writer)
        }
        OutputFormat::Text => match summary {
            ExecutionSummary::Generate(generate) => render_generate(generate, writer),
            ExecutionSummary::Compare(compare) => render_compare(compare, writer),
            ExecutionSummary::Fit(fit) => render_fit(fit, writer),
        },
    }
}

fn render_generate(summary: &GenerateSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    writeln!(writer, "components: {}", summary.components)?;
    writeln!(writer, "seed: {}", summary.seed)?;
    writeln!(writer, "max degree: {}", summary.max_degree)?;
    writeln!(writer, "mean degree: {:.3}", summary.mean_degree)?;
    if let Some(path) = &summary.output {
        writeln!(writer, "edge list: {}", path.display())?;
    }
    match summary.view {
        DistributionMode::Histogram => {
            writeln!(writer, "degree\tnodes")?;
            for &(degree, count) in summary.rows.iter().filter(|(_, count)| *count > 0.0) {
                writeln!(writer, "{degree}\t{count}")?;
            }
        }
        DistributionMode::ComplementaryCdf => {
            writeln!(writer, "degree\tP(K>=k)")?;
            for (degree, probability) in &summary.rows {
                writeln!(writer, "{degree}\t{probability:.6}")?;
            }
        }
    }
    Ok(())
}

fn render_compare(summary: &CompareSummary, mut writer: impl Write) -> io::Result<()> {
    for (index, report) in summary.runs.iter().enumerate() {
        writeln!(writer, "run {index} (seed {})", report.seed)?;
        let mut sink = CollectingSink::default();
        report.emit(&mut sink);
        for (scope, name, value) in sink.entries() {
            writeln!(writer, "  {scope}.{name}\t{value}")?;
        }
    }
    Ok(())
}

fn render_fit(summary: &FitSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "source: {}", summary.source)?;
    if let Some(group) = &summary.group {
        writeln!(writer, "group: {group}")?;
    }
    let report = &summary.report;
    writeln!(
        writer,
        "records: {} accepted, {} malformed, {} self-loops, {} duplicates",
        report.accepted_edges, report.malformed_records, report.self_loops, report.duplicate_edges
    )?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    let fit = &summary.fit;
    writeln!(
        writer,
        "exponent: {:.4} (standard error {:.4})",
        fit.exponent, fit.standard_error
    )?;
    writeln!(
        writer,
        "tail: k_min {} k_max {} size {} ks {:.4}",
        fit.k_min, fit.k_max, fit.tail_size, fit.ks_distance
    )?;
    if !summary.top_interactors.is_empty() {
        writeln!(writer, "top interactors:")?;
        for (identifier, degree) in &summary.top_interactors {
            writeln!(writer, "  {identifier}\t{degree}")?;
        }
    }
    Ok(())
}
