//! `claimnet analyze`: centrality metrics for every claim in a map file.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;

use claimnet_core::config::Config;
use claimnet_core::error::ErrorCode;
use claimnet_metrics::{MetricKind, MetricRange, NetworkMetrics, PageRankConfig, compute_with};
use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::output::{
    CliError, OutputMode, pretty_kv, pretty_rule, pretty_section, render, render_error,
    render_mode,
};

/// Arguments for `claimnet analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Map file exported by the diagram editor.
    pub map: PathBuf,

    /// Metric to rank by: pagerank, harmonic, reachability or betweenness.
    #[arg(long, short, default_value = "pagerank")]
    pub metric: String,

    /// Only show the N highest-ranked claims.
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RankedRow {
    rank: usize,
    id: String,
    label: String,
    value: f64,
    normalized: f64,
}

/// Ranked view of one metric, used for pretty and text output.
#[derive(Debug, Serialize)]
struct AnalyzeReport {
    theory: String,
    metric: MetricKind,
    network_size: usize,
    edge_count: usize,
    listed_node_count: usize,
    range: Option<MetricRange>,
    rows: Vec<RankedRow>,
}

/// Execute `claimnet analyze`.
///
/// JSON output is the bare `{nodeMetrics, globalMetrics}` object; pretty and
/// text output rank the claims by `--metric`.
pub fn run_analyze(args: &AnalyzeArgs, output: OutputMode, config: &Config) -> anyhow::Result<()> {
    let kind: MetricKind = match args.metric.parse() {
        Ok(kind) => kind,
        Err(e) => {
            render_error(output, &CliError::coded(ErrorCode::UnknownMetric, e.to_string()))?;
            anyhow::bail!("{e}");
        }
    };

    let mut doc = super::load_map(&args.map, output)?;
    doc.prepare_import();

    let (nodes, edges) = doc.to_graph();
    let pagerank = PageRankConfig::from(&config.metrics);
    let metrics = compute_with(&nodes, &edges, &pagerank);
    debug!(
        theory = %doc.theory,
        network_size = metrics.global_metrics.network_size,
        "analysis complete"
    );

    if output.is_json() {
        return render(output, &metrics, |_, _| Ok(()));
    }

    let mut labels: HashMap<&str, &str> = HashMap::with_capacity(doc.nodes.len());
    for node in &doc.nodes {
        labels
            .entry(node.id.as_str())
            .or_insert_with(|| node.data.label.as_deref().unwrap_or_default());
    }

    let report = build_report(
        &doc.theory,
        &metrics,
        kind,
        args.top,
        &labels,
        nodes.len(),
    );
    render_mode(output, &report, render_text, render_pretty)
}

fn build_report(
    theory: &str,
    metrics: &NetworkMetrics,
    kind: MetricKind,
    top: Option<usize>,
    labels: &HashMap<&str, &str>,
    listed_node_count: usize,
) -> AnalyzeReport {
    let range = MetricRange::of(metrics, kind);
    let rows = metrics
        .ranked(kind)
        .into_iter()
        .take(top.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, (id, value))| RankedRow {
            rank: i + 1,
            id: id.to_string(),
            label: labels.get(id).copied().unwrap_or_default().to_string(),
            value,
            normalized: range.map_or(value, |r| r.normalize(value)),
        })
        .collect();

    AnalyzeReport {
        theory: theory.to_string(),
        metric: kind,
        network_size: metrics.global_metrics.network_size,
        edge_count: metrics.global_metrics.edge_count,
        listed_node_count,
        range,
        rows,
    }
}

fn render_text(report: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "metric  {}", report.metric.key())?;
    if report.rows.is_empty() {
        return Ok(());
    }
    writeln!(w, "RANK  ID  VALUE  NORMALIZED  LABEL")?;
    for row in &report.rows {
        writeln!(
            w,
            "{}  {}  {:.6}  {:.6}  {}",
            row.rank, row.id, row.value, row.normalized, row.label
        )?;
    }
    Ok(())
}

fn render_pretty(report: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Claim network: {}", report.theory))?;
    pretty_kv(
        w,
        "Nodes",
        format!(
            "{} connected / {} listed",
            report.network_size, report.listed_node_count
        ),
    )?;
    pretty_kv(w, "Edges", report.edge_count.to_string())?;
    pretty_kv(w, "Metric", report.metric.label())?;

    if report.network_size == 0 {
        writeln!(w)?;
        writeln!(w, "No claim is linked to another; nothing to rank.")?;
        return Ok(());
    }

    if let Some(range) = report.range {
        pretty_kv(w, "Range", format!("{:.4} .. {:.4}", range.min, range.max))?;
    }

    writeln!(w)?;
    writeln!(
        w,
        "{:>4}  {:<12} {:>10} {:>6}  LABEL",
        "#", "ID", "VALUE", "NORM"
    )?;
    pretty_rule(w)?;
    for row in &report.rows {
        writeln!(
            w,
            "{:>4}  {:<12} {:>10.4} {:>6.2}  {}",
            row.rank,
            row.id,
            row.value,
            row.normalized,
            truncate(&row.label, 36)
        )?;
    }
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimnet_core::{Edge, Node};
    use claimnet_metrics::compute;

    fn chain_metrics() -> NetworkMetrics {
        let nodes: Vec<Node> = ["A", "B", "C", "Z"].into_iter().map(Node::new).collect();
        compute(&nodes, &[Edge::new("A", "B"), Edge::new("B", "C")])
    }

    #[test]
    fn report_ranks_and_normalizes() {
        let metrics = chain_metrics();
        let labels = HashMap::from([("B", "middle claim")]);
        let report = build_report(
            "GNW",
            &metrics,
            MetricKind::BetweennessCentrality,
            None,
            &labels,
            4,
        );

        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.rows[0].id, "B");
        assert_eq!(report.rows[0].label, "middle claim");
        assert!((report.rows[0].normalized - 1.0).abs() < 1e-12);
        assert!(report.rows[1].normalized.abs() < 1e-12);
        assert_eq!(report.network_size, 3);
    }

    #[test]
    fn top_limits_rows() {
        let metrics = chain_metrics();
        let report = build_report(
            "GNW",
            &metrics,
            MetricKind::ReachabilityRatio,
            Some(2),
            &HashMap::new(),
            4,
        );
        let ids: Vec<&str> = report.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
    }

    #[test]
    fn text_output_has_one_row_per_node() {
        let metrics = chain_metrics();
        let report = build_report(
            "GNW",
            &metrics,
            MetricKind::PageRank,
            None,
            &HashMap::new(),
            4,
        );
        let mut buf = Vec::new();
        render_text(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("metric  PageRank\n"));
        assert_eq!(text.lines().count(), 2 + 4);
    }

    #[test]
    fn pretty_output_reports_empty_network() {
        let report = build_report(
            "IIT",
            &NetworkMetrics::default(),
            MetricKind::PageRank,
            None,
            &HashMap::new(),
            2,
        );
        let mut buf = Vec::new();
        render_pretty(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Claim network: IIT"));
        assert!(text.contains("nothing to rank"));
    }

    #[test]
    fn truncate_marks_long_labels() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
