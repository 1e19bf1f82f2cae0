//! `claimnet stats`: structural summary of a claim network.

use std::io::{self, Write};
use std::path::PathBuf;

use claimnet_metrics::{GraphStats, MetricsGraph};
use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `claimnet stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Map file exported by the diagram editor.
    pub map: PathBuf,
}

/// Report payload for `claimnet stats`.
#[derive(Debug, Serialize)]
pub struct NetworkStats {
    pub theory: String,
    #[serde(flatten)]
    pub graph: GraphStats,
}

/// Execute `claimnet stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let doc = super::load_map(&args.map, output)?;
    let (nodes, edges) = doc.to_graph();
    let g = MetricsGraph::build(&nodes, &edges);

    let payload = NetworkStats {
        theory: doc.theory,
        graph: GraphStats::from_graph(&g),
    };
    render_mode(output, &payload, render_text, render_pretty)
}

fn rows(s: &GraphStats) -> [(&'static str, String); 13] {
    [
        ("listed", s.listed_node_count.to_string()),
        ("connected", s.node_count.to_string()),
        ("isolated", s.isolated_node_count.to_string()),
        ("edges", s.input_edge_count.to_string()),
        ("internal", s.edge_count.to_string()),
        ("density", format!("{:.4}", s.density)),
        ("components", s.weakly_connected_component_count.to_string()),
        ("sccs", s.scc_count.to_string()),
        ("cycles", s.cycle_count.to_string()),
        ("self_loops", s.self_loop_count.to_string()),
        ("dangling", s.dangling_node_count.to_string()),
        ("max_in", s.max_in_degree.to_string()),
        ("max_out", s.max_out_degree.to_string()),
    ]
}

fn render_text(report: &NetworkStats, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "theory  {}", report.theory)?;
    for (key, value) in rows(&report.graph) {
        writeln!(w, "{key}  {value}")?;
    }
    Ok(())
}

fn render_pretty(report: &NetworkStats, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Network stats: {}", report.theory))?;
    for (key, value) in rows(&report.graph) {
        pretty_kv(w, key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimnet_core::{Edge, Node};

    fn report() -> NetworkStats {
        let nodes: Vec<Node> = ["A", "B", "C", "lonely"].into_iter().map(Node::new).collect();
        let edges = vec![Edge::new("A", "B"), Edge::new("B", "A"), Edge::new("B", "C")];
        NetworkStats {
            theory: "RPT".into(),
            graph: GraphStats::from_graph(&MetricsGraph::build(&nodes, &edges)),
        }
    }

    #[test]
    fn json_flattens_graph_stats() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["theory"], "RPT");
        assert_eq!(json["node_count"], 3);
        assert_eq!(json["isolated_node_count"], 1);
        assert_eq!(json["cycle_count"], 1);
    }

    #[test]
    fn text_lists_every_statistic() {
        let mut buf = Vec::new();
        render_text(&report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 14);
        assert!(text.contains("connected  3\n"));
        assert!(text.contains("isolated  1\n"));
    }
}
