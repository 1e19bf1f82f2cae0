//! Metric selection: pick one score, find its spread, rank nodes by it.
//!
//! The diagram editor shades each claim box by the selected metric,
//! normalized against the min/max of that metric over all nodes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metrics::network::{NetworkMetrics, NodeMetrics};

/// One of the four per-node scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    PageRank,
    HarmonicCentrality,
    ReachabilityRatio,
    BetweennessCentrality,
}

impl MetricKind {
    pub const ALL: [Self; 4] = [
        Self::PageRank,
        Self::HarmonicCentrality,
        Self::ReachabilityRatio,
        Self::BetweennessCentrality,
    ];

    /// Human-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PageRank => "PageRank",
            Self::HarmonicCentrality => "Harmonic Centrality",
            Self::ReachabilityRatio => "Reachability Ratio",
            Self::BetweennessCentrality => "Betweenness Centrality",
        }
    }

    /// Key used in serialized [`NodeMetrics`].
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::PageRank => "PageRank",
            Self::HarmonicCentrality => "HarmonicCentrality",
            Self::ReachabilityRatio => "ReachabilityRatio",
            Self::BetweennessCentrality => "BetweennessCentrality",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a metric name matches none of the known spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric `{0}`")]
pub struct UnknownMetric(pub String);

impl FromStr for MetricKind {
    type Err = UnknownMetric;

    /// Case-insensitive; spaces, `-` and `_` are ignored. The editor's
    /// legacy names `LRC` (harmonic) and `LRC_NX` (reachability) are
    /// accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match folded.as_str() {
            "pagerank" | "pr" => Ok(Self::PageRank),
            "harmonic" | "harmoniccentrality" | "lrc" => Ok(Self::HarmonicCentrality),
            "reachability" | "reachabilityratio" | "lrcnx" => Ok(Self::ReachabilityRatio),
            "betweenness" | "betweennesscentrality" | "bc" => Ok(Self::BetweennessCentrality),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

impl NodeMetrics {
    /// The score selected by `kind`.
    #[must_use]
    pub const fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::PageRank => self.page_rank,
            MetricKind::HarmonicCentrality => self.harmonic_centrality,
            MetricKind::ReachabilityRatio => self.reachability_ratio,
            MetricKind::BetweennessCentrality => self.betweenness_centrality,
        }
    }
}

/// Spread of one metric across all nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    /// Min and max of `kind` over every node, ignoring NaN.
    ///
    /// `None` when there are no node metrics.
    #[must_use]
    pub fn of(metrics: &NetworkMetrics, kind: MetricKind) -> Option<Self> {
        metrics
            .node_metrics
            .values()
            .map(|m| m.get(kind))
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<Self>, v| {
                Some(acc.map_or(Self { min: v, max: v }, |r| Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }))
            })
    }

    /// Position of `value` within the range, `0.0` at min and `1.0` at max.
    ///
    /// A flat range (min == max) has no spread to normalize against and
    /// returns `value` unchanged.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            (value - self.min) / span
        } else {
            value
        }
    }
}

impl NetworkMetrics {
    /// `(id, score)` pairs sorted by `kind` descending, ties broken by id.
    #[must_use]
    pub fn ranked(&self, kind: MetricKind) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = self
            .node_metrics
            .iter()
            .map(|(id, m)| (id.as_str(), m.get(kind)))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}
