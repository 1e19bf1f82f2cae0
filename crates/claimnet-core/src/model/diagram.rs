//! Map document written and read by the diagram editor.
//!
//! # Format
//!
//! ```json
//! {
//!   "theory": "GNW",
//!   "nodes": [
//!     { "id": "1", "type": "custom", "position": { "x": 0, "y": 0 },
//!       "data": { "label": "...", "color": "#ffffff", "colors": ["#ffffff"],
//!                 "theory": "GNW", "metrics": null, "selectedMetric": null } }
//!   ],
//!   "edges": [ { "id": "e1-2", "source": "1", "target": "2" } ],
//!   "exportDate": "2025-01-01T00:00:00.000Z",
//!   "version": "1.0"
//! }
//! ```
//!
//! Only `theory`, `nodes`, `edges`, node `id` and edge `source`/`target` are
//! required. Every other field is carried through untouched in an `extra`
//! map so that a read-then-write cycle does not drop editor state.
//!
//! # Boundary adapter
//!
//! [`DiagramDocument::to_graph`] narrows the document to the id-only
//! [`Node`]/[`Edge`] records the metrics engine consumes.

use std::path::Path;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::DiagramError;
use crate::model::graph::{Edge, Node, deserialize_id};

/// Fill color given to boxes that never had one.
pub const DEFAULT_COLOR: &str = "#ffffff";

/// Map file format version written on export.
pub const EXPORT_VERSION: &str = "1.0";

/// A complete map file for one theory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramDocument {
    pub theory: String,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One claim box on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub data: NodeData,
    /// `type`, `position`, `width`, `height`, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Editor payload attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theory: Option<String>,
    /// Last computed metrics, written by the analyze action.
    #[serde(default)]
    pub metrics: Option<Value>,
    #[serde(default)]
    pub selected_metric: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An arrow between two claim boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramEdge {
    #[serde(deserialize_with = "deserialize_id")]
    pub source: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub target: String,
    /// `id`, `type`, `markerEnd`, `style`, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DiagramDocument {
    /// Create an empty document for `theory`.
    #[must_use]
    pub fn new(theory: impl Into<String>) -> Self {
        Self {
            theory: theory.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            export_date: None,
            version: None,
            extra: Map::new(),
        }
    }

    /// Parse and validate a map file.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Json`] for malformed JSON and
    /// [`DiagramError::InvalidFormat`] when `theory`, `nodes` or `edges` is
    /// missing.
    pub fn from_json_str(input: &str) -> Result<Self, DiagramError> {
        let value: Value = serde_json::from_str(input)?;
        validate_shape(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Read and validate a map file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    #[instrument]
    pub fn read_from_path(path: &Path) -> Result<Self, DiagramError> {
        let content = std::fs::read_to_string(path)?;
        let doc = Self::from_json_str(&content)?;
        debug!(
            theory = %doc.theory,
            nodes = doc.nodes.len(),
            edges = doc.edges.len(),
            "loaded map file"
        );
        Ok(doc)
    }

    /// Serialize as pretty JSON with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, DiagramError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document to `path` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to_path(&self, path: &Path) -> Result<(), DiagramError> {
        let mut json = self.to_json_string()?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Normalize a freshly imported document.
    ///
    /// Stale metrics are dropped, missing colors and labels are defaulted and
    /// every node is stamped with the document's theory.
    pub fn prepare_import(&mut self) {
        let theory = self.theory.clone();
        for node in &mut self.nodes {
            node.data.reset_for(&theory);
            if node.data.label.is_none() {
                node.data.label = Some(String::new());
            }
        }
    }

    /// Normalize the document for writing to a map file.
    pub fn clean_for_export(&mut self, now: DateTime<Utc>) {
        let theory = self.theory.clone();
        for node in &mut self.nodes {
            node.data.reset_for(&theory);
        }
        self.export_date = Some(now.to_rfc3339_opts(SecondsFormat::Millis, true));
        self.version = Some(EXPORT_VERSION.to_string());
    }

    /// File name the editor uses for an export made on `date`.
    #[must_use]
    pub fn export_file_name(&self, date: NaiveDate) -> String {
        format!("{}_network_{}.json", self.theory, date.format("%Y-%m-%d"))
    }

    /// Narrow the document to the graph the metrics engine consumes.
    #[must_use]
    pub fn to_graph(&self) -> (Vec<Node>, Vec<Edge>) {
        let nodes = self.nodes.iter().map(|n| Node::new(n.id.clone())).collect();
        let edges = self
            .edges
            .iter()
            .map(|e| Edge::new(e.source.clone(), e.target.clone()))
            .collect();
        (nodes, edges)
    }
}

impl NodeData {
    fn reset_for(&mut self, theory: &str) {
        self.metrics = None;
        self.selected_metric = None;
        self.extra.remove("metricRange");
        if self.color.is_none() {
            self.color = Some(DEFAULT_COLOR.to_string());
        }
        if self.colors.as_ref().is_none_or(Vec::is_empty) {
            self.colors = Some(vec![DEFAULT_COLOR.to_string()]);
        }
        self.theory = Some(theory.to_string());
    }
}

fn validate_shape(value: &Value) -> Result<(), DiagramError> {
    let Some(obj) = value.as_object() else {
        return Err(DiagramError::InvalidFormat(
            "top-level value is not an object".into(),
        ));
    };

    match obj.get("theory").and_then(Value::as_str) {
        Some(t) if !t.is_empty() => {}
        _ => return Err(DiagramError::InvalidFormat("missing `theory`".into())),
    }

    for field in ["nodes", "edges"] {
        if !obj.get(field).is_some_and(Value::is_array) {
            return Err(DiagramError::InvalidFormat(format!(
                "missing `{field}` array"
            )));
        }
    }

    Ok(())
}
