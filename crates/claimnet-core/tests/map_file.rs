//! File-level tests for map documents: write, re-read, and adapt to the
//! narrow graph input.

use chrono::{TimeZone, Utc};
use claimnet_core::error::DiagramError;
use claimnet_core::model::diagram::DiagramDocument;
use claimnet_core::{Edge, Node};
use serde_json::Value;
use tempfile::TempDir;

const HOT_MAP: &str = r##"{
  "theory": "HOT",
  "nodes": [
    { "id": "n1", "type": "custom", "position": { "x": 0, "y": 0 },
      "data": { "label": "FOS drive task performance (1; 5)", "color": "#c1e1c1" } },
    { "id": "n2", "type": "custom", "position": { "x": 250, "y": 0 },
      "data": { "label": "HOS relies on averages to track internal noise (8)" } },
    { "id": "n3", "type": "custom", "position": { "x": 500, "y": 130 },
      "data": { "label": "Perception doesn't overflow report (4)", "width": 220 } }
  ],
  "edges": [
    { "id": "e1", "source": "n1", "target": "n2", "type": "smoothstep" },
    { "id": "e2", "source": "n2", "target": "n3" },
    { "id": "e3", "source": "n2", "target": "n3" }
  ],
  "exportDate": "2024-05-01T12:00:00.000Z",
  "version": "1.0"
}"##;

#[test]
fn write_then_read_preserves_document() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("HOT_network.json");

    let doc = DiagramDocument::from_json_str(HOT_MAP).expect("fixture parses");
    doc.write_to_path(&path).expect("write succeeds");

    let back = DiagramDocument::read_from_path(&path).expect("read succeeds");
    assert_eq!(back, doc);
    assert_eq!(back.nodes[2].data.extra["width"], 220);
    assert_eq!(back.edges[0].extra["type"], "smoothstep");
}

#[test]
fn reading_missing_file_is_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = DiagramDocument::read_from_path(&dir.path().join("absent.json"))
        .expect_err("file does not exist");
    assert!(matches!(err, DiagramError::Io(_)));
}

#[test]
fn parallel_edges_survive_the_adapter() {
    let doc = DiagramDocument::from_json_str(HOT_MAP).expect("fixture parses");
    let (nodes, edges) = doc.to_graph();

    assert_eq!(
        nodes,
        vec![Node::new("n1"), Node::new("n2"), Node::new("n3")]
    );
    assert_eq!(
        edges,
        vec![
            Edge::new("n1", "n2"),
            Edge::new("n2", "n3"),
            Edge::new("n2", "n3"),
        ]
    );
}

#[test]
fn exported_file_is_reimportable() {
    let dir = TempDir::new().expect("tempdir");
    let mut doc = DiagramDocument::from_json_str(HOT_MAP).expect("fixture parses");
    let now = Utc
        .with_ymd_and_hms(2025, 6, 30, 18, 0, 0)
        .single()
        .expect("valid timestamp");
    doc.clean_for_export(now);

    let path = dir.path().join(doc.export_file_name(now.date_naive()));
    doc.write_to_path(&path).expect("write succeeds");
    assert!(path.ends_with("HOT_network_2025-06-30.json"));

    let raw: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("readable")).expect("json");
    for node in raw["nodes"].as_array().expect("nodes array") {
        assert_eq!(node["data"]["theory"], "HOT");
        assert!(node["data"]["colors"].is_array());
    }

    let mut imported = DiagramDocument::read_from_path(&path).expect("re-import succeeds");
    imported.prepare_import();
    assert_eq!(imported.nodes.len(), 3);
    assert_eq!(imported.version.as_deref(), Some("1.0"));
}
