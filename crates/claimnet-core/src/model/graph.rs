//! Narrow graph input records.
//!
//! The metrics engine only ever sees node ids and directed `source → target`
//! pairs. Everything else a diagram carries (labels, colors, positions) stays
//! in [`crate::model::diagram`] and is stripped by its adapter.
//!
//! Ids are compared as strings. Map files written by older editor builds
//! sometimes store numeric ids, so deserialization accepts either a JSON
//! string or a JSON number and normalizes both to `String`.
//!
//! The normalization is lossy: the number `7` and the string `"7"` become
//! the same id, while the editor compares ids strictly and keeps them apart.
//! A map that mixes both spellings for different nodes merges them here.

use serde::{Deserialize, Deserializer, Serialize};

/// A graph node: identity only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

impl Node {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A directed edge `source → target`.
///
/// Endpoints are not required to name a node in the node list. Parallel
/// edges and self-loops are legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    #[serde(deserialize_with = "deserialize_id")]
    pub source: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub target: String,
}

impl Edge {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

/// Deserialize an id given as either a JSON string or a JSON number.
///
/// # Errors
///
/// Fails when the value is neither a string nor a number.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}
