//! Data model.
//!
//! [`graph`] holds the id-only node and edge records the metrics engine
//! consumes. [`diagram`] holds the full map document with every UI field the
//! editor attaches, plus the adapter that narrows it to [`graph`] records.

pub mod diagram;
pub mod graph;
