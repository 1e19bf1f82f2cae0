#![forbid(unsafe_code)]
//! claimnet-core library.
//!
//! Data types shared by the metrics engine and the CLI: the narrow graph
//! input ([`model::graph`]), the map document written by the diagram editor
//! ([`model::diagram`]), layered configuration ([`config`]) and error codes
//! ([`error`]).
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for typed failures, `anyhow::Result` at
//!   the configuration boundary.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;

pub use model::graph::{Edge, Node};
