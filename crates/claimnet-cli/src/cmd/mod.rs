pub mod analyze;
pub mod completions;
pub mod export;
pub mod stats;

use std::path::Path;

use claimnet_core::model::diagram::DiagramDocument;

use crate::output::{CliError, OutputMode, render_error};

/// Read a map file, rendering a coded error on failure.
fn load_map(path: &Path, output: OutputMode) -> anyhow::Result<DiagramDocument> {
    match DiagramDocument::read_from_path(path) {
        Ok(doc) => Ok(doc),
        Err(e) => {
            let msg = format!("{}: {e}", path.display());
            render_error(output, &CliError::coded(e.code(), &msg))?;
            anyhow::bail!("{msg}");
        }
    }
}
