//! `claimnet export`: rewrite a map file the way the editor exports it.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use claimnet_core::error::ErrorCode;
use claimnet_core::model::diagram::DiagramDocument;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::output::{CliError, OutputMode, render, render_error};

/// Arguments for `claimnet export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Map file to clean and re-export.
    pub map: PathBuf,

    /// Output directory or file. Defaults to the current directory with
    /// the dated file name `{theory}_network_{YYYY-MM-DD}.json`.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportOutput {
    theory: String,
    path: String,
    nodes: usize,
    edges: usize,
    export_date: Option<String>,
}

/// Execute `claimnet export`.
pub fn run_export(args: &ExportArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let mut doc = super::load_map(&args.map, output)?;
    let now = Utc::now();
    let target = export_target(&doc, args.out.as_deref(), project_root, now);

    doc.clean_for_export(now);
    if let Err(e) = doc.write_to_path(&target) {
        let msg = format!("{}: {e}", target.display());
        render_error(output, &CliError::coded(ErrorCode::ExportWriteFailed, &msg))?;
        anyhow::bail!("{msg}");
    }
    info!(path = %target.display(), "map exported");

    let result = ExportOutput {
        theory: doc.theory,
        path: target.display().to_string(),
        nodes: doc.nodes.len(),
        edges: doc.edges.len(),
        export_date: doc.export_date,
    };
    render(output, &result, |r, w| {
        writeln!(
            w,
            "exported {} ({} nodes, {} edges) to {}",
            r.theory, r.nodes, r.edges, r.path
        )
    })
}

/// Where the export lands: `out` itself when it names a file, otherwise the
/// dated file name inside `out` (or `project_root` when `out` is absent).
fn export_target(
    doc: &DiagramDocument,
    out: Option<&Path>,
    project_root: &Path,
    now: DateTime<Utc>,
) -> PathBuf {
    let file_name = doc.export_file_name(now.date_naive());
    match out {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => project_root.join(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap()
    }

    #[test]
    fn default_target_is_dated_name_in_project_root() {
        let doc = DiagramDocument::new("GNW");
        let root = Path::new("/work");
        assert_eq!(
            export_target(&doc, None, root, now()),
            root.join("GNW_network_2025-03-09.json")
        );
    }

    #[test]
    fn directory_target_gets_dated_name() {
        let dir = TempDir::new().unwrap();
        let doc = DiagramDocument::new("IIT");
        assert_eq!(
            export_target(&doc, Some(dir.path()), Path::new("."), now()),
            dir.path().join("IIT_network_2025-03-09.json")
        );
    }

    #[test]
    fn file_target_is_used_verbatim() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("custom.json");
        let doc = DiagramDocument::new("HOT");
        assert_eq!(
            export_target(&doc, Some(&file), Path::new("."), now()),
            file
        );
    }
}
