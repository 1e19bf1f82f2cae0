#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;

use claimnet_core::config::resolve_config;
use claimnet_core::error::ErrorCode;
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "claimnet",
    author,
    version,
    about = "claimnet: graph-centrality analysis for claim-network maps",
    long_about = None
)]
struct Cli {
    /// Enable debug logging for claimnet crates.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format. Defaults to pretty on a terminal and text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file to use instead of `claimnet.toml` and the user config.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Compute centrality metrics for a map file",
        long_about = "Compute PageRank, harmonic centrality, reachability ratio and betweenness \
                      centrality for every claim in a map file.",
        after_help = "EXAMPLES:\n    # Rank claims by PageRank\n    claimnet analyze GNW_network_2025-01-01.json\n\n    # Top five bridges\n    claimnet analyze map.json --metric betweenness --top 5\n\n    # Emit the raw metrics object\n    claimnet analyze map.json --format json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Summarize the structure of a map file",
        after_help = "EXAMPLES:\n    # Component, cycle and degree summary\n    claimnet stats map.json\n\n    # Emit machine-readable output\n    claimnet stats map.json --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Re-export a map file with a dated name",
        long_about = "Clear stale metrics, default colors and stamp the export date, then write \
                      the map as {theory}_network_{YYYY-MM-DD}.json.",
        after_help = "EXAMPLES:\n    # Export into the current directory\n    claimnet export map.json\n\n    # Export into a directory\n    claimnet export map.json --out exports/"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    claimnet completions bash > /etc/bash_completion.d/claimnet"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CLAIMNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "claimnet=debug,claimnet_core=debug,claimnet_metrics=debug,warn"
        } else {
            "warn"
        })
    });

    let format = env::var("CLAIMNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Classify a config loading failure.
fn config_error_code(err: &anyhow::Error) -> ErrorCode {
    let unreadable = err.chain().any(|cause| {
        cause.downcast_ref::<toml::de::Error>().is_some()
            || cause.downcast_ref::<std::io::Error>().is_some()
    });
    if unreadable {
        ErrorCode::ConfigParseError
    } else {
        ErrorCode::InvalidConfigValue
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_root = env::current_dir()?;

    let config = match resolve_config(cli.config.as_deref(), &project_root) {
        Ok(config) => config,
        Err(e) => {
            let output = resolve_output_mode(cli.format, cli.json, None);
            render_error(
                output,
                &CliError::coded(config_error_code(&e), format!("{e:#}")),
            )?;
            return Err(e);
        }
    };

    let output = resolve_output_mode(cli.format, cli.json, config.output.format.as_deref());
    debug!(?output, "resolved output mode");

    match cli.command {
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, output, &config),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output),
        Commands::Export(ref args) => cmd::export::run_export(args, output, &project_root),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }
    }
}
