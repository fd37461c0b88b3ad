use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use stylesheet_dupes::parser::DEFAULT_MARKER;
use stylesheet_dupes::report;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "stylesheet-dupes")]
#[command(about = "Report duplicate style groups and properties in a StyleSheet.create literal")]
#[command(version)]
struct Cli {
    /// Source file to inspect
    path: PathBuf,

    /// Call that opens the style object literal
    #[arg(short, long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Exit with status 1 when any duplicate is found
    #[arg(long)]
    deny_duplicates: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging();

    let outcome = stylesheet_dupes::scan_file(&cli.path, &cli.marker)
        .with_context(|| format!("failed to scan {}", cli.path.display()))?;

    let rendered = match cli.format {
        Format::Text => report::render_text(&outcome, &cli.marker),
        Format::Json => report::render_json(&outcome, &cli.marker)?,
    };
    io::stdout().lock().write_all(rendered.as_bytes())?;

    if cli.deny_duplicates && outcome.has_duplicates() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// warn+ to stderr unless RUST_LOG overrides; stdout carries only the report.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
