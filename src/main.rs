#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use deliops_export::constants::env;
use deliops_export::{
    build_snapshot, detect_save_dialog, fixture, read_from_file, trigger_download, write_to_file,
    AppState, ExportConfig,
};

/// Generate a DeliOps "all data" snapshot.
///
/// With no arguments the built-in mock state is exported to the configured
/// output path (default `data/alldata.json`).
#[derive(Parser, Debug)]
#[command(name = "deliops-export", version, about)]
struct Cli {
    /// Write the snapshot here instead of the configured output path
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Export a saved application state (JSON) instead of the mock data
    #[arg(long)]
    state: Option<PathBuf>,

    /// Save through the desktop download folder instead of writing a file
    #[arg(long, conflicts_with = "output")]
    download: bool,

    /// Config file (with --state, defaults to <config dir>/deliops/export.toml;
    /// the mock export uses built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check an exported file: schema version and dataCounts
    Verify { path: PathBuf },
}

fn init_logging() -> Result<()> {
    let log_level = match std::env::var(env::LOG_LEVEL)
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")
}

fn verify(path: &Path) -> Result<()> {
    let document = read_from_file(path)
        .with_context(|| format!("Snapshot {} failed verification", path.display()))?;
    info!(
        path = %path.display(),
        version = document.version(),
        export_date = %document.export_date(),
        counts = ?document.data_counts(),
        "Snapshot is consistent"
    );
    println!("{}: ok", path.display());
    Ok(())
}

/// An explicit `--config` always wins. Otherwise a live state export reads the
/// user config, while the mock export stays on built-in defaults so the
/// fixture is the same on every machine.
fn resolve_config(cli: &Cli) -> Result<ExportConfig> {
    match (&cli.config, &cli.state) {
        (Some(path), _) => ExportConfig::load_from(path),
        (None, Some(_)) => ExportConfig::load(),
        (None, None) => Ok(ExportConfig::default()),
    }
    .context("Failed to load export config")
}

fn export(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;

    let state = match &cli.state {
        Some(path) => AppState::load(path)
            .with_context(|| format!("Failed to load state from {}", path.display()))?,
        None => {
            info!("Using built-in mock state");
            fixture::mock_state()
        }
    };

    let document = build_snapshot(&state, &config);

    if cli.download {
        let dialog = detect_save_dialog();
        let path = trigger_download(&document, dialog.as_ref())
            .context("Failed to download snapshot")?;
        println!("{}", path.display());
        return Ok(());
    }

    let output = cli.output.clone().unwrap_or(config.output_path);
    write_to_file(&output, &document)
        .with_context(|| format!("Failed to write snapshot to {}", output.display()))?;
    println!("{}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    let result = match &cli.command {
        Some(Commands::Verify { path }) => verify(path),
        None => export(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
