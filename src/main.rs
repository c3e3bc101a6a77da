use anyhow::{Context, Result};
use bankscrape::{config::Config, pipeline};
use clap::Parser;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, EnvFilter};

/// One-shot ETL: scrape the largest-banks table, derive per-currency
/// market caps, persist to CSV + SQLite, run verification queries.
#[derive(Parser)]
#[command(name = "bankscrape", version)]
struct Args {
    /// TOML config overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(log_path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_ansi(false)
        .with_writer(Arc::new(log_file).and(io::stdout))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::from_toml(path)?,
        None => Config::default(),
    };

    init_logging(&config.log_path)?;
    info!("preliminaries complete, initiating etl process");

    let stage = pipeline::run(&config)?;
    if stage == pipeline::Stage::Aborted {
        std::process::exit(1);
    }
    Ok(())
}
