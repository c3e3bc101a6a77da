use crate::config::Config;
use crate::rates::RateTable;
use crate::{extract, load, query, transform};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use rusqlite::Connection;
use std::fmt;
use std::time::Duration;
use tracing::{error, info};

/// Run progress. `Aborted` is terminal and only reachable while extraction
/// has produced no data; every later failure is logged and skipped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Extracted,
    Transformed,
    Loaded,
    Queried,
    Done,
    Aborted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::Extracted => "extracted",
            Stage::Transformed => "transformed",
            Stage::Loaded => "loaded",
            Stage::Queried => "queried",
            Stage::Done => "done",
            Stage::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

fn enter(stage: Stage) -> Stage {
    info!("stage: {stage}");
    stage
}

/// Sequence one ETL run: extract → transform → write csv → load store →
/// verification queries. Configuration problems (rates, store, client)
/// surface as errors before any stage work; an extraction failure aborts
/// the run; sink and query failures are logged and the run continues. The
/// store connection lives in this scope, so it closes on every exit path.
pub fn run(config: &Config) -> Result<Stage> {
    enter(Stage::Init);

    let rates = RateTable::from_csv(&config.exchange_rate_path)
        .context("exchange-rate configuration is invalid")?;
    let mut conn = Connection::open(&config.db_path)
        .with_context(|| format!("failed to open store {}", config.db_path.display()))?;
    let client = Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .context("failed to build http client")?;

    let extracted = match extract::extract(&client, &config.url, &config.table_selector) {
        Ok(rows) => rows,
        Err(e) => {
            error!("extraction failed: {e}");
            return Ok(enter(Stage::Aborted));
        }
    };
    enter(Stage::Extracted);

    let transformed =
        transform::transform(&extracted, &rates).context("currency configuration is invalid")?;
    enter(Stage::Transformed);

    if let Err(e) = load::write_csv(&transformed, &config.csv_path) {
        error!("{e}");
    }
    if let Err(e) = load::load_table(&mut conn, &config.table_name, &transformed) {
        error!("{e}");
    }
    enter(Stage::Loaded);

    for sql in config.verification_queries() {
        match query::run_query(&conn, &sql) {
            Ok(rows) => {
                for row in &rows {
                    println!("{}", query::render_row(row));
                }
            }
            Err(e) => error!("{e}"),
        }
    }
    enter(Stage::Queried);

    drop(conn);
    info!("process complete, store connection closed");
    Ok(enter(Stage::Done))
}
