use std::path::PathBuf;
use thiserror::Error;

/// Fatal extraction failures. Any of these aborts the run before the
/// transform stage ever sees data.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Transport error, timeout, bad URL, or a non-2xx status.
    #[error("fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// The compiled selector matched nothing in the document.
    #[error("no element matched selector `{0}`")]
    TableNotFound(String),

    /// The configured tag/attribute pair does not compile to a CSS selector.
    #[error("invalid table selector `{0}`")]
    InvalidSelector(String),
}

/// Exchange-rate table problems. A missing or non-positive rate for a
/// supported currency is a configuration error, not a per-row condition.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("failed to read exchange rates from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no exchange rate for supported currency {0}")]
    Missing(String),

    #[error("exchange rate for {currency} must be positive, got {rate}")]
    NonPositive { currency: String, rate: f64 },
}

/// Persistence failures. Logged by the orchestrator and non-fatal: the run
/// continues to the remaining stages.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write csv to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to load table {table}: {source}")]
    LoadFailed {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
}

/// A single verification query failed. Non-fatal; later queries still run.
#[derive(Debug, Error)]
#[error("query `{sql}` failed: {source}")]
pub struct QueryError {
    pub sql: String,
    #[source]
    pub source: rusqlite::Error,
}
