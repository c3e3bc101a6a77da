use crate::error::RateError;
use crate::record::SUPPORTED_CURRENCIES;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Rate")]
    rate: f64,
}

/// Static mapping of currency code → USD multiplier, loaded once per run
/// and immutable afterwards.
#[derive(Debug, Clone)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// Load rates from a `Currency,Rate` CSV and validate them: every
    /// supported currency must be present with a positive rate. Anything
    /// else is a configuration error that fails the whole run up front.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, RateError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|source| RateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut rates = HashMap::new();
        for row in reader.deserialize::<RateRow>() {
            let row = row.map_err(|source| RateError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if row.rate <= 0.0 {
                return Err(RateError::NonPositive {
                    currency: row.currency,
                    rate: row.rate,
                });
            }
            rates.insert(row.currency, row.rate);
        }

        let table = Self { rates };
        for &code in SUPPORTED_CURRENCIES {
            table.require(code)?;
        }
        info!("loaded {} exchange rates from {}", table.rates.len(), path.display());
        Ok(table)
    }

    /// Look up a rate, treating absence as an error rather than a skip.
    pub fn require(&self, code: &str) -> Result<f64, RateError> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| RateError::Missing(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_rates(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_and_looks_up_rates() {
        let f = write_rates("Currency,Rate\nGBP,0.8\nEUR,0.93\nINR,82.95\n");
        let table = RateTable::from_csv(f.path()).unwrap();
        assert_eq!(table.require("GBP").unwrap(), 0.8);
        assert_eq!(table.require("INR").unwrap(), 82.95);
    }

    #[test]
    fn missing_supported_currency_is_fatal() {
        let f = write_rates("Currency,Rate\nGBP,0.8\nEUR,0.93\n");
        let err = RateTable::from_csv(f.path()).unwrap_err();
        assert!(matches!(err, RateError::Missing(code) if code == "INR"));
    }

    #[test]
    fn non_positive_rate_is_fatal() {
        let f = write_rates("Currency,Rate\nGBP,-0.8\nEUR,0.93\nINR,82.95\n");
        let err = RateTable::from_csv(f.path()).unwrap_err();
        assert!(matches!(err, RateError::NonPositive { .. }));
    }

    #[test]
    fn unparsable_rate_reports_the_path() {
        let f = write_rates("Currency,Rate\nGBP,not-a-number\n");
        let err = RateTable::from_csv(f.path()).unwrap_err();
        assert!(matches!(err, RateError::Read { .. }));
    }
}
