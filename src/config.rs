use crate::extract::TableSelector;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";

/// Everything the pipeline needs for one run. Defaults reproduce the stock
/// largest-banks job; any field can be overridden from a TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Page to fetch the source table from.
    pub url: String,
    /// Tag + attribute filter locating the one table to extract.
    pub table_selector: TableSelector,
    /// `Currency,Rate` CSV supplying the exchange-rate table.
    pub exchange_rate_path: PathBuf,
    /// Flat-file output target.
    pub csv_path: PathBuf,
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Table (re)created in the database on every run.
    pub table_name: String,
    /// Append-only run log.
    pub log_path: PathBuf,
    /// Transport-level timeout for the single GET, in seconds.
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            table_selector: TableSelector::default(),
            exchange_rate_path: PathBuf::from("exchange_rate.csv"),
            csv_path: PathBuf::from("Largest_banks_data.csv"),
            db_path: PathBuf::from("Banks.db"),
            table_name: "Largest_banks".to_string(),
            log_path: PathBuf::from("code_log.txt"),
            http_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Queries verified against the store after loading, in run order. The
    /// top-five query orders by rowid so "first five" means insertion order
    /// rather than whatever the storage layer happens to return.
    pub fn verification_queries(&self) -> Vec<String> {
        vec![
            format!("SELECT * FROM \"{}\"", self.table_name),
            format!("SELECT AVG(MC_GBP_Billion) FROM \"{}\"", self.table_name),
            format!(
                "SELECT Name FROM \"{}\" ORDER BY rowid LIMIT 5",
                self.table_name
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_stock_job() {
        let cfg = Config::default();
        assert_eq!(cfg.table_name, "Largest_banks");
        assert_eq!(cfg.csv_path, PathBuf::from("Largest_banks_data.csv"));
        assert_eq!(cfg.table_selector.to_css(), r#"table[class~="wikitable"]"#);
    }

    #[test]
    fn toml_overrides_only_named_fields() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "table_name = \"Banks_test\"\ndb_path = \"test.db\"").unwrap();
        let cfg = Config::from_toml(f.path()).unwrap();
        assert_eq!(cfg.table_name, "Banks_test");
        assert_eq!(cfg.db_path, PathBuf::from("test.db"));
        assert_eq!(cfg.url, Config::default().url);
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "tablename = \"typo\"").unwrap();
        assert!(Config::from_toml(f.path()).is_err());
    }

    #[test]
    fn query_list_is_fixed_and_ordered() {
        let queries = Config::default().verification_queries();
        assert_eq!(queries.len(), 3);
        assert!(queries[0].starts_with("SELECT * FROM"));
        assert!(queries[1].contains("AVG(MC_GBP_Billion)"));
        assert!(queries[2].contains("ORDER BY rowid LIMIT 5"));
    }
}
