use crate::error::ExtractionError;
use crate::record::BankRecord;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{error, info};
use url::Url;

/// Tag name plus attribute filter locating one element in a document.
/// `class` matches as a whitespace-separated word, other attributes match
/// exactly.
#[derive(Debug, Clone, Deserialize)]
pub struct TableSelector {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Default for TableSelector {
    fn default() -> Self {
        Self {
            tag: "table".to_string(),
            attributes: BTreeMap::from([("class".to_string(), "wikitable".to_string())]),
        }
    }
}

impl TableSelector {
    pub fn to_css(&self) -> String {
        let mut css = self.tag.clone();
        for (attr, value) in &self.attributes {
            let op = if attr == "class" { "~=" } else { "=" };
            css.push_str(&format!(r#"[{attr}{op}"{value}"]"#));
        }
        css
    }
}

/// Fetch `url` with a single blocking GET and extract the first table
/// matching `selector`. Any transport or HTTP-status problem is
/// `FetchFailed`; no retries.
pub fn extract(
    client: &Client,
    url: &str,
    selector: &TableSelector,
) -> Result<Vec<BankRecord>, ExtractionError> {
    let endpoint = Url::parse(url).map_err(|e| ExtractionError::FetchFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let response = client
        .get(endpoint)
        .send()
        .map_err(|e| ExtractionError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        error!("failed to retrieve {url}: http status {status}");
        return Err(ExtractionError::FetchFailed {
            url: url.to_string(),
            reason: format!("http status {status}"),
        });
    }
    info!("successfully fetched {url}");

    let body = response.text().map_err(|e| ExtractionError::FetchFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let rows = parse_table(&body, selector)?;
    info!("data extraction complete: {} rows", rows.len());
    Ok(rows)
}

/// Parse the HTML body and read the first matching table into records.
/// The first `tr` is the header and is skipped; rows with fewer than three
/// `td` cells are dropped. Cell 1 is the bank name, cell 2 the USD market
/// cap with thousands separators stripped; an empty or unparsable cell
/// becomes `None` rather than failing the row.
pub fn parse_table(
    html: &str,
    selector: &TableSelector,
) -> Result<Vec<BankRecord>, ExtractionError> {
    let css = selector.to_css();
    let table_selector =
        Selector::parse(&css).map_err(|_| ExtractionError::InvalidSelector(css.clone()))?;
    let row_selector = Selector::parse("tr").expect("CSS selector for rows should be valid");
    let cell_selector = Selector::parse("td").expect("CSS selector for cells should be valid");

    let document = Html::parse_document(html);
    let table = document
        .select(&table_selector)
        .next()
        .ok_or(ExtractionError::TableNotFound(css))?;

    let mut records = Vec::new();
    for row in table.select(&row_selector).skip(1) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < 3 {
            continue;
        }
        records.push(BankRecord {
            name: cell_text(&cells[1]),
            market_cap_usd_billion: parse_market_cap(&cell_text(&cells[2])),
        });
    }
    Ok(records)
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn parse_market_cap(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
