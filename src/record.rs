use serde::{Deserialize, Serialize};

/// Currency codes the transform derives columns for, in output column order.
/// Extending the output schema means adding a code here and a matching field
/// on [`TransformedRecord`].
pub const SUPPORTED_CURRENCIES: &[&str] = &["GBP", "EUR", "INR"];

/// One data row as extracted from the source table: bank name plus market
/// cap in billions of USD. `None` marks a cell that was empty or did not
/// parse as a number; it is never coerced to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BankRecord {
    pub name: String,
    pub market_cap_usd_billion: Option<f64>,
}

/// CSV header, matching the [`TransformedRecord`] serde renames in
/// declaration order. Written explicitly so it appears even when there are
/// zero data rows.
pub const CSV_HEADER: [&str; 5] = [
    "Name",
    "MC_USD_Billion",
    "MC_GBP_Billion",
    "MC_EUR_Billion",
    "MC_INR_Billion",
];

/// A [`BankRecord`] with the derived per-currency columns. The serde renames
/// double as the CSV header and the SQL column names, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MC_USD_Billion")]
    pub market_cap_usd_billion: Option<f64>,
    #[serde(rename = "MC_GBP_Billion")]
    pub market_cap_gbp_billion: Option<f64>,
    #[serde(rename = "MC_EUR_Billion")]
    pub market_cap_eur_billion: Option<f64>,
    #[serde(rename = "MC_INR_Billion")]
    pub market_cap_inr_billion: Option<f64>,
}
