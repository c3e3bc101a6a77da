use crate::error::RateError;
use crate::rates::RateTable;
use crate::record::{BankRecord, TransformedRecord};
use tracing::info;

/// Round to two decimal places, half away from zero (`f64::round`).
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Derive the per-currency market-cap columns. Pure: inputs are untouched
/// and a new sequence comes back in the same order. A missing USD value
/// propagates to every derived field; a missing rate for a supported
/// currency is an error, not a skip.
pub fn transform(
    rows: &[BankRecord],
    rates: &RateTable,
) -> Result<Vec<TransformedRecord>, RateError> {
    let gbp = rates.require("GBP")?;
    let eur = rates.require("EUR")?;
    let inr = rates.require("INR")?;

    let transformed = rows
        .iter()
        .map(|row| {
            let usd = row.market_cap_usd_billion;
            TransformedRecord {
                name: row.name.clone(),
                market_cap_usd_billion: usd,
                market_cap_gbp_billion: usd.map(|v| round2(v * gbp)),
                market_cap_eur_billion: usd.map(|v| round2(v * eur)),
                market_cap_inr_billion: usd.map(|v| round2(v * inr)),
            }
        })
        .collect();
    info!("data transformation complete");
    Ok(transformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn rates() -> RateTable {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"Currency,Rate\nGBP,0.8\nEUR,0.93\nINR,82.95\n")
            .unwrap();
        RateTable::from_csv(f.path()).unwrap()
    }

    fn bank(name: &str, cap: Option<f64>) -> BankRecord {
        BankRecord {
            name: name.to_string(),
            market_cap_usd_billion: cap,
        }
    }

    #[test]
    fn derives_each_currency_rounded_to_two_decimals() {
        let rows = vec![bank("Bank A", Some(100_000.0)), bank("JPMorgan", Some(432.92))];
        let out = transform(&rows, &rates()).unwrap();
        assert_eq!(out[0].market_cap_gbp_billion, Some(80_000.0));
        assert_eq!(out[1].market_cap_gbp_billion, Some(346.34));
        assert_eq!(out[1].market_cap_eur_billion, Some(402.62));
        assert_eq!(out[1].market_cap_inr_billion, Some(35_910.71));
    }

    #[test]
    fn missing_usd_propagates_to_every_derived_field() {
        let out = transform(&[bank("Bank B", None)], &rates()).unwrap();
        assert_eq!(out[0].market_cap_usd_billion, None);
        assert_eq!(out[0].market_cap_gbp_billion, None);
        assert_eq!(out[0].market_cap_eur_billion, None);
        assert_eq!(out[0].market_cap_inr_billion, None);
    }

    #[test]
    fn preserves_input_order() {
        let rows = vec![bank("first", Some(1.0)), bank("second", None), bank("third", Some(3.0))];
        let out = transform(&rows, &rates()).unwrap();
        let names: Vec<&str> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 0.015 * 100 lands on exactly 1.5 after fp rounding, so the result
        // pins down the half-away-from-zero convention.
        assert_eq!(round2(0.015), 0.02);
        assert_eq!(round2(-0.015), -0.02);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(0.25), 0.25);
    }
}
