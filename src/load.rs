use crate::error::SinkError;
use crate::record::{TransformedRecord, CSV_HEADER};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::info;

/// Serialize the result table as CSV at `path`, header row first, missing
/// values as empty fields. The header is written up front so an empty
/// result table still produces it.
pub fn write_csv(rows: &[TransformedRecord], path: &Path) -> Result<(), SinkError> {
    let write = |path: &Path| -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(CSV_HEADER)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    };
    write(path).map_err(|source| SinkError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    info!("data saved to {}", path.display());
    Ok(())
}

/// Replace `table` in the store with the result table: drop, recreate with
/// the record schema (TEXT name, nullable REAL numerics), insert every row.
/// Runs in one transaction, so a failed load leaves whatever was there
/// before and a rerun yields the same contents as a single run.
pub fn load_table(
    conn: &mut Connection,
    table: &str,
    rows: &[TransformedRecord],
) -> Result<(), SinkError> {
    let mut load = || -> rusqlite::Result<()> {
        let tx = conn.transaction()?;
        tx.execute(&format!(r#"DROP TABLE IF EXISTS "{table}""#), [])?;
        tx.execute(
            &format!(
                r#"CREATE TABLE "{table}" (
                    Name TEXT,
                    MC_USD_Billion REAL,
                    MC_GBP_Billion REAL,
                    MC_EUR_Billion REAL,
                    MC_INR_Billion REAL
                )"#
            ),
            [],
        )?;
        {
            let mut stmt =
                tx.prepare(&format!(r#"INSERT INTO "{table}" VALUES (?1, ?2, ?3, ?4, ?5)"#))?;
            for row in rows {
                stmt.execute(params![
                    row.name,
                    row.market_cap_usd_billion,
                    row.market_cap_gbp_billion,
                    row.market_cap_eur_billion,
                    row.market_cap_inr_billion,
                ])?;
            }
        }
        tx.commit()
    };
    load().map_err(|source| SinkError::LoadFailed {
        table: table.to_string(),
        source,
    })?;
    info!("data loaded to table {table} ({} rows)", rows.len());
    Ok(())
}
