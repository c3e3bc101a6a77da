use crate::error::QueryError;
use rusqlite::types::Value;
use rusqlite::Connection;
use tracing::info;

/// Execute one read-only statement and return every result row. Errors are
/// wrapped with the offending SQL so the orchestrator can log and move on.
pub fn run_query(conn: &Connection, sql: &str) -> Result<Vec<Vec<Value>>, QueryError> {
    let wrap = |source: rusqlite::Error| QueryError {
        sql: sql.to_string(),
        source,
    };

    let mut stmt = conn.prepare(sql).map_err(wrap)?;
    let columns = stmt.column_count();
    let rows = stmt
        .query_map([], |row| {
            (0..columns).map(|i| row.get::<_, Value>(i)).collect()
        })
        .map_err(wrap)?
        .collect::<rusqlite::Result<Vec<Vec<Value>>>>()
        .map_err(wrap)?;

    info!("executed query: {sql} ({} rows)", rows.len());
    Ok(rows)
}

/// Render one result row for display.
pub fn render_row(row: &[Value]) -> String {
    row.iter()
        .map(|value| match value {
            Value::Null => "NULL".to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Real(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::Blob(b) => format!("<{} bytes>", b.len()),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
