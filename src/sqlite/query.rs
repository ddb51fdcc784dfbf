use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::{Connection, Statement, params_from_iter};

use crate::error::SqlTablesError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
/// Returns `SqlTablesError::SqliteError` if the column can't be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, SqlTablesError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(b) => RowValues::Blob(b),
    })
}

/// Run a row-returning statement and collect every row.
///
/// # Errors
/// Returns `SqlTablesError::SqliteError` if execution or value extraction fails.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &[Value],
) -> Result<ResultSet, SqlTablesError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows_iter = stmt.query(params_from_iter(params.iter()))?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Run one statement on `conn`, reading rows if it has result columns.
///
/// # Errors
/// Returns `SqlTablesError::SqliteError` with whatever `SQLite` reported.
pub fn execute_statement(
    conn: &Connection,
    statement: &str,
    params: &[Value],
) -> Result<ResultSet, SqlTablesError> {
    let mut stmt = conn.prepare(statement)?;
    if stmt.column_count() > 0 {
        return build_result_set(&mut stmt, params);
    }

    let rows_affected = stmt.execute(params_from_iter(params.iter()))?;
    drop(stmt);
    let last_insert_id = (is_insert(statement) && rows_affected > 0)
        .then(|| conn.last_insert_rowid());
    Ok(ResultSet::from_write(rows_affected, last_insert_id))
}

/// Whether `statement` starts with `INSERT` or `REPLACE`.
///
/// `last_insert_rowid()` is connection-wide and survives unrelated statements, so
/// it is only reported for these. Only the leading keyword is checked: a
/// `WITH ... INSERT` statement reports no id.
fn is_insert(statement: &str) -> bool {
    let head = statement.trim_start();
    ["INSERT", "REPLACE"].iter().any(|kw| {
        head.get(..kw.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(kw))
    })
}
