use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::error::SqlTablesError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `MySQL` row, guided by the column's declared type.
///
/// # Errors
/// Returns `SqlTablesError::MysqlError` if the value can't be decoded.
pub fn mysql_extract_value(row: &MySqlRow, idx: usize) -> Result<RowValues, SqlTablesError> {
    if row.try_get_raw(idx)?.is_null() {
        return Ok(RowValues::Null);
    }

    let type_name = row.column(idx).type_info().name().to_ascii_uppercase();
    let value = match type_name.as_str() {
        "BOOLEAN" => RowValues::Bool(row.try_get::<bool, _>(idx)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            RowValues::Int(row.try_get::<i64, _>(idx)?)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" | "YEAR" => {
            let unsigned = row.try_get_unchecked::<u64, _>(idx)?;
            // values past i64::MAX only fit as text
            i64::try_from(unsigned)
                .map_or_else(|_| RowValues::Text(unsigned.to_string()), RowValues::Int)
        }
        "FLOAT" | "DOUBLE" => RowValues::Float(row.try_get::<f64, _>(idx)?),
        "DATETIME" => RowValues::Timestamp(row.try_get::<NaiveDateTime, _>(idx)?),
        "TIMESTAMP" => RowValues::Timestamp(row.try_get::<DateTime<Utc>, _>(idx)?.naive_utc()),
        "DATE" => RowValues::Text(row.try_get::<NaiveDate, _>(idx)?.to_string()),
        "TIME" => RowValues::Text(row.try_get::<NaiveTime, _>(idx)?.to_string()),
        "JSON" => RowValues::JSON(row.try_get::<JsonValue, _>(idx)?),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
        | "GEOMETRY" => RowValues::Blob(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
        // CHAR/VARCHAR/TEXT/ENUM/SET/DECIMAL all arrive as text on the wire
        _ => RowValues::Text(row.try_get_unchecked::<String, _>(idx)?),
    };
    Ok(value)
}

/// Append one decoded row to `result_set`, taking column names from the first row.
///
/// # Errors
/// Returns `SqlTablesError::MysqlError` if any column fails to decode.
pub fn push_row(result_set: &mut ResultSet, row: &MySqlRow) -> Result<(), SqlTablesError> {
    if result_set.get_column_names().is_none() {
        let column_names: Vec<String> = row
            .columns()
            .iter()
            .map(|column| column.name().to_string())
            .collect();
        result_set.set_column_names(Arc::new(column_names));
    }

    let row_values = (0..row.len())
        .map(|idx| mysql_extract_value(row, idx))
        .collect::<Result<Vec<_>, _>>()?;
    result_set.add_row_values(row_values);
    Ok(())
}
