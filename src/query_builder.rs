//! SQL text for the table helpers.
//!
//! Column names are spliced in as given; only values become `?` parameters.
//! Nothing here validates input: an empty record produces SQL the database will
//! reject, and that rejection is what the caller sees.

use crate::types::{QueryAndParams, Record, RowValues};

/// `SELECT * FROM <table>` with one `col = ?` predicate per filter column, joined by `AND`.
#[must_use]
pub fn build_select(table: &str, filter: Option<&Record>) -> QueryAndParams {
    let mut query = format!("SELECT * FROM {table}");
    let mut params = Vec::new();

    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
        query.push_str(" WHERE ");
        for (i, (column, value)) in filter.iter().enumerate() {
            if i > 0 {
                query.push_str(" AND ");
            }
            query.push_str(column);
            query.push_str(" = ?");
            params.push(value.clone());
        }
    }

    QueryAndParams::new(query, params)
}

/// `INSERT INTO <table> (a, b) VALUES (?,?)` in record order.
#[must_use]
pub fn build_insert(table: &str, record: &Record) -> QueryAndParams {
    let columns: Vec<&str> = record.columns().collect();
    let markers = vec!["?"; columns.len()].join(",");
    let params: Vec<RowValues> = record.iter().map(|(_, value)| value.clone()).collect();

    QueryAndParams::new(
        format!(
            "INSERT INTO {table} ({}) VALUES ({markers})",
            columns.join(", ")
        ),
        params,
    )
}

/// `UPDATE <table> SET a = ?,b = ? WHERE <id_field> = ?`.
///
/// Every column except `id_field` goes into `SET`; the id value is bound last
/// (NULL when the record has none).
#[must_use]
pub fn build_update(table: &str, id_field: &str, record: &Record) -> QueryAndParams {
    let mut assignments = Vec::with_capacity(record.len());
    let mut params = Vec::with_capacity(record.len());
    for (column, value) in record.iter().filter(|(column, _)| *column != id_field) {
        assignments.push(format!("{column} = ?"));
        params.push(value.clone());
    }
    params.push(record.get(id_field).cloned().unwrap_or(RowValues::Null));

    QueryAndParams::new(
        format!(
            "UPDATE {table} SET {} WHERE {id_field} = ?",
            assignments.join(",")
        ),
        params,
    )
}

/// `TRUNCATE <table>`.
#[must_use]
pub fn build_truncate(table: &str) -> QueryAndParams {
    QueryAndParams::new_without_params(format!("TRUNCATE {table}"))
}
