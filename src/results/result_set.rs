use std::collections::HashMap;
use std::sync::Arc;

use super::row::{CustomDbRow, index_columns};
use crate::types::RowValues;

/// A result set from a database query
///
/// Reads fill `results`; writes leave it empty and report `rows_affected`
/// and, when the driver knows it, `last_insert_id`.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    /// Rows returned (reads) or changed (writes)
    pub rows_affected: usize,
    /// Id generated by the last INSERT, as reported by the driver
    pub last_insert_id: Option<i64>,
    /// Column names shared by all rows (to avoid duplicating in each row)
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Result of a statement that returned no rows.
    #[must_use]
    pub fn from_write(rows_affected: usize, last_insert_id: Option<i64>) -> ResultSet {
        ResultSet {
            rows_affected,
            last_insert_id,
            ..ResultSet::default()
        }
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(Arc::new(index_columns(&column_names)));
        self.column_names = Some(column_names);
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row to the result set. Ignored until column names are set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        if let (Some(column_names), Some(column_index)) = (&self.column_names, &self.column_index)
        {
            self.results.push(CustomDbRow {
                column_names: Arc::clone(column_names),
                rows: row_values,
                column_index_cache: Arc::clone(column_index),
            });
            self.rows_affected += 1;
        }
    }
}
