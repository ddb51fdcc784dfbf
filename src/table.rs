use std::sync::Arc;

use crate::connection::Connection;
use crate::error::SqlTablesError;
use crate::query_builder::{build_insert, build_select, build_truncate, build_update};
use crate::results::{CustomDbRow, ResultSet};
use crate::types::{QueryAndParams, Record, RowValues};

/// CRUD helpers bound to one table.
///
/// Holds nothing but the table name, the id column and a handle to the shared
/// connection, so clones are cheap and can be moved into other tasks.
///
/// ```rust,no_run
/// use sql_tables::prelude::*;
///
/// # async fn demo(db: &Db) -> Result<(), SqlTablesError> {
/// let users = db.table("users");
/// let id = users.save(&Record::new().with("name", "alice")).await?;
/// let alice = users.find_one(Some(&Record::new().with("id", id))).await?;
/// # let _ = alice;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    name: Arc<str>,
    id_field: Arc<str>,
    conn: Connection,
}

impl Table {
    #[must_use]
    pub fn new(conn: Connection, name: impl Into<Arc<str>>, id_field: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            id_field: id_field.into(),
            conn,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    async fn run(&self, built: QueryAndParams) -> Result<ResultSet, SqlTablesError> {
        self.conn.query(&built.query, &built.params).await
    }

    /// All rows matching every `column = value` pair of `filter`; every row when
    /// `filter` is `None` or empty.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn find(&self, filter: Option<&Record>) -> Result<Vec<CustomDbRow>, SqlTablesError> {
        let result_set = self.run(build_select(&self.name, filter)).await?;
        Ok(result_set.results)
    }

    /// First row [`Table::find`] returns, if any.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn find_one(
        &self,
        filter: Option<&Record>,
    ) -> Result<Option<CustomDbRow>, SqlTablesError> {
        Ok(self.find(filter).await?.into_iter().next())
    }

    /// Insert `record` and return the id the database generated for it.
    ///
    /// Yields `RowValues::Null` when the driver reports no generated id.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn insert(&self, record: &Record) -> Result<RowValues, SqlTablesError> {
        let result_set = self.run(build_insert(&self.name, record)).await?;
        Ok(result_set
            .last_insert_id
            .map_or(RowValues::Null, RowValues::Int))
    }

    /// Write every non-id column of `record` to the row whose id column equals
    /// the record's id, and return that id.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn update(&self, record: &Record) -> Result<RowValues, SqlTablesError> {
        self.run(build_update(&self.name, &self.id_field, record))
            .await?;
        Ok(record
            .get(&self.id_field)
            .cloned()
            .unwrap_or(RowValues::Null))
    }

    /// [`Table::update`] when the record's id is truthy, [`Table::insert`] otherwise.
    ///
    /// # Errors
    /// Returns whatever the chosen operation returns.
    pub async fn save(&self, record: &Record) -> Result<RowValues, SqlTablesError> {
        let has_id = record
            .get(&self.id_field)
            .is_some_and(RowValues::is_truthy);
        if has_id {
            self.update(record).await
        } else {
            self.insert(record).await
        }
    }

    /// `TRUNCATE` the table.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn truncate(&self) -> Result<ResultSet, SqlTablesError> {
        self.run(build_truncate(&self.name)).await
    }
}
