use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::ConnectionOptions;
use crate::connection::Connection;
use crate::driver::{Driver, connect_driver};
use crate::error::SqlTablesError;
use crate::results::ResultSet;
use crate::table::Table;
use crate::types::RowValues;

/// Entry point: one open connection plus table accessors built on it.
///
/// ```rust,no_run
/// use sql_tables::prelude::*;
///
/// # async fn demo() -> Result<(), SqlTablesError> {
/// let db = ConnectionOptions::builder()
///     .host("localhost")
///     .user("app")
///     .password("secret")
///     .database("shop")
///     .table("users")
///     .connect()
///     .await?;
///
/// let users = db.get_table("users").expect("pre-bound");
/// let active = users.find(Some(&Record::new().with("status", "active"))).await?;
/// let orders = db.table("orders").find(None).await?;
/// # let _ = (active, orders);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct Db {
    conn: Connection,
    id_field: Arc<str>,
    tables: HashMap<String, Table>,
}

impl Db {
    /// Open the backend named in `options` and pre-bind `options.tables`.
    ///
    /// # Errors
    /// Returns `SqlTablesError` if the backend isn't compiled in or refuses the connection.
    pub async fn connect(options: ConnectionOptions) -> Result<Self, SqlTablesError> {
        if options.debug {
            debug!(target: "sql_tables", ?options, "sql options");
        }
        let driver = connect_driver(&options).await?;
        Ok(Self::with_driver(driver, &options))
    }

    /// Build on an already opened driver. Only `tables`, `id_field` and `debug`
    /// are read from `options`.
    #[must_use]
    pub fn with_driver(driver: Arc<dyn Driver>, options: &ConnectionOptions) -> Self {
        let conn = Connection::new(driver, options.debug);
        let id_field: Arc<str> = Arc::from(options.id_field.as_str());
        let tables = options
            .tables
            .iter()
            .map(|name| {
                let table = Table::new(conn.clone(), name.as_str(), Arc::clone(&id_field));
                (name.clone(), table)
            })
            .collect();

        Self {
            conn,
            id_field,
            tables,
        }
    }

    /// Accessor for any table, pre-bound or not.
    #[must_use]
    pub fn table(&self, name: &str) -> Table {
        Table::new(self.conn.clone(), name, Arc::clone(&self.id_field))
    }

    /// Accessors built at construction from `ConnectionOptions::tables`.
    #[must_use]
    pub fn tables(&self) -> &HashMap<String, Table> {
        &self.tables
    }

    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Run an arbitrary statement on the shared connection.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn query(
        &self,
        statement: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlTablesError> {
        self.conn.query(statement, params).await
    }

    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
