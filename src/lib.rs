//! # sql-tables
//!
//! Small async CRUD helpers over one database connection. Give it connection
//! options and a table name and you get `find`, `find_one`, `insert`, `update`,
//! `save` and `truncate`, each a single parameterized statement.
//!
//! ```rust,no_run
//! use sql_tables::prelude::*;
//!
//! # async fn demo() -> Result<(), SqlTablesError> {
//! let db = Db::connect(ConnectionOptions::sqlite(":memory:")).await?;
//! db.query("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)", &[]).await?;
//!
//! let users = db.table("users");
//! let id = users.insert(&Record::new().with("name", "alice")).await?;
//! users.save(&Record::new().with("id", id).with("name", "alicia")).await?;
//! let rows = users.find(Some(&Record::new().with("name", "alicia"))).await?;
//! assert_eq!(rows.len(), 1);
//! # Ok(()) }
//! ```
//!
//! Backends are cargo features: `mysql` (default) and `sqlite`. Any other
//! database can be plugged in by implementing [`Driver`] and calling
//! [`Db::with_driver`].

pub mod config;
pub mod connection;
pub mod db;
pub mod driver;
pub mod error;
pub mod prelude;
pub mod query_builder;
pub mod results;
pub mod table;
pub mod types;

#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConnectionOptions, ConnectionOptionsBuilder};
pub use connection::Connection;
pub use db::Db;
pub use driver::Driver;
pub use error::SqlTablesError;
pub use results::{CustomDbRow, ResultSet};
pub use table::Table;
pub use types::{DatabaseType, QueryAndParams, Record, RowValues};
