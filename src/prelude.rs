//! Convenient imports for common functionality.

pub use crate::config::{ConnectionOptions, ConnectionOptionsBuilder};
pub use crate::connection::Connection;
pub use crate::db::Db;
pub use crate::driver::Driver;
pub use crate::error::SqlTablesError;
pub use crate::query_builder::{build_insert, build_select, build_truncate, build_update};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::table::Table;
pub use crate::types::{DatabaseType, QueryAndParams, Record, RowValues};

#[cfg(feature = "mysql")]
pub use crate::mysql::MySqlDriver;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteDriver;
