use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SqlTablesError;
use crate::types::DatabaseType;

fn default_host() -> String {
    "localhost".to_string()
}

fn default_id_field() -> String {
    "id".to_string()
}

/// Options for opening the connection behind a [`crate::Db`].
///
/// Deserializes from the same JSON shape the connection is usually configured with:
/// ```rust
/// use sql_tables::prelude::*;
///
/// let opts = ConnectionOptions::from_json(
///     r#"{"host": "db", "user": "app", "db": "shop", "tables": ["users"], "idField": "uid"}"#,
/// )?;
/// assert_eq!(opts.database.as_deref(), Some("shop"));
/// assert_eq!(opts.id_field, "uid");
/// # Ok::<(), SqlTablesError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionOptions {
    #[serde(default)]
    pub backend: DatabaseType,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Database (schema) name for `MySQL`; file path or `:memory:` for `SQLite`.
    #[serde(default, alias = "db")]
    pub database: Option<String>,
    /// Tables to build accessors for up front.
    #[serde(default)]
    pub tables: Vec<String>,
    /// Primary-key column used by `update` and `save`.
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Log every statement and its parameters before it runs.
    #[serde(default)]
    pub debug: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            backend: DatabaseType::default(),
            host: default_host(),
            port: None,
            user: None,
            password: None,
            database: None,
            tables: Vec::new(),
            id_field: default_id_field(),
            debug: false,
        }
    }
}

impl ConnectionOptions {
    /// Options for a `MySQL` database on `host`.
    #[must_use]
    pub fn mysql(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            database: Some(database.into()),
            ..Self::default()
        }
    }

    /// Options for a `SQLite` database file (or `:memory:`).
    #[must_use]
    pub fn sqlite(db_path: impl Into<String>) -> Self {
        Self {
            backend: DatabaseType::Sqlite,
            database: Some(db_path.into()),
            ..Self::default()
        }
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    /// Returns `SqlTablesError::ConfigError` if the JSON is malformed or has wrongly typed keys.
    pub fn from_json(json: &str) -> Result<Self, SqlTablesError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn builder() -> ConnectionOptionsBuilder {
        ConnectionOptionsBuilder::new()
    }
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("tables", &self.tables)
            .field("id_field", &self.id_field)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Fluent builder for [`ConnectionOptions`].
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptionsBuilder {
    opts: ConnectionOptions,
}

impl ConnectionOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend(mut self, backend: DatabaseType) -> Self {
        self.opts.backend = backend;
        self
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.opts.host = host.into();
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.opts.port = Some(port);
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.opts.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.opts.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.opts.database = Some(database.into());
        self
    }

    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.opts.tables.push(table.into());
        self
    }

    #[must_use]
    pub fn tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opts.tables.extend(tables.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn id_field(mut self, id_field: impl Into<String>) -> Self {
        self.opts.id_field = id_field.into();
        self
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.opts.debug = debug;
        self
    }

    #[must_use]
    pub fn finish(self) -> ConnectionOptions {
        self.opts
    }

    /// Open the connection and build a [`crate::Db`].
    ///
    /// # Errors
    /// Returns `SqlTablesError` if the backend isn't compiled in or the connection can't be opened.
    pub async fn connect(self) -> Result<crate::Db, SqlTablesError> {
        crate::Db::connect(self.finish()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_keys_are_missing() {
        let opts = ConnectionOptions::from_json("{}").unwrap();
        assert_eq!(opts, ConnectionOptions::default());
        assert_eq!(opts.backend, DatabaseType::Mysql);
        assert_eq!(opts.host, "localhost");
        assert_eq!(opts.id_field, "id");
        assert!(!opts.debug);
        assert!(opts.tables.is_empty());
    }

    #[test]
    fn accepts_db_alias_and_camel_case_keys() {
        let opts = ConnectionOptions::from_json(
            r#"{"backend":"sqlite","db":":memory:","idField":"ID","debug":true,"port":3307}"#,
        )
        .unwrap();
        assert_eq!(opts.backend, DatabaseType::Sqlite);
        assert_eq!(opts.database.as_deref(), Some(":memory:"));
        assert_eq!(opts.id_field, "ID");
        assert_eq!(opts.port, Some(3307));
        assert!(opts.debug);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ConnectionOptions::from_json(r#"{"port":"not a number"}"#).unwrap_err();
        assert!(matches!(err, SqlTablesError::ConfigError(_)));
    }

    #[test]
    fn debug_output_hides_password() {
        let opts = ConnectionOptions::builder()
            .user("root")
            .password("hunter2")
            .finish();
        let printed = format!("{opts:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn builder_collects_tables_in_order() {
        let opts = ConnectionOptions::builder()
            .table("users")
            .tables(["orders", "items"])
            .finish();
        assert_eq!(opts.tables, vec!["users", "orders", "items"]);
    }
}
