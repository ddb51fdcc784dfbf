use thiserror::Error;

/// Everything a query can fail with.
///
/// Driver errors are wrapped transparently: whatever MySQL or SQLite reported
/// (syntax errors, constraint violations, lost connections) reaches the caller
/// unchanged.
#[derive(Debug, Error)]
pub enum SqlTablesError {
    #[cfg(feature = "mysql")]
    #[error(transparent)]
    MysqlError(#[from] sqlx::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),
}

impl From<serde_json::Error> for SqlTablesError {
    fn from(err: serde_json::Error) -> Self {
        SqlTablesError::ConfigError(format!("invalid connection options: {err}"))
    }
}
