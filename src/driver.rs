use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ConnectionOptions;
use crate::error::SqlTablesError;
use crate::results::ResultSet;
use crate::types::{DatabaseType, RowValues};

/// One open database connection that can run a parameterized statement.
///
/// Statements use positional `?` placeholders. Implementations must hand back
/// driver errors as they are; callers rely on seeing the original failure.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Run a single statement. Row-returning statements fill `results`; anything
    /// else reports `rows_affected` and, for inserts, `last_insert_id`.
    async fn execute(
        &self,
        statement: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlTablesError>;
}

/// Open the driver selected by `options.backend`.
///
/// # Errors
/// Returns `SqlTablesError::Unimplemented` if that backend's feature is not enabled,
/// or whatever the backend reports while connecting.
pub async fn connect_driver(
    options: &ConnectionOptions,
) -> Result<Arc<dyn Driver>, SqlTablesError> {
    match options.backend {
        #[cfg(feature = "mysql")]
        DatabaseType::Mysql => {
            let driver = crate::mysql::MySqlDriver::connect(options).await?;
            Ok(Arc::new(driver))
        }
        #[cfg(feature = "sqlite")]
        DatabaseType::Sqlite => {
            let driver = crate::sqlite::SqliteDriver::connect(options)?;
            Ok(Arc::new(driver))
        }
        #[allow(unreachable_patterns)]
        other => Err(SqlTablesError::Unimplemented(format!(
            "{other:?} support is not enabled in the current build"
        ))),
    }
}
