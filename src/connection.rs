use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::driver::Driver;
use crate::error::SqlTablesError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Shared handle to the single open connection.
///
/// Cloning is cheap; every clone talks to the same driver. Overlapping calls are
/// queued by the driver itself.
#[derive(Clone)]
pub struct Connection {
    driver: Arc<dyn Driver>,
    debug: bool,
}

impl Connection {
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, debug: bool) -> Self {
        Self { driver, debug }
    }

    /// Run `statement` with `params` bound to its `?` placeholders.
    ///
    /// With `debug` on, the statement and values are logged before execution.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn query(
        &self,
        statement: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlTablesError> {
        if self.debug {
            debug!(target: "sql_tables", statement, values = ?params, "executing statement");
        }
        self.driver.execute(statement, params).await
    }

    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
