use std::fmt;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{Connection as _, Either};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::ConnectionOptions;
use crate::driver::Driver;
use crate::error::SqlTablesError;
use crate::results::ResultSet;
use crate::types::RowValues;

use super::params::bind_all;
use super::query::push_row;

/// `MySQL` driver over one persistent sqlx connection.
///
/// Statements run one at a time; concurrent callers wait on the connection lock.
pub struct MySqlDriver {
    conn: Mutex<MySqlConnection>,
}

impl MySqlDriver {
    /// Open a connection using host, port, user, password and database from `options`.
    ///
    /// # Errors
    /// Returns `SqlTablesError::MysqlError` if the server can't be reached or rejects the login.
    pub async fn connect(options: &ConnectionOptions) -> Result<Self, SqlTablesError> {
        let conn = MySqlConnection::connect_with(&connect_options(options)).await?;
        debug!(target: "sql_tables", host = %options.host, "mysql connection opened");
        Ok(Self::from_connection(conn))
    }

    #[must_use]
    pub fn from_connection(conn: MySqlConnection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

/// Translate [`ConnectionOptions`] into sqlx connect options; unset fields keep sqlx defaults.
#[must_use]
pub fn connect_options(options: &ConnectionOptions) -> MySqlConnectOptions {
    let mut connect = MySqlConnectOptions::new().host(&options.host);
    if let Some(port) = options.port {
        connect = connect.port(port);
    }
    if let Some(user) = &options.user {
        connect = connect.username(user);
    }
    if let Some(password) = &options.password {
        connect = connect.password(password);
    }
    if let Some(database) = &options.database {
        connect = connect.database(database);
    }
    connect
}

#[async_trait]
impl Driver for MySqlDriver {
    async fn execute(
        &self,
        statement: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlTablesError> {
        let mut conn = self.conn.lock().await;
        let mut result_set = ResultSet::default();
        let mut rows_affected: u64 = 0;
        let mut last_insert_id = None;

        // fetch_many yields rows and the final OK packet, so reads and writes share one path.
        // Deprecated in sqlx 0.8 over multi-statement strings, not removed; sqlx is
        // pinned to 0.8.x in Cargo.toml for this call.
        #[allow(deprecated)]
        let mut stream = bind_all(statement, params).fetch_many(&mut *conn);
        while let Some(item) = stream.try_next().await? {
            match item {
                Either::Left(done) => {
                    rows_affected += done.rows_affected();
                    // 0 means no AUTO_INCREMENT value was generated
                    if done.last_insert_id() != 0 {
                        last_insert_id = Some(insert_id_to_i64(done.last_insert_id())?);
                    }
                }
                Either::Right(row) => push_row(&mut result_set, &row)?,
            }
        }
        drop(stream);

        if result_set.get_column_names().is_none() {
            let rows_affected = usize::try_from(rows_affected).map_err(|_| {
                SqlTablesError::ExecutionError(format!(
                    "rows affected out of range: {rows_affected}"
                ))
            })?;
            return Ok(ResultSet::from_write(rows_affected, last_insert_id));
        }
        Ok(result_set)
    }
}

fn insert_id_to_i64(id: u64) -> Result<i64, SqlTablesError> {
    i64::try_from(id).map_err(|_| {
        SqlTablesError::ExecutionError(format!("insert id {id} does not fit in i64"))
    })
}

impl fmt::Debug for MySqlDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlDriver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_carry_configured_fields() {
        let opts = ConnectionOptions::builder()
            .host("db.internal")
            .port(3307)
            .user("app")
            .database("shop")
            .finish();
        let connect = connect_options(&opts);
        assert_eq!(connect.get_host(), "db.internal");
        assert_eq!(connect.get_port(), 3307);
        assert_eq!(connect.get_username(), "app");
        assert_eq!(connect.get_database(), Some("shop"));
    }

    #[test]
    fn insert_ids_past_i64_are_rejected() {
        assert_eq!(insert_id_to_i64(42).unwrap(), 42);
        let err = insert_id_to_i64(u64::MAX).unwrap_err();
        assert!(matches!(err, SqlTablesError::ExecutionError(_)));
    }
}
