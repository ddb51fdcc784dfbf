use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use async_trait::async_trait;
use rusqlite::types::Value;
use tokio::sync::oneshot;
use tracing::debug;

use crate::config::ConnectionOptions;
use crate::driver::Driver;
use crate::error::SqlTablesError;
use crate::results::ResultSet;
use crate::types::RowValues;

use super::params::Params;
use super::query::execute_statement;

/// `SQLite` driver backed by a dedicated worker thread.
///
/// The worker owns the only `rusqlite::Connection` and runs commands in the
/// order they arrive, so overlapping calls are serialized.
pub struct SqliteDriver {
    worker: SqliteWorker,
}

impl SqliteDriver {
    /// Open the database named by `options.database` (a path or `:memory:`).
    ///
    /// # Errors
    /// Returns `SqlTablesError::ConfigError` if no database path is set,
    /// `SqlTablesError::SqliteError` if `SQLite` can't open it, or
    /// `SqlTablesError::ConnectionError` if the worker thread can't be spawned.
    pub fn connect(options: &ConnectionOptions) -> Result<Self, SqlTablesError> {
        let db_path = options.database.as_deref().ok_or_else(|| {
            SqlTablesError::ConfigError("SQLite needs a database path or :memory:".into())
        })?;
        let conn = rusqlite::Connection::open(db_path)?;
        Self::from_connection(conn, db_path)
    }

    /// Wrap an already opened connection.
    ///
    /// # Errors
    /// Returns `SqlTablesError::ConnectionError` if the worker thread can't be spawned.
    pub fn from_connection(
        conn: rusqlite::Connection,
        label: &str,
    ) -> Result<Self, SqlTablesError> {
        let worker = SqliteWorker::spawn(conn, label)?;
        Ok(Self { worker })
    }
}

#[async_trait]
impl Driver for SqliteDriver {
    async fn execute(
        &self,
        statement: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlTablesError> {
        let params = Params::convert(params).into_values();
        self.worker.execute(statement.to_owned(), params).await
    }
}

impl fmt::Debug for SqliteDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteDriver").finish_non_exhaustive()
    }
}

struct SqliteWorker {
    sender: Sender<Command>,
}

impl SqliteWorker {
    fn spawn(conn: rusqlite::Connection, label: &str) -> Result<Self, SqlTablesError> {
        let (sender, receiver) = mpsc::channel::<Command>();
        thread::Builder::new()
            .name("sqlite-worker".to_string())
            .spawn(move || run_sqlite_worker(&conn, &receiver))
            .map_err(|err| {
                SqlTablesError::ConnectionError(format!(
                    "failed to spawn SQLite worker thread: {err}"
                ))
            })?;
        debug!(target: "sql_tables", db = label, "sqlite worker started");

        Ok(Self { sender })
    }

    fn send_command(&self, command: Command) -> Result<(), SqlTablesError> {
        self.sender
            .send(command)
            .map_err(|_| SqlTablesError::ConnectionError("SQLite worker closed".into()))
    }

    async fn execute(
        &self,
        statement: String,
        params: Vec<Value>,
    ) -> Result<ResultSet, SqlTablesError> {
        let (tx, rx) = oneshot::channel();
        self.send_command(Command::Execute {
            statement,
            params,
            respond_to: tx,
        })?;
        rx.await.map_err(|_| {
            SqlTablesError::ConnectionError("SQLite worker dropped while executing".into())
        })?
    }
}

impl Drop for SqliteWorker {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown);
    }
}

enum Command {
    Execute {
        statement: String,
        params: Vec<Value>,
        respond_to: oneshot::Sender<Result<ResultSet, SqlTablesError>>,
    },
    Shutdown,
}

fn run_sqlite_worker(conn: &rusqlite::Connection, receiver: &Receiver<Command>) {
    while let Ok(command) = receiver.recv() {
        match command {
            Command::Execute {
                statement,
                params,
                respond_to,
            } => {
                let outcome = execute_statement(conn, &statement, &params);
                // caller may have dropped its future
                let _ = respond_to.send(outcome);
            }
            Command::Shutdown => break,
        }
    }
}
