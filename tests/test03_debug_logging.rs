use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use sql_tables::prelude::*;
use sql_tables::test_utils::RecordingDriver;
use tracing_subscriber::fmt::writer::MakeWriter;

/// Collects everything the fmt subscriber writes.
#[derive(Clone, Default)]
struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().expect("log buffer lock")).into_owned()
    }

    fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

struct CapturedLogsGuard {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogsGuard;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedLogsGuard {
            buf: self.buf.clone(),
        }
    }
}

impl Write for CapturedLogsGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn db_with_debug(debug: bool) -> Db {
    let options = ConnectionOptions::builder().debug(debug).finish();
    Db::with_driver(Arc::new(RecordingDriver::new()), &options)
}

#[tokio::test]
async fn debug_on_logs_statement_and_values() -> Result<(), SqlTablesError> {
    let logs = CapturedLogs::default();
    let _guard = logs.install();

    let db = db_with_debug(true);
    db.table("users")
        .find(Some(&Record::new().with("name", "bob").with("age", 42)))
        .await?;

    let out = logs.contents();
    assert!(out.contains("executing statement"), "{out}");
    assert!(
        out.contains("SELECT * FROM users WHERE name = ? AND age = ?"),
        "{out}"
    );
    assert!(out.contains(r#"Text("bob")"#), "{out}");
    assert!(out.contains("Int(42)"), "{out}");
    assert!(out.contains("sql_tables"), "{out}");
    Ok(())
}

#[tokio::test]
async fn debug_off_logs_nothing() -> Result<(), SqlTablesError> {
    let logs = CapturedLogs::default();
    let _guard = logs.install();

    let db = db_with_debug(false);
    let users = db.table("users");
    users.find(None).await?;
    users.insert(&Record::new().with("name", "bob")).await?;
    db.query("SELECT 1", &[]).await?;

    assert_eq!(logs.contents(), "");
    Ok(())
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn options_log_redacts_the_password() -> Result<(), SqlTablesError> {
    let logs = CapturedLogs::default();
    let _guard = logs.install();

    let options = ConnectionOptions::builder()
        .backend(DatabaseType::Sqlite)
        .database(":memory:")
        .user("app")
        .password("hunter2")
        .debug(true)
        .finish();
    Db::connect(options).await?;

    let out = logs.contents();
    assert!(out.contains("sql options"), "{out}");
    assert!(out.contains("***"), "{out}");
    assert!(!out.contains("hunter2"), "{out}");
    Ok(())
}
