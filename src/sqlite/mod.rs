// SQLite driver: one rusqlite connection owned by a worker thread.
//
// - params: RowValues -> rusqlite values
// - query: statement execution and result extraction
// - worker: the thread and the channel protocol in front of it

pub mod params;
pub mod query;
pub mod worker;

pub use query::build_result_set;
pub use worker::SqliteDriver;
