// MySQL driver: a single sqlx connection behind an async mutex.
//
// - params: binding RowValues onto a sqlx query
// - query: row decoding into RowValues
// - driver: connect + execute

pub mod driver;
pub mod params;
pub mod query;

pub use driver::MySqlDriver;
