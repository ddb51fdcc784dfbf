use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::Query;
use sqlx::types::Json;

use crate::types::RowValues;

pub type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// Bind one value to the next `?` of `query`.
pub fn bind_value<'q>(query: MySqlQuery<'q>, value: &RowValues) -> MySqlQuery<'q> {
    match value {
        RowValues::Int(i) => query.bind(*i),
        RowValues::Float(f) => query.bind(*f),
        RowValues::Text(s) => query.bind(s.clone()),
        RowValues::Bool(b) => query.bind(*b),
        RowValues::Timestamp(dt) => query.bind(*dt),
        RowValues::Null => query.bind(None::<String>),
        RowValues::JSON(jval) => query.bind(Json(jval.clone())),
        RowValues::Blob(bytes) => query.bind(bytes.clone()),
    }
}

/// Build a sqlx query for `statement` with every parameter bound in order.
#[must_use]
pub fn bind_all<'q>(statement: &'q str, params: &[RowValues]) -> MySqlQuery<'q> {
    params
        .iter()
        .fold(sqlx::query(statement), |query, value| bind_value(query, value))
}
