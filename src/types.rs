use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Values that can be stored in a database row or used as query parameters.
///
/// The same enum is used for filters, records and result rows, whatever the backend:
/// ```rust
/// use sql_tables::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Whether the value counts as "set" when deciding between insert and update.
    ///
    /// NULL, zero, NaN, the empty string and `false` are falsy; anything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            RowValues::Null => false,
            RowValues::Int(i) => *i != 0,
            RowValues::Float(f) => *f != 0.0 && !f.is_nan(),
            RowValues::Text(s) => !s.is_empty(),
            RowValues::Bool(b) => *b,
            RowValues::Timestamp(_) | RowValues::JSON(_) | RowValues::Blob(_) => true,
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<i32> for RowValues {
    fn from(value: i32) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_owned())
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(value: NaiveDateTime) -> Self {
        RowValues::Timestamp(value)
    }
}

impl From<JsonValue> for RowValues {
    fn from(value: JsonValue) -> Self {
        RowValues::JSON(value)
    }
}

impl From<Vec<u8>> for RowValues {
    fn from(value: Vec<u8>) -> Self {
        RowValues::Blob(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

/// Ordered column → value mapping used both as a filter and as a row to write.
///
/// Column order is the order keys were first set, and it is the order the
/// generated SQL lists them in.
///
/// ```rust
/// use sql_tables::prelude::*;
///
/// let user = Record::new().with("name", "alice").with("age", 30);
/// assert_eq!(user.columns().collect::<Vec<_>>(), vec!["name", "age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, RowValues)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set`].
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.set(column, value);
        self
    }

    /// Set a column. An existing column keeps its position and gets the new value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<RowValues>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Remove a column, returning its value.
    pub fn remove(&mut self, column: &str) -> Option<RowValues> {
        let idx = self.fields.iter().position(|(name, _)| name == column)?;
        Some(self.fields.remove(idx).1)
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&RowValues> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<RowValues>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.set(column, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, RowValues);
    type IntoIter = std::vec::IntoIter<(String, RowValues)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// A query and its parameters bundled together.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters to be bound to the query
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }
}

/// The database behind a [`crate::Db`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// `MySQL` / `MariaDB`
    #[default]
    Mysql,
    /// `SQLite`, file or in-memory
    Sqlite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_save_dispatch_rules() {
        assert!(!RowValues::Null.is_truthy());
        assert!(!RowValues::Int(0).is_truthy());
        assert!(RowValues::Int(-3).is_truthy());
        assert!(!RowValues::Float(0.0).is_truthy());
        assert!(!RowValues::Float(f64::NAN).is_truthy());
        assert!(RowValues::Float(0.5).is_truthy());
        assert!(!RowValues::Text(String::new()).is_truthy());
        assert!(RowValues::Text("0".into()).is_truthy());
        assert!(!RowValues::Bool(false).is_truthy());
        assert!(RowValues::Blob(Vec::new()).is_truthy());
    }

    #[test]
    fn record_keeps_first_insertion_order() {
        let mut record = Record::new().with("b", 1).with("a", 2);
        record.set("b", 3);
        let fields: Vec<_> = record.iter().collect();
        assert_eq!(
            fields,
            vec![("b", &RowValues::Int(3)), ("a", &RowValues::Int(2))]
        );
    }

    #[test]
    fn record_remove_and_collect() {
        let mut record: Record = [("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(record.remove("x"), Some(RowValues::Int(1)));
        assert_eq!(record.remove("x"), None);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("y"), Some(&RowValues::Int(2)));
    }

    #[test]
    fn option_converts_to_null() {
        let none: Option<i64> = None;
        assert_eq!(RowValues::from(none), RowValues::Null);
        assert_eq!(RowValues::from(Some("x")), RowValues::Text("x".into()));
    }
}
