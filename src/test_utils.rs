//! In-memory driver for tests: records every statement and replays scripted outcomes.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::driver::Driver;
use crate::error::SqlTablesError;
use crate::results::ResultSet;
use crate::types::{QueryAndParams, RowValues};

/// A [`Driver`] that never touches a database.
///
/// Each `execute` call is appended to [`RecordingDriver::executed`] and answered
/// with the next queued outcome, or an empty [`ResultSet`] once the queue is empty.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    executed: Mutex<Vec<QueryAndParams>>,
    outcomes: Mutex<VecDeque<Result<ResultSet, SqlTablesError>>>,
}

impl RecordingDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome for the next unanswered call.
    pub fn respond_with(&self, outcome: Result<ResultSet, SqlTablesError>) {
        lock(&self.outcomes).push_back(outcome);
    }

    /// Statements seen so far, oldest first.
    #[must_use]
    pub fn executed(&self) -> Vec<QueryAndParams> {
        lock(&self.executed).clone()
    }

    /// The most recent statement, if any.
    #[must_use]
    pub fn last(&self) -> Option<QueryAndParams> {
        lock(&self.executed).last().cloned()
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    async fn execute(
        &self,
        statement: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlTablesError> {
        lock(&self.executed).push(QueryAndParams::new(statement, params.to_vec()));
        lock(&self.outcomes)
            .pop_front()
            .unwrap_or_else(|| Ok(ResultSet::default()))
    }
}

// poisoned locks still hold usable data
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
