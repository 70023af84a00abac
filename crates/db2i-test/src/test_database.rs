//! A scripted, in-memory connection for tests.
//!
//! [`FakeConnection`] implements [`Connection`] without a database. Queries
//! are answered from rules registered with [`FakeConnection::on_query`]; every
//! statement passed to `execute` is recorded so tests can assert on the exact
//! SQL an operation issued, and in which order.
//!
//! ## Example
//!
//! ```rust
//! use db2i_db::{Row, Value};
//! use db2i_db_backends::Connection;
//! use db2i_test::FakeConnection;
//!
//! let conn = FakeConnection::new();
//! conn.on_query("SYSTABLES", vec![Row::from_pairs([("TABLE_NAME", Value::from("USERS"))])]);
//!
//! assert!(conn.fetch_row("SELECT * FROM APP.SYSTABLES").unwrap().is_some());
//! conn.execute("DROP TABLE APP.USERS").unwrap();
//! assert_eq!(conn.executed(), vec!["DROP TABLE APP.USERS".to_string()]);
//! ```

use std::sync::{Mutex, MutexGuard};

use db2i_core::{AdapterError, AdapterResult};
use db2i_db::Row;
use db2i_db_backends::Connection;

#[derive(Debug, Clone)]
struct FetchRule {
    pattern: String,
    rows: Vec<Row>,
}

#[derive(Debug, Default)]
struct State {
    executed: Vec<String>,
    queries: Vec<String>,
    rules: Vec<FetchRule>,
    failures: Vec<String>,
}

/// An in-memory [`Connection`] with scripted catalog responses.
///
/// - Queries return the rows of the first registered rule whose pattern is a
///   substring of the SQL, or no rows.
/// - Any statement or query containing a pattern registered with
///   [`fail_on`](Self::fail_on) fails with [`AdapterError::ExecutionError`]
///   and is not recorded as executed.
/// - Literals are quoted by doubling embedded single quotes.
#[derive(Debug, Default)]
pub struct FakeConnection {
    state: Mutex<State>,
}

impl FakeConnection {
    /// Creates a connection with no rules and no recorded statements.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Answers any query containing `pattern` with `rows`.
    pub fn on_query(&self, pattern: impl Into<String>, rows: Vec<Row>) {
        self.state().rules.push(FetchRule {
            pattern: pattern.into(),
            rows,
        });
    }

    /// Fails any statement or query containing `pattern`.
    pub fn fail_on(&self, pattern: impl Into<String>) {
        self.state().failures.push(pattern.into());
    }

    /// Returns the statements executed so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.state().executed.clone()
    }

    /// Returns the queries issued so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.state().queries.clone()
    }

    /// Returns the number of statements executed so far.
    pub fn statement_count(&self) -> usize {
        self.state().executed.len()
    }

    /// Forgets recorded statements and queries; rules are kept.
    pub fn reset(&self) {
        let mut state = self.state();
        state.executed.clear();
        state.queries.clear();
    }

    fn check_failure(state: &State, sql: &str) -> AdapterResult<()> {
        match state.failures.iter().find(|p| sql.contains(p.as_str())) {
            Some(pattern) => Err(AdapterError::ExecutionError(format!(
                "Injected failure for statement matching '{pattern}': {sql}"
            ))),
            None => Ok(()),
        }
    }

    fn answer(&self, sql: &str) -> AdapterResult<Vec<Row>> {
        let mut state = self.state();
        Self::check_failure(&state, sql)?;
        state.queries.push(sql.to_string());
        Ok(state
            .rules
            .iter()
            .find(|rule| sql.contains(rule.pattern.as_str()))
            .map(|rule| rule.rows.clone())
            .unwrap_or_default())
    }
}

impl Connection for FakeConnection {
    fn execute(&self, sql: &str) -> AdapterResult<u64> {
        let mut state = self.state();
        Self::check_failure(&state, sql)?;
        state.executed.push(sql.to_string());
        Ok(0)
    }

    fn fetch_row(&self, sql: &str) -> AdapterResult<Option<Row>> {
        Ok(self.answer(sql)?.into_iter().next())
    }

    fn fetch_all(&self, sql: &str) -> AdapterResult<Vec<Row>> {
        self.answer(sql)
    }

    fn quote_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}
