//! Statement counting assertions.
//!
//! Provides [`assert_num_statements`], which counts the statements a closure
//! executes against a [`FakeConnection`] and asserts the count matches. Catalog
//! queries are not counted.
//!
//! ## Example
//!
//! ```rust
//! use db2i_db_backends::Connection;
//! use db2i_test::{assert_num_statements, FakeConnection};
//!
//! let conn = FakeConnection::new();
//! assert_num_statements(&conn, 1, || {
//!     conn.execute("DROP TABLE APP.T").unwrap();
//! });
//! ```

use crate::test_database::FakeConnection;

/// Asserts that exactly `expected_count` statements are executed during the
/// closure.
///
/// Resets the connection's recorded statements before running the closure.
///
/// # Panics
///
/// Panics if the number of statements does not match `expected_count`.
pub fn assert_num_statements<F>(conn: &FakeConnection, expected_count: usize, f: F)
where
    F: FnOnce(),
{
    conn.reset();
    f();
    let actual = conn.statement_count();
    assert_eq!(
        actual, expected_count,
        "Expected {expected_count} SQL statements, but {actual} were executed: {:?}",
        conn.executed()
    );
}

/// Asserts that the closure executes no statements.
///
/// # Panics
///
/// Panics if any statement is executed.
pub fn assert_no_statements<F>(conn: &FakeConnection, f: F)
where
    F: FnOnce(),
{
    assert_num_statements(conn, 0, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use db2i_db_backends::Connection;

    #[test]
    fn test_assert_num_statements_passes() {
        let conn = FakeConnection::new();
        assert_num_statements(&conn, 2, || {
            conn.execute("A").unwrap();
            conn.execute("B").unwrap();
        });
    }

    #[test]
    fn test_assert_no_statements_ignores_queries() {
        let conn = FakeConnection::new();
        assert_no_statements(&conn, || {
            conn.fetch_all("SELECT 1").unwrap();
        });
    }

    #[test]
    #[should_panic(expected = "Expected 1 SQL statements, but 2 were executed")]
    fn test_assert_num_statements_fails_too_many() {
        let conn = FakeConnection::new();
        assert_num_statements(&conn, 1, || {
            conn.execute("A").unwrap();
            conn.execute("B").unwrap();
        });
    }

    #[test]
    fn test_resets_before_counting() {
        let conn = FakeConnection::new();
        conn.execute("before").unwrap();
        assert_num_statements(&conn, 0, || {});
    }
}
