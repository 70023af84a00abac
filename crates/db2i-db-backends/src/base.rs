//! Base connection contract and connection parameters.
//!
//! This module defines the [`Connection`] trait the adapter issues all SQL
//! through, along with [`ConnectionParams`] for building the driver's data
//! source name from [`AdapterSettings`].
//!
//! Connection establishment, pooling, and transactions are the caller's
//! business; the adapter only needs a live handle that can run statements.

use db2i_core::{AdapterResult, AdapterSettings};
use db2i_db::Row;

/// A live database connection.
///
/// All methods are synchronous: the adapter issues one statement at a time
/// and waits for it to complete before issuing the next. Failures should be
/// reported as [`AdapterError::ExecutionError`](db2i_core::AdapterError::ExecutionError);
/// the adapter propagates them unchanged.
pub trait Connection {
    /// Executes a statement that does not return rows.
    ///
    /// Returns the number of rows affected.
    fn execute(&self, sql: &str) -> AdapterResult<u64>;

    /// Executes a query and returns its first row, if any.
    fn fetch_row(&self, sql: &str) -> AdapterResult<Option<Row>>;

    /// Executes a query and returns all result rows.
    fn fetch_all(&self, sql: &str) -> AdapterResult<Vec<Row>>;

    /// Renders `value` as a SQL string literal, quotes included.
    fn quote_literal(&self, value: &str) -> String;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn execute(&self, sql: &str) -> AdapterResult<u64> {
        (**self).execute(sql)
    }

    fn fetch_row(&self, sql: &str) -> AdapterResult<Option<Row>> {
        (**self).fetch_row(sql)
    }

    fn fetch_all(&self, sql: &str) -> AdapterResult<Vec<Row>> {
        (**self).fetch_all(sql)
    }

    fn quote_literal(&self, value: &str) -> String {
        (**self).quote_literal(value)
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn execute(&self, sql: &str) -> AdapterResult<u64> {
        (**self).execute(sql)
    }

    fn fetch_row(&self, sql: &str) -> AdapterResult<Option<Row>> {
        (**self).fetch_row(sql)
    }

    fn fetch_all(&self, sql: &str) -> AdapterResult<Vec<Row>> {
        (**self).fetch_all(sql)
    }

    fn quote_literal(&self, value: &str) -> String {
        (**self).quote_literal(value)
    }
}

/// Parameters for connecting to a DB2 for i database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// The database name, or catalogued entry.
    pub database: String,
    /// The host for TCP/IP connections.
    pub host: Option<String>,
    /// The port, present whenever `host` is.
    pub port: Option<u16>,
    /// The user.
    pub user: String,
    /// The password.
    pub password: String,
    /// The default library for unqualified names; the user's own library.
    pub library: String,
}

impl ConnectionParams {
    /// Builds connection parameters from validated settings.
    pub fn from_settings(settings: &AdapterSettings) -> AdapterResult<Self> {
        settings.validate()?;
        Ok(Self {
            database: settings.database.clone(),
            host: settings.host.clone(),
            port: settings.port,
            user: settings.user.clone(),
            password: settings.password.clone(),
            library: settings.user.to_uppercase(),
        })
    }

    /// Returns the driver data source name.
    ///
    /// A host produces a full TCP/IP connection string; otherwise the database
    /// is treated as a catalogued entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use db2i_core::AdapterSettings;
    /// use db2i_db_backends::ConnectionParams;
    ///
    /// let settings = AdapterSettings {
    ///     name: "app".into(),
    ///     database: "PROD".into(),
    ///     ..AdapterSettings::default()
    /// };
    /// let params = ConnectionParams::from_settings(&settings).unwrap();
    /// assert_eq!(params.dsn(), "ibm:PROD");
    /// ```
    pub fn dsn(&self) -> String {
        match (&self.host, self.port) {
            (Some(host), Some(port)) => format!(
                "ibm:;DATABASE={};HOSTNAME={host};PORT={port};PROTOCOL=TCPIP;",
                self.database
            ),
            _ => format!("ibm:{}", self.database),
        }
    }
}
