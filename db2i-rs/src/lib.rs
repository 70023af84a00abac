//! # db2i-rs
//!
//! DDL generation and schema introspection for IBM DB2 for i.
//!
//! This is the meta-crate that re-exports the sub-crates. A migration
//! orchestrator supplies a [`db_backends::Connection`] and drives a
//! [`db_migrations::Db2SchemaEditor`]; everything else is plumbing.

/// Settings, logging, and error types.
pub use db2i_core as core;

/// Schema descriptors, column types, and row values.
pub use db2i_db as db;

/// Connection contract, type mapping, and catalog introspection.
pub use db2i_db_backends as db_backends;

/// Schema editor and column rename.
#[cfg(feature = "db-migrations")]
pub use db2i_db_migrations as db_migrations;

/// Fake connection and statement assertions for tests.
#[cfg(feature = "testing")]
pub use db2i_test as test;

/// The types most callers need.
pub mod prelude {
    pub use db2i_core::{AdapterError, AdapterResult, AdapterSettings};
    pub use db2i_db::{
        ColumnDescriptor, ColumnType, DefaultValue, ForeignKeyDescriptor, IdColumn,
        IndexDescriptor, IntegerWidth, Limit, ReferentialAction, Row, TableDescriptor,
        TableOptions, Value,
    };
    pub use db2i_db_backends::{Connection, ConnectionParams, SchemaIntrospector};

    #[cfg(feature = "db-migrations")]
    pub use db2i_db_migrations::{Db2SchemaEditor, SchemaEditor};
}
