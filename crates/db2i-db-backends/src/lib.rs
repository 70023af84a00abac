//! # db2i-db-backends
//!
//! The connection contract and the DB2 for i dialect pieces that read or
//! describe schema without emitting DDL: identifier discipline, the type
//! mapper, catalog row normalization, and the schema introspector.
//!
//! DDL generation lives in `db2i-db-migrations`, which builds on the types
//! re-exported here.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

pub mod base;
pub mod db2i;

pub use base::{Connection, ConnectionParams};
pub use db2i::catalog::{CatalogColumnRow, CatalogForeignKey, CatalogIndex, IdentityGeneration};
pub use db2i::introspection::SchemaIntrospector;
pub use db2i::typemap::{to_abstract_type, to_dialect_type, AbstractType, DialectType};
