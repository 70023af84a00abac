//! # db2i-db-migrations
//!
//! DDL generation for DB2 for i. Translates dialect-neutral schema
//! operations into statements and issues them through a
//! [`Connection`](db2i_db_backends::Connection).
//!
//! ## Module Overview
//!
//! - [`schema_editor`] - `SchemaEditor` trait and `Db2SchemaEditor`
//! - [`column_sql`] - column clause synthesis
//! - [`rename`] - column rename by copy
//! - [`command_log`] - record of the commands an editor has run

// Clippy overrides appropriate for a DDL generation crate.
#![allow(clippy::too_many_lines)]
#![allow(clippy::format_push_string)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod column_sql;
pub mod command_log;
pub mod rename;
pub mod schema_editor;

// Re-export key types at the crate root.
pub use column_sql::{ColumnClause, ColumnClauses, Generation};
pub use command_log::CommandLogEntry;
pub use rename::{RenameColumn, RenameState};
pub use schema_editor::{Db2SchemaEditor, SchemaEditor};
