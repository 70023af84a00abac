//! # db2i-db
//!
//! Dialect-neutral value objects shared by the adapter crates.
//!
//! The migration orchestrator describes what it wants with the descriptors in
//! [`schema`]; backends answer catalog queries with [`Row`]s of [`Value`]s.
//! Nothing in this crate knows about a particular SQL dialect.
//!
//! ## Module Overview
//!
//! - [`value`] - The backend-agnostic [`Value`](value::Value) cell type
//! - [`row`] - [`Row`](row::Row) and typed extraction via [`FromValue`](row::FromValue)
//! - [`fields`] - Abstract column types, limits, defaults, referential actions
//! - [`schema`] - Table, column, index, and foreign key descriptors

// - struct_excessive_bools: ColumnDescriptor mirrors the orchestrator's column options
// - doc_markdown: backtick requirements for documentation items are too strict
// - return_self_not_must_use: builder pattern methods are self-documenting
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]

pub mod fields;
pub mod row;
pub mod schema;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use fields::{ColumnType, DefaultValue, IntegerWidth, Limit, ReferentialAction};
pub use row::{FromValue, Row};
pub use schema::{
    ColumnDescriptor, ForeignKeyDescriptor, IdColumn, IndexDescriptor, TableDescriptor,
    TableOptions,
};
pub use value::Value;
