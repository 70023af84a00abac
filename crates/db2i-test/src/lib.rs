//! # db2i-test
//!
//! Testing utilities for db2i-rs. Provides a scripted in-memory
//! [`FakeConnection`](test_database::FakeConnection) that records every
//! statement it executes, builders for catalog rows, and assertion helpers
//! for counting the statements an operation issues.

#![allow(clippy::missing_panics_doc)]

pub mod assert_queries;
pub mod catalog_rows;
pub mod test_database;

pub use assert_queries::{assert_no_statements, assert_num_statements};
pub use catalog_rows::CatalogColumn;
pub use test_database::FakeConnection;
