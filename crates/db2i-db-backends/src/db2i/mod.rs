//! DB2 for i dialect support.
//!
//! - [`identifiers`] - case folding and schema qualification
//! - [`typemap`] - abstract ↔ dialect column types
//! - [`catalog`] - typed catalog rows and default normalization
//! - [`naming`] - derived index/foreign key names and column-set lookup
//! - [`introspection`] - catalog queries against a live connection

pub mod catalog;
pub mod identifiers;
pub mod introspection;
pub mod naming;
pub mod typemap;
