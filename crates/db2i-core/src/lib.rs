//! # db2i-core
//!
//! Core types, settings, and error types for db2i-rs.
//! This crate has zero adapter dependencies and provides the foundation for all other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and result alias
//! - [`settings`] - Adapter configuration (schema, connection options)
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{AdapterError, AdapterResult};
pub use settings::AdapterSettings;
