//! Column type system used by the schema descriptors.

pub mod types;

pub use types::{ColumnType, DefaultValue, IntegerWidth, Limit, ReferentialAction};
