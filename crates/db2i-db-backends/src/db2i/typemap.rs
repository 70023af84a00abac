//! Type mapping between abstract column types and DB2 for i SQL types.
//!
//! [`to_dialect_type`] renders an abstract [`ColumnType`] as the dialect type
//! the DDL generator emits, carrying the type's default length or
//! precision/scale. [`to_abstract_type`] reads a catalog `DATA_TYPE` back.

use db2i_core::{AdapterError, AdapterResult};
use db2i_db::{ColumnType, IntegerWidth, Limit};

/// Default length for `CHAR` and `VARCHAR` columns.
pub const DEFAULT_CHAR_LENGTH: u32 = 255;
/// Default precision for `DECIMAL` columns.
pub const DEFAULT_DECIMAL_PRECISION: u32 = 18;
/// Default scale for `DECIMAL` columns.
pub const DEFAULT_DECIMAL_SCALE: u32 = 0;

/// A dialect SQL type with its default sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectType {
    /// The SQL type name, lower-case.
    pub name: &'static str,
    /// Default limit for the type.
    pub limit: Option<Limit>,
    /// Default precision.
    pub precision: Option<u32>,
    /// Default scale.
    pub scale: Option<u32>,
}

impl DialectType {
    const fn plain(name: &'static str) -> Self {
        Self {
            name,
            limit: None,
            precision: None,
            scale: None,
        }
    }

    const fn with_length(name: &'static str, length: u32) -> Self {
        Self {
            name,
            limit: Some(Limit::Length(length)),
            precision: None,
            scale: None,
        }
    }

    /// The type name as rendered in DDL.
    pub fn sql_name(&self) -> String {
        self.name.to_uppercase()
    }

    /// Returns `true` for `smallint`, `integer` and `bigint`.
    ///
    /// These never render a limit clause.
    pub fn is_integer_family(&self) -> bool {
        matches!(self.name, "smallint" | "integer" | "bigint")
    }

    /// Returns `true` for `decimal`.
    pub fn is_decimal(&self) -> bool {
        self.name == "decimal"
    }

    /// Returns `true` for types that take a `(length)` suffix.
    pub fn accepts_length(&self) -> bool {
        matches!(
            self.name,
            "char" | "varchar" | "binary" | "varbinary" | "blob"
        )
    }

    /// Returns `true` for types that carry a coded character set.
    pub fn is_character(&self) -> bool {
        matches!(self.name, "char" | "varchar" | "clob")
    }
}

/// Maps an abstract column type to the DB2 for i type.
///
/// `limit` only matters for [`ColumnType::Integer`], where the small integer
/// sentinel selects `smallint`.
///
/// # Errors
///
/// Returns [`AdapterError::UnsupportedType`] for types the dialect has no
/// mapping for.
///
/// # Examples
///
/// ```
/// use db2i_db::{ColumnType, IntegerWidth, Limit};
/// use db2i_db_backends::to_dialect_type;
///
/// let t = to_dialect_type(ColumnType::Integer, Some(Limit::Integer(IntegerWidth::Small))).unwrap();
/// assert_eq!(t.name, "smallint");
/// assert_eq!(to_dialect_type(ColumnType::Text, None).unwrap().name, "varchar");
/// ```
pub fn to_dialect_type(column_type: ColumnType, limit: Option<Limit>) -> AdapterResult<DialectType> {
    let mapped = match column_type {
        ColumnType::Time => DialectType::plain("time"),
        ColumnType::Date => DialectType::plain("date"),
        ColumnType::DateTime | ColumnType::Timestamp => DialectType::plain("timestamp"),
        ColumnType::Char => DialectType::with_length("char", DEFAULT_CHAR_LENGTH),
        ColumnType::String | ColumnType::Text => {
            DialectType::with_length("varchar", DEFAULT_CHAR_LENGTH)
        }
        ColumnType::Binary => DialectType::plain("binary"),
        ColumnType::VarBinary => DialectType::plain("varbinary"),
        ColumnType::Blob => DialectType::plain("blob"),
        ColumnType::Float => DialectType::plain("real"),
        ColumnType::Integer => {
            if limit == Some(Limit::Integer(IntegerWidth::Small)) {
                DialectType::plain("smallint")
            } else {
                DialectType::plain("integer")
            }
        }
        ColumnType::BigInteger => DialectType::plain("bigint"),
        ColumnType::Decimal => DialectType {
            name: "decimal",
            limit: None,
            precision: Some(DEFAULT_DECIMAL_PRECISION),
            scale: Some(DEFAULT_DECIMAL_SCALE),
        },
        ColumnType::Boolean => DialectType::with_length("smallint", 1),
        other => {
            return Err(AdapterError::UnsupportedType(format!(
                "The type: \"{other}\" is not supported."
            )))
        }
    };
    Ok(mapped)
}

/// An abstract type read back from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbstractType {
    /// The abstract column type.
    pub column_type: ColumnType,
    /// The limit implied by the dialect type, if any.
    pub limit: Option<Limit>,
}

impl AbstractType {
    const fn of(column_type: ColumnType) -> Self {
        Self {
            column_type,
            limit: None,
        }
    }
}

/// Maps a catalog `DATA_TYPE` back to an abstract type.
///
/// `SMALLINT` always comes back as an integer with the small width sentinel.
///
/// # Errors
///
/// Returns [`AdapterError::UnsupportedType`] for unrecognised dialect types.
pub fn to_abstract_type(sql_type: &str) -> AdapterResult<AbstractType> {
    let upper = sql_type.trim().to_uppercase();
    let mapped = match upper.as_str() {
        "TIME" => AbstractType::of(ColumnType::Time),
        "DATE" => AbstractType::of(ColumnType::Date),
        "TIMESTMP" | "TIMESTAMP" => AbstractType::of(ColumnType::Timestamp),
        "CHAR" => AbstractType::of(ColumnType::Char),
        "VARCHAR" | "CLOB" => AbstractType::of(ColumnType::String),
        "BINARY" => AbstractType::of(ColumnType::Binary),
        "VARBINARY" => AbstractType::of(ColumnType::VarBinary),
        "BLOB" => AbstractType::of(ColumnType::Blob),
        "REAL" | "DOUBLE" | "FLOAT" => AbstractType::of(ColumnType::Float),
        "SMALLINT" => AbstractType {
            column_type: ColumnType::Integer,
            limit: Some(Limit::Integer(IntegerWidth::Small)),
        },
        "INTEGER" => AbstractType::of(ColumnType::Integer),
        "BIGINT" => AbstractType::of(ColumnType::BigInteger),
        "DECIMAL" | "NUMERIC" => AbstractType::of(ColumnType::Decimal),
        _ => {
            return Err(AdapterError::UnsupportedType(format!(
                "The DB2 type: \"{sql_type}\" is not supported"
            )))
        }
    };
    Ok(mapped)
}
