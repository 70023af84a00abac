//! Abstract column type definitions.
//!
//! [`ColumnType`] is the migration framework's dialect-neutral vocabulary.
//! Backends decide which of these they can express; the rest fail with
//! [`AdapterError::UnsupportedType`] at translation time.

use std::fmt;
use std::str::FromStr;

use db2i_core::AdapterError;

/// A dialect-neutral column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Time of day.
    Time,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
    /// Date and time (timestamp semantics).
    Timestamp,
    /// Fixed-length character data.
    Char,
    /// Variable-length character data.
    String,
    /// Long character data.
    Text,
    /// Fixed-length binary data.
    Binary,
    /// Variable-length binary data.
    VarBinary,
    /// Binary large object.
    Blob,
    /// Single-precision floating point.
    Float,
    /// Double-precision floating point.
    Double,
    /// Integer; width chosen by the column limit.
    Integer,
    /// 64-bit integer.
    BigInteger,
    /// Fixed-precision decimal.
    Decimal,
    /// True/false.
    Boolean,
    /// Bit field.
    Bit,
    /// UUID.
    Uuid,
    /// JSON document.
    Json,
    /// Binary JSON document.
    Jsonb,
    /// One of a fixed set of strings.
    Enum,
    /// Subset of a fixed set of strings.
    Set,
    /// Spatial geometry.
    Geometry,
    /// Spatial point.
    Point,
    /// Spatial line string.
    LineString,
    /// Spatial polygon.
    Polygon,
}

impl ColumnType {
    /// Every abstract type, in declaration order.
    pub const ALL: [Self; 26] = [
        Self::Time,
        Self::Date,
        Self::DateTime,
        Self::Timestamp,
        Self::Char,
        Self::String,
        Self::Text,
        Self::Binary,
        Self::VarBinary,
        Self::Blob,
        Self::Float,
        Self::Double,
        Self::Integer,
        Self::BigInteger,
        Self::Decimal,
        Self::Boolean,
        Self::Bit,
        Self::Uuid,
        Self::Json,
        Self::Jsonb,
        Self::Enum,
        Self::Set,
        Self::Geometry,
        Self::Point,
        Self::LineString,
        Self::Polygon,
    ];

    /// The framework's lower-case name for this type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Char => "char",
            Self::String => "string",
            Self::Text => "text",
            Self::Binary => "binary",
            Self::VarBinary => "varbinary",
            Self::Blob => "blob",
            Self::Float => "float",
            Self::Double => "double",
            Self::Integer => "integer",
            Self::BigInteger => "biginteger",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Bit => "bit",
            Self::Uuid => "uuid",
            Self::Json => "json",
            Self::Jsonb => "jsonb",
            Self::Enum => "enum",
            Self::Set => "set",
            Self::Geometry => "geometry",
            Self::Point => "point",
            Self::LineString => "linestring",
            Self::Polygon => "polygon",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AdapterError::UnsupportedType(format!("unknown column type \"{s}\"")))
    }
}

/// Integer range sentinels, carried in a column's limit.
///
/// Only [`IntegerWidth::Small`] changes the generated SQL type today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum IntegerWidth {
    /// 16-bit range.
    Small,
    /// 32-bit range.
    Regular,
    /// 64-bit range.
    Big,
}

impl IntegerWidth {
    /// The raw sentinel value the migration framework uses for this width.
    pub const fn sentinel(self) -> u64 {
        match self {
            Self::Small => 65_535,
            Self::Regular => 4_294_967_295,
            Self::Big => u64::MAX,
        }
    }

    /// Maps a raw sentinel back to its width.
    pub const fn from_sentinel(raw: u64) -> Option<Self> {
        match raw {
            65_535 => Some(Self::Small),
            4_294_967_295 => Some(Self::Regular),
            u64::MAX => Some(Self::Big),
            _ => None,
        }
    }
}

/// A column limit: either a length or an integer width sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Limit {
    /// Character or byte length.
    Length(u32),
    /// Integer range sentinel.
    Integer(IntegerWidth),
}

impl Limit {
    /// Interprets a raw numeric limit, recognising the integer sentinels.
    ///
    /// # Examples
    ///
    /// ```
    /// use db2i_db::{IntegerWidth, Limit};
    ///
    /// assert_eq!(Limit::from_raw(65_535), Limit::Integer(IntegerWidth::Small));
    /// assert_eq!(Limit::from_raw(40), Limit::Length(40));
    /// ```
    pub fn from_raw(raw: u64) -> Self {
        IntegerWidth::from_sentinel(raw).map_or_else(
            || Self::Length(u32::try_from(raw).unwrap_or(u32::MAX)),
            Self::Integer,
        )
    }

    /// The length, if this limit is one.
    pub const fn length(self) -> Option<u32> {
        match self {
            Self::Length(n) => Some(n),
            Self::Integer(_) => None,
        }
    }

    /// The integer width, if this limit is one.
    pub const fn integer_width(self) -> Option<IntegerWidth> {
        match self {
            Self::Integer(w) => Some(w),
            Self::Length(_) => None,
        }
    }
}

/// A column default.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum DefaultValue {
    /// An explicit NULL default.
    Null,
    /// A boolean, rendered as `0`/`1`.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string, rendered quoted unless it is `CURRENT_TIMESTAMP`.
    String(String),
    /// A SQL keyword or expression rendered verbatim (e.g. `CURRENT_DATE`).
    Literal(String),
}

impl DefaultValue {
    /// The keyword that is never quoted even when supplied as a string.
    pub const CURRENT_TIMESTAMP: &'static str = "CURRENT_TIMESTAMP";

    /// Returns `true` for [`DefaultValue::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for DefaultValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Action taken on the referencing rows when a referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReferentialAction {
    /// Propagate the change (CASCADE).
    Cascade,
    /// Reject the change (RESTRICT).
    Restrict,
    /// Set the referencing columns to NULL.
    SetNull,
    /// Set the referencing columns to their defaults.
    SetDefault,
    /// Defer the check to end of statement (NO ACTION).
    NoAction,
}

impl ReferentialAction {
    /// The SQL keyword(s) for this action.
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_parse_and_display() {
        for t in ColumnType::ALL {
            assert_eq!(t.as_str().parse::<ColumnType>().unwrap(), t);
            assert_eq!(t.to_string(), t.as_str());
        }
        assert_eq!("BigInteger".parse::<ColumnType>().unwrap(), ColumnType::BigInteger);
    }

    #[test]
    fn test_column_type_parse_unknown() {
        let err = "interval".parse::<ColumnType>().unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedType(_)));
    }

    #[test]
    fn test_integer_width_sentinels() {
        for w in [IntegerWidth::Small, IntegerWidth::Regular, IntegerWidth::Big] {
            assert_eq!(IntegerWidth::from_sentinel(w.sentinel()), Some(w));
        }
        assert_eq!(IntegerWidth::from_sentinel(11), None);
    }

    #[test]
    fn test_limit_from_raw() {
        assert_eq!(Limit::from_raw(18_446_744_073_709_551_615), Limit::Integer(IntegerWidth::Big));
        assert_eq!(Limit::from_raw(255), Limit::Length(255));
        assert_eq!(Limit::from_raw(255).length(), Some(255));
        assert_eq!(Limit::Integer(IntegerWidth::Small).length(), None);
        assert_eq!(
            Limit::Integer(IntegerWidth::Small).integer_width(),
            Some(IntegerWidth::Small)
        );
    }

    #[test]
    fn test_default_value_from() {
        assert_eq!(DefaultValue::from("x"), DefaultValue::String("x".into()));
        assert_eq!(DefaultValue::from(3), DefaultValue::Int(3));
        assert_eq!(DefaultValue::from(true), DefaultValue::Bool(true));
        assert!(DefaultValue::Null.is_null());
    }

    #[test]
    fn test_referential_action_sql() {
        assert_eq!(ReferentialAction::Cascade.as_sql(), "CASCADE");
        assert_eq!(ReferentialAction::SetNull.as_sql(), "SET NULL");
        assert_eq!(ReferentialAction::NoAction.as_sql(), "NO ACTION");
    }
}
