//! Typed catalog rows.
//!
//! The catalog views hand back loosely typed rows: numeric cells frequently
//! arrive as strings and column defaults arrive as SQL literal text, quote
//! marks included. The types here decode those rows once, so everything
//! downstream works with typed values.

use db2i_core::AdapterResult;
use db2i_db::{ColumnDescriptor, DefaultValue, Row, Value};

use super::typemap::to_abstract_type;

/// How an identity or generated column produces its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityGeneration {
    /// `GENERATED ALWAYS`
    Always,
    /// `GENERATED BY DEFAULT`
    ByDefault,
}

impl IdentityGeneration {
    /// Parses the catalog's `IDENTITY_GENERATION` text.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "ALWAYS" => Some(Self::Always),
            "BY DEFAULT" => Some(Self::ByDefault),
            _ => None,
        }
    }
}

/// One row of the column catalog, decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogColumnRow {
    /// `COLUMN_NAME`, as stored (upper-case).
    pub name: String,
    /// `DATA_TYPE`, e.g. `VARCHAR` or `TIMESTMP`.
    pub data_type: String,
    /// `IS_NULLABLE` is anything but `N`.
    pub nullable: bool,
    /// `IS_IDENTITY` is `YES`.
    pub identity: bool,
    /// `IDENTITY_GENERATION`.
    pub generation: Option<IdentityGeneration>,
    /// `COLUMN_DEFAULT`, normalized by data type.
    pub default: Option<DefaultValue>,
    /// `LENGTH`.
    pub length: Option<u32>,
    /// `NUMERIC_PRECISION`.
    pub precision: Option<u32>,
    /// `NUMERIC_SCALE`.
    pub scale: Option<u32>,
    /// `CCSID`.
    pub character_set_id: Option<u32>,
    /// `COLUMN_TEXT`.
    pub comment: Option<String>,
}

impl CatalogColumnRow {
    /// Decodes a row of the column catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::DatabaseError`](db2i_core::AdapterError::DatabaseError)
    /// when `COLUMN_NAME` or `DATA_TYPE` is missing.
    pub fn from_row(row: &Row) -> AdapterResult<Self> {
        let name: String = row.get("COLUMN_NAME")?;
        let data_type: String = row.get("DATA_TYPE")?;
        let data_type = data_type.trim().to_uppercase();

        let text = |column: &str| row.get_value(column).and_then(Value::as_text);
        let number = |column: &str| {
            row.get_value(column)
                .and_then(Value::as_i64_lenient)
                .and_then(|n| u32::try_from(n).ok())
        };

        let nullable = !text("IS_NULLABLE").is_some_and(|v| v.trim() == "N");
        let identity = text("IS_IDENTITY").is_some_and(|v| v.trim() == "YES");
        let generation = text("IDENTITY_GENERATION")
            .as_deref()
            .and_then(IdentityGeneration::parse);
        let default = normalize_default(&data_type, text("COLUMN_DEFAULT").as_deref());
        let comment = text("COLUMN_TEXT").filter(|c| !c.trim().is_empty());

        Ok(Self {
            name: name.trim().to_string(),
            default,
            nullable,
            identity,
            generation,
            length: number("LENGTH"),
            precision: number("NUMERIC_PRECISION"),
            scale: number("NUMERIC_SCALE"),
            character_set_id: number("CCSID"),
            comment,
            data_type,
        })
    }

    /// Returns `true` if the value is always generated by the database.
    pub fn is_generated_always(&self) -> bool {
        self.generation == Some(IdentityGeneration::Always)
    }

    /// Returns `true` for a row change timestamp column.
    pub fn is_row_change_timestamp(&self) -> bool {
        matches!(self.data_type.as_str(), "TIMESTMP" | "TIMESTAMP") && self.is_generated_always()
    }

    fn accepts_length(&self) -> bool {
        matches!(
            self.data_type.as_str(),
            "CHAR" | "VARCHAR" | "BINARY" | "VARBINARY" | "BLOB"
        )
    }

    fn is_character(&self) -> bool {
        matches!(self.data_type.as_str(), "CHAR" | "VARCHAR" | "CLOB")
    }

    /// Converts the row to a column descriptor.
    ///
    /// Lengths are kept only for types that take one, precision and scale
    /// only for decimals, and the CCSID only for character columns.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::UnsupportedType`](db2i_core::AdapterError::UnsupportedType)
    /// if the data type has no abstract counterpart.
    pub fn to_column_descriptor(&self) -> AdapterResult<ColumnDescriptor> {
        let abstract_type = to_abstract_type(&self.data_type)?;
        let mut column = ColumnDescriptor::new(self.name.clone(), abstract_type.column_type);
        column.limit = abstract_type.limit;
        if self.accepts_length() {
            column.limit = self.length.map(db2i_db::Limit::Length).or(column.limit);
        }
        if matches!(self.data_type.as_str(), "DECIMAL" | "NUMERIC") {
            column.precision = self.precision;
            column.scale = self.scale;
        }
        if self.is_character() {
            column.character_set_id = self.character_set_id.filter(|id| *id != 0);
        }
        column.null = self.nullable;
        column.default = self.default.clone();
        column.identity = self.identity;
        column.auto_update_timestamp = self.is_row_change_timestamp();
        column.comment = self.comment.clone();
        Ok(column)
    }
}

/// Normalizes a catalog default literal according to the column's type.
///
/// - `NULL` (or no default) becomes `None`.
/// - Integer types parse to [`DefaultValue::Int`].
/// - Decimal and floating types parse to [`DefaultValue::Float`].
/// - Character types lose one layer of surrounding quotes.
/// - Anything else is a string if quoted, otherwise a verbatim literal such
///   as `CURRENT_TIMESTAMP`.
///
/// # Examples
///
/// ```
/// use db2i_db::DefaultValue;
/// use db2i_db_backends::db2i::catalog::normalize_default;
///
/// assert_eq!(normalize_default("INTEGER", Some("0")), Some(DefaultValue::Int(0)));
/// assert_eq!(
///     normalize_default("VARCHAR", Some("'active'")),
///     Some(DefaultValue::String("active".into()))
/// );
/// assert_eq!(normalize_default("VARCHAR", Some("NULL")), None);
/// ```
pub fn normalize_default(data_type: &str, raw: Option<&str>) -> Option<DefaultValue> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("NULL") {
        return None;
    }
    let normalized = match data_type.trim().to_uppercase().as_str() {
        "SMALLINT" | "INTEGER" | "BIGINT" => raw
            .parse::<i64>()
            .map_or_else(|_| DefaultValue::Literal(raw.to_string()), DefaultValue::Int),
        "DECIMAL" | "NUMERIC" | "REAL" | "DOUBLE" | "FLOAT" => raw
            .parse::<f64>()
            .map_or_else(|_| DefaultValue::Literal(raw.to_string()), DefaultValue::Float),
        "CHAR" | "VARCHAR" | "CLOB" => {
            DefaultValue::String(strip_quotes(raw).unwrap_or(raw).replace("''", "'"))
        }
        _ => strip_quotes(raw).map_or_else(
            || DefaultValue::Literal(raw.to_string()),
            |inner| DefaultValue::String(inner.replace("''", "'")),
        ),
    };
    Some(normalized)
}

fn strip_quotes(raw: &str) -> Option<&str> {
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

/// An index and its columns, in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIndex {
    /// `INDEX_NAME`.
    pub name: String,
    /// `TABLE_NAME`.
    pub table: String,
    /// `COLUMN_NAME` per key position.
    pub columns: Vec<String>,
}

impl CatalogIndex {
    /// Groups index key rows by index name, keeping catalog order.
    pub fn group(rows: &[Row]) -> AdapterResult<Vec<Self>> {
        let mut indexes: Vec<Self> = Vec::new();
        for row in rows {
            let name: String = row.get("INDEX_NAME")?;
            let column: String = row.get("COLUMN_NAME")?;
            let table = row
                .get_value("TABLE_NAME")
                .and_then(Value::as_text)
                .unwrap_or_default();
            let name = name.trim().to_string();
            if let Some(index) = indexes.iter_mut().find(|i| i.name == name) {
                index.columns.push(column.trim().to_string());
            } else {
                indexes.push(Self {
                    name,
                    table: table.trim().to_string(),
                    columns: vec![column.trim().to_string()],
                });
            }
        }
        Ok(indexes)
    }
}

/// A foreign key constraint and its column pairs, in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogForeignKey {
    /// `FK_NAME`.
    pub name: String,
    /// `FKTABLE_NAME`.
    pub table: String,
    /// `FKCOLUMN_NAME` per key position.
    pub columns: Vec<String>,
    /// `PKTABLE_NAME`.
    pub referenced_table: String,
    /// `PKCOLUMN_NAME` per key position.
    pub referenced_columns: Vec<String>,
}

impl CatalogForeignKey {
    /// Groups foreign key rows by constraint name, keeping catalog order.
    pub fn group(rows: &[Row]) -> AdapterResult<Vec<Self>> {
        let mut keys: Vec<Self> = Vec::new();
        for row in rows {
            let name: String = row.get("FK_NAME")?;
            let table: String = row.get("FKTABLE_NAME")?;
            let column: String = row.get("FKCOLUMN_NAME")?;
            let referenced_table: String = row.get("PKTABLE_NAME")?;
            let referenced_column: String = row.get("PKCOLUMN_NAME")?;
            let name = name.trim().to_string();
            if let Some(key) = keys.iter_mut().find(|k| k.name == name) {
                key.columns.push(column.trim().to_string());
                key.referenced_columns.push(referenced_column.trim().to_string());
            } else {
                keys.push(Self {
                    name,
                    table: table.trim().to_string(),
                    columns: vec![column.trim().to_string()],
                    referenced_table: referenced_table.trim().to_string(),
                    referenced_columns: vec![referenced_column.trim().to_string()],
                });
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db2i_core::AdapterError;
    use db2i_db::{ColumnType, IntegerWidth, Limit};

    fn column_row(pairs: &[(&str, Value)]) -> Row {
        Row::from_pairs(pairs.iter().map(|(k, v)| (*k, v.clone())))
    }

    // ── Default normalization ───────────────────────────────────────────

    #[test]
    fn test_normalize_integer_defaults() {
        assert_eq!(normalize_default("SMALLINT", Some("1")), Some(DefaultValue::Int(1)));
        assert_eq!(normalize_default("BIGINT", Some(" -7 ")), Some(DefaultValue::Int(-7)));
        assert_eq!(
            normalize_default("INTEGER", Some("NEXT VALUE FOR SEQ")),
            Some(DefaultValue::Literal("NEXT VALUE FOR SEQ".into()))
        );
    }

    #[test]
    fn test_normalize_float_defaults() {
        assert_eq!(
            normalize_default("DECIMAL", Some("12.50")),
            Some(DefaultValue::Float(12.5))
        );
        assert_eq!(normalize_default("REAL", Some("0")), Some(DefaultValue::Float(0.0)));
    }

    #[test]
    fn test_normalize_character_defaults_strip_one_layer() {
        assert_eq!(
            normalize_default("CHAR", Some("'Y'")),
            Some(DefaultValue::String("Y".into()))
        );
        assert_eq!(
            normalize_default("VARCHAR", Some("'''quoted'''")),
            Some(DefaultValue::String("'quoted'".into()))
        );
        assert_eq!(
            normalize_default("VARCHAR", Some("''")),
            Some(DefaultValue::String(String::new()))
        );
    }

    #[test]
    fn test_normalize_null_default_is_absent() {
        assert_eq!(normalize_default("INTEGER", Some("NULL")), None);
        assert_eq!(normalize_default("INTEGER", None), None);
    }

    #[test]
    fn test_normalize_other_types() {
        assert_eq!(
            normalize_default("TIMESTMP", Some("CURRENT_TIMESTAMP")),
            Some(DefaultValue::Literal("CURRENT_TIMESTAMP".into()))
        );
        assert_eq!(
            normalize_default("DATE", Some("'2020-01-01'")),
            Some(DefaultValue::String("2020-01-01".into()))
        );
    }

    // ── Column rows ─────────────────────────────────────────────────────

    #[test]
    fn test_from_row_decodes_stringified_numbers() {
        let row = column_row(&[
            ("COLUMN_NAME", Value::from("EMAIL")),
            ("DATA_TYPE", Value::from("VARCHAR")),
            ("IS_NULLABLE", Value::from("N")),
            ("IS_IDENTITY", Value::from("NO")),
            ("IDENTITY_GENERATION", Value::Null),
            ("COLUMN_DEFAULT", Value::from("'none'")),
            ("LENGTH", Value::from("120")),
            ("NUMERIC_PRECISION", Value::Null),
            ("NUMERIC_SCALE", Value::Null),
            ("CCSID", Value::from("37")),
            ("COLUMN_TEXT", Value::from("Login")),
        ]);
        let col = CatalogColumnRow::from_row(&row).unwrap();
        assert_eq!(col.name, "EMAIL");
        assert!(!col.nullable);
        assert!(!col.identity);
        assert_eq!(col.length, Some(120));
        assert_eq!(col.character_set_id, Some(37));
        assert_eq!(col.default, Some(DefaultValue::String("none".into())));
        assert_eq!(col.comment.as_deref(), Some("Login"));
    }

    #[test]
    fn test_from_row_missing_name() {
        let row = column_row(&[("DATA_TYPE", Value::from("INTEGER"))]);
        assert!(matches!(
            CatalogColumnRow::from_row(&row),
            Err(AdapterError::DatabaseError(_))
        ));
    }

    #[test]
    fn test_row_change_timestamp() {
        let row = column_row(&[
            ("COLUMN_NAME", Value::from("UPDATED_AT")),
            ("DATA_TYPE", Value::from("TIMESTMP")),
            ("IDENTITY_GENERATION", Value::from("ALWAYS")),
        ]);
        let col = CatalogColumnRow::from_row(&row).unwrap();
        assert!(col.is_generated_always());
        assert!(col.is_row_change_timestamp());
        assert!(col.to_column_descriptor().unwrap().auto_update_timestamp);
    }

    #[test]
    fn test_to_column_descriptor_smallint() {
        let row = column_row(&[
            ("COLUMN_NAME", Value::from("FLAG")),
            ("DATA_TYPE", Value::from("SMALLINT")),
            ("IS_NULLABLE", Value::from("Y")),
            ("COLUMN_DEFAULT", Value::from("0")),
            ("LENGTH", Value::Int(2)),
            ("NUMERIC_PRECISION", Value::Int(5)),
        ]);
        let col = CatalogColumnRow::from_row(&row)
            .unwrap()
            .to_column_descriptor()
            .unwrap();
        assert_eq!(col.column_type, ColumnType::Integer);
        assert_eq!(col.limit, Some(Limit::Integer(IntegerWidth::Small)));
        assert_eq!(col.precision, None);
        assert!(col.null);
        assert_eq!(col.default, Some(DefaultValue::Int(0)));
    }

    #[test]
    fn test_to_column_descriptor_decimal() {
        let row = column_row(&[
            ("COLUMN_NAME", Value::from("PRICE")),
            ("DATA_TYPE", Value::from("DECIMAL")),
            ("NUMERIC_PRECISION", Value::from("10")),
            ("NUMERIC_SCALE", Value::from("2")),
            ("CCSID", Value::from("0")),
        ]);
        let col = CatalogColumnRow::from_row(&row)
            .unwrap()
            .to_column_descriptor()
            .unwrap();
        assert_eq!((col.precision, col.scale), (Some(10), Some(2)));
        assert_eq!(col.character_set_id, None);
        assert_eq!(col.limit, None);
    }

    // ── Grouping ────────────────────────────────────────────────────────

    #[test]
    fn test_group_indexes() {
        let rows = vec![
            Row::from_pairs([
                ("INDEX_NAME", Value::from("ORDERS_A_B")),
                ("COLUMN_NAME", Value::from("A")),
                ("TABLE_NAME", Value::from("ORDERS")),
            ]),
            Row::from_pairs([
                ("INDEX_NAME", Value::from("ORDERS_A_B")),
                ("COLUMN_NAME", Value::from("B")),
                ("TABLE_NAME", Value::from("ORDERS")),
            ]),
            Row::from_pairs([
                ("INDEX_NAME", Value::from("ORDERS_C")),
                ("COLUMN_NAME", Value::from("C")),
                ("TABLE_NAME", Value::from("ORDERS")),
            ]),
        ];
        let indexes = CatalogIndex::group(&rows).unwrap();
        assert_eq!(indexes.len(), 2);
        assert_eq!(indexes[0].columns, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(indexes[1].name, "ORDERS_C");
    }

    #[test]
    fn test_group_foreign_keys() {
        let fk = |name: &str, col: &str, ref_col: &str| {
            Row::from_pairs([
                ("FK_NAME", Value::from(name)),
                ("FKTABLE_NAME", Value::from("ORDERS")),
                ("FKCOLUMN_NAME", Value::from(col)),
                ("PKTABLE_NAME", Value::from("USERS")),
                ("PKCOLUMN_NAME", Value::from(ref_col)),
            ])
        };
        let rows = vec![fk("FK1", "A", "X"), fk("FK1", "B", "Y"), fk("FK2", "C", "ID")];
        let keys = CatalogForeignKey::group(&rows).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].columns, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(keys[0].referenced_columns, vec!["X".to_string(), "Y".to_string()]);
        assert_eq!(keys[1].referenced_table, "USERS");
    }
}
