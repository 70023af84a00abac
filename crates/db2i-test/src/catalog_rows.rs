//! Builders for catalog rows.
//!
//! Numeric cells are produced as strings, the way the DB2 for i drivers
//! usually return them, so tests exercise the lenient decoding path.

use db2i_db::{Row, Value};

/// A `SYSCOLUMNS` row under construction.
///
/// # Example
///
/// ```rust
/// use db2i_test::CatalogColumn;
///
/// let row = CatalogColumn::new("EMAIL", "VARCHAR").length(120).nullable().into_row();
/// assert_eq!(row.get::<String>("IS_NULLABLE").unwrap(), "Y");
/// ```
#[derive(Debug, Clone)]
pub struct CatalogColumn {
    name: String,
    data_type: String,
    nullable: bool,
    identity: bool,
    generation: Option<String>,
    default: Option<String>,
    length: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
    ccsid: Option<u32>,
    comment: Option<String>,
}

impl CatalogColumn {
    /// Starts a NOT NULL column with no default.
    pub fn new(name: &str, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            nullable: false,
            identity: false,
            generation: None,
            default: None,
            length: None,
            precision: None,
            scale: None,
            ccsid: None,
            comment: None,
        }
    }

    /// Sets `IS_NULLABLE` to `Y`.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as an identity generated always.
    #[must_use]
    pub fn identity(mut self) -> Self {
        self.identity = true;
        self.generation = Some("ALWAYS".into());
        self
    }

    /// Sets `IDENTITY_GENERATION` to `ALWAYS` without the identity flag, as
    /// the catalog reports a row change timestamp.
    #[must_use]
    pub fn generated_always(mut self) -> Self {
        self.generation = Some("ALWAYS".into());
        self
    }

    /// Sets the raw `COLUMN_DEFAULT` literal text.
    #[must_use]
    pub fn default(mut self, literal: &str) -> Self {
        self.default = Some(literal.to_string());
        self
    }

    /// Sets `LENGTH`.
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets `NUMERIC_PRECISION` and `NUMERIC_SCALE`.
    #[must_use]
    pub const fn precision_scale(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Sets `CCSID`.
    #[must_use]
    pub const fn ccsid(mut self, ccsid: u32) -> Self {
        self.ccsid = Some(ccsid);
        self
    }

    /// Sets `COLUMN_TEXT`.
    #[must_use]
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// Builds the row.
    pub fn into_row(self) -> Row {
        let number = |n: Option<u32>| n.map_or(Value::Null, |n| Value::String(n.to_string()));
        Row::from_pairs([
            ("COLUMN_NAME", Value::from(self.name)),
            ("DATA_TYPE", Value::from(self.data_type)),
            ("IS_NULLABLE", Value::from(if self.nullable { "Y" } else { "N" })),
            ("IS_IDENTITY", Value::from(if self.identity { "YES" } else { "NO" })),
            ("IDENTITY_GENERATION", Value::from(self.generation)),
            ("COLUMN_DEFAULT", Value::from(self.default)),
            ("LENGTH", number(self.length)),
            ("NUMERIC_PRECISION", number(self.precision)),
            ("NUMERIC_SCALE", number(self.scale)),
            ("CCSID", number(self.ccsid)),
            ("COLUMN_TEXT", Value::from(self.comment)),
        ])
    }
}

/// A `SYSTABLES` row.
pub fn table_row(name: &str) -> Row {
    Row::from_pairs([("TABLE_NAME", Value::from(name))])
}

/// A `SYSSCHEMAS` row.
pub fn schema_row(name: &str) -> Row {
    Row::from_pairs([("SCHEMA_NAME", Value::from(name))])
}

/// One key column of an index, as returned by the `SYSKEYS` join.
pub fn index_row(index: &str, column: &str, table: &str) -> Row {
    Row::from_pairs([
        ("INDEX_NAME", Value::from(index)),
        ("COLUMN_NAME", Value::from(column)),
        ("TABLE_NAME", Value::from(table)),
    ])
}

/// One column pair of a foreign key, as returned by `SQLFOREIGNKEYS`.
pub fn foreign_key_row(
    name: &str,
    table: &str,
    column: &str,
    referenced_table: &str,
    referenced_column: &str,
) -> Row {
    Row::from_pairs([
        ("FK_NAME", Value::from(name)),
        ("FKTABLE_NAME", Value::from(table)),
        ("FKCOLUMN_NAME", Value::from(column)),
        ("PKTABLE_NAME", Value::from(referenced_table)),
        ("PKCOLUMN_NAME", Value::from(referenced_column)),
    ])
}

/// A `SYSKEYCST` constraint name row.
pub fn constraint_row(name: &str) -> Row {
    Row::from_pairs([("CONSTRAINT_NAME", Value::from(name))])
}
