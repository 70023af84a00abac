//! Column definition synthesis.
//!
//! A column definition is assembled as an ordered list of [`ColumnClause`]s
//! and rendered to text once. `CREATE TABLE`, `ADD COLUMN` and
//! `ALTER COLUMN` all start from the same list and differ only in which
//! clauses they keep.

use std::fmt;
use std::fmt::Write as _;

use db2i_core::{AdapterError, AdapterResult};
use db2i_db::{ColumnDescriptor, DefaultValue, Value};
use db2i_db_backends::db2i::identifiers::quote_identifier;
use db2i_db_backends::{to_dialect_type, Connection, DialectType};

/// How a generated column produces its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// An identity column.
    Identity,
    /// A row change timestamp.
    RowChangeTimestamp,
}

impl Generation {
    /// The generation clause.
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Identity => "GENERATED ALWAYS AS IDENTITY (NO CACHE CYCLE)",
            Self::RowChangeTimestamp => {
                "GENERATED ALWAYS FOR EACH ROW ON UPDATE AS ROW CHANGE TIMESTAMP"
            }
        }
    }
}

/// One clause of a column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnClause {
    /// The data type with its size, e.g. `VARCHAR(255)`.
    DataType(String),
    /// `CCSID n`
    CharacterSet(u32),
    /// `NOT NULL`
    NotNull,
    /// `DEFAULT v`, holding the rendered value.
    Default(String),
    /// A `GENERATED ...` clause.
    Generated(Generation),
    /// `BEFORE col`
    Before(String),
}

impl fmt::Display for ColumnClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataType(t) => f.write_str(t),
            Self::CharacterSet(id) => write!(f, "CCSID {id}"),
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Default(v) => write!(f, "DEFAULT {v}"),
            Self::Generated(g) => f.write_str(g.as_sql()),
            Self::Before(col) => write!(f, "BEFORE {}", quote_identifier(col)),
        }
    }
}

/// An ordered column clause list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClauses(Vec<ColumnClause>);

impl ColumnClauses {
    /// The clauses, in order.
    pub fn clauses(&self) -> &[ColumnClause] {
        &self.0
    }

    /// Renders the clauses separated by single spaces.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Drops the position hint; `CREATE TABLE` cannot place columns.
    #[must_use]
    pub fn without_position(&self) -> Self {
        self.retain(|c| !matches!(c, ColumnClause::Before(_)))
    }

    /// Keeps only what `ALTER COLUMN ... SET DATA TYPE` accepts.
    ///
    /// Nullability and default are re-issued as separate fragments.
    #[must_use]
    pub fn data_type_only(&self) -> Self {
        self.retain(|c| {
            !matches!(
                c,
                ColumnClause::NotNull | ColumnClause::Default(_) | ColumnClause::Before(_)
            )
        })
    }

    fn retain(&self, keep: impl Fn(&ColumnClause) -> bool) -> Self {
        Self(self.0.iter().filter(|c| keep(c)).cloned().collect())
    }

    /// Replaces the trailing default, or failing that the trailing
    /// `NOT NULL`, with a generation clause.
    fn generate(&mut self, generation: Generation) {
        if matches!(
            self.0.last(),
            Some(ColumnClause::Default(_) | ColumnClause::NotNull)
        ) {
            self.0.pop();
        }
        self.0.push(ColumnClause::Generated(generation));
    }
}

impl fmt::Display for ColumnClauses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Renders a default value, or `None` when no `DEFAULT` clause applies.
///
/// Strings are quoted through the connection, except `CURRENT_TIMESTAMP`.
/// Booleans render as `0`/`1`.
pub fn default_sql<C: Connection>(conn: &C, value: &DefaultValue) -> Option<String> {
    match value {
        DefaultValue::Null => None,
        DefaultValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        DefaultValue::Int(i) => Some(i.to_string()),
        DefaultValue::Float(v) => Some(v.to_string()),
        DefaultValue::String(s) if s == DefaultValue::CURRENT_TIMESTAMP => Some(s.clone()),
        DefaultValue::String(s) => Some(conn.quote_literal(s)),
        DefaultValue::Literal(s) => Some(s.clone()),
    }
}

/// Renders a row value as an inline SQL literal.
///
/// NULL is written as `NULL` rather than bound, since the driver binds NULL
/// as `0` for integer columns. Strings are quoted through the connection and
/// bytes become a binary hex constant.
pub fn literal_sql<C: Connection>(conn: &C, value: &Value) -> AdapterResult<String> {
    let sql = match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(v) if v.is_finite() => v.to_string(),
        Value::Float(v) => {
            return Err(AdapterError::InvalidOperation(format!(
                "Cannot insert the non-finite number {v}."
            )))
        }
        Value::String(s) => conn.quote_literal(s),
        Value::Bytes(bytes) => {
            let mut hex = String::with_capacity(bytes.len() * 2 + 3);
            hex.push_str("BX'");
            for b in bytes {
                let _ = write!(hex, "{b:02X}");
            }
            hex.push('\'');
            hex
        }
    };
    Ok(sql)
}

fn data_type_sql(dialect: &DialectType, column: &ColumnDescriptor) -> String {
    let name = dialect.sql_name();
    if dialect.is_integer_family() {
        return name;
    }
    if dialect.is_decimal() {
        let precision = column.precision.filter(|p| *p != 0);
        let scale = column.scale.filter(|s| *s != 0);
        if precision.is_none() && scale.is_none() {
            return name;
        }
        return format!(
            "{name}({}, {})",
            precision.or(dialect.precision).unwrap_or_default(),
            scale.or(dialect.scale).unwrap_or_default()
        );
    }
    if dialect.accepts_length() {
        let length = column
            .limit
            .and_then(db2i_db::Limit::length)
            .or_else(|| dialect.limit.and_then(db2i_db::Limit::length));
        if let Some(length) = length {
            return format!("{name}({length})");
        }
    }
    name
}

/// Builds the clause list for `column`.
///
/// `row_change_timestamp_allowed` says whether the table can take another
/// row change timestamp; when it cannot, an auto-update timestamp column
/// keeps its plain default instead.
///
/// # Errors
///
/// Returns [`AdapterError::UnsupportedType`](db2i_core::AdapterError::UnsupportedType)
/// for column types the dialect cannot express.
pub fn synthesize<C: Connection>(
    conn: &C,
    column: &ColumnDescriptor,
    row_change_timestamp_allowed: bool,
) -> AdapterResult<ColumnClauses> {
    let dialect = to_dialect_type(column.column_type, column.limit)?;
    let mut clauses = ColumnClauses(vec![ColumnClause::DataType(data_type_sql(&dialect, column))]);

    if let Some(ccsid) = column.character_set_id {
        clauses.0.push(ColumnClause::CharacterSet(ccsid));
    }
    if !column.null {
        clauses.0.push(ColumnClause::NotNull);
    }
    if let Some(value) = column.default.as_ref().and_then(|d| default_sql(conn, d)) {
        clauses.0.push(ColumnClause::Default(value));
    }

    if column.identity {
        clauses.generate(Generation::Identity);
    } else if column.auto_update_timestamp && row_change_timestamp_allowed {
        clauses.generate(Generation::RowChangeTimestamp);
    }

    if let Some(before) = &column.position_hint {
        clauses.0.push(ColumnClause::Before(before.clone()));
    }
    Ok(clauses)
}
