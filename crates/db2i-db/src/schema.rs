//! Dialect-neutral schema descriptors.
//!
//! These are the value objects the migration orchestrator hands to a schema
//! editor. They are owned by the caller for the duration of one operation and
//! are never persisted by the adapter.

use db2i_core::{AdapterError, AdapterResult};

use crate::fields::{ColumnType, DefaultValue, Limit, ReferentialAction};

/// How the implicit identity column of a new table is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum IdColumn {
    /// Inject an identity column named `id` and make it the primary key.
    #[default]
    Default,
    /// Inject an identity column with this name and make it the primary key.
    Named(String),
    /// Inject nothing; use [`TableOptions::primary_key`] as given.
    None,
}

/// Table-level options for `CREATE TABLE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TableOptions {
    /// Implicit identity column strategy.
    pub id: IdColumn,
    /// Primary key columns. Overridden by an injected id column.
    pub primary_key: Vec<String>,
    /// Table comment.
    pub comment: Option<String>,
}

/// A table and everything pending creation on it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TableDescriptor {
    /// The table name.
    pub name: String,
    /// Schema override; the editor's schema is used when `None`.
    pub schema: Option<String>,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDescriptor>,
    /// Indexes to create after the table.
    pub indexes: Vec<IndexDescriptor>,
    /// Foreign keys to add after the table.
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    /// Table options.
    pub options: TableOptions,
}

impl TableDescriptor {
    /// Creates an empty table descriptor with default options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            columns: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            options: TableOptions::default(),
        }
    }

    /// Appends a pending column.
    #[must_use]
    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends a pending index.
    #[must_use]
    pub fn index(mut self, index: IndexDescriptor) -> Self {
        self.indexes.push(index);
        self
    }

    /// Appends a pending foreign key.
    #[must_use]
    pub fn foreign_key(mut self, foreign_key: ForeignKeyDescriptor) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Replaces the table options.
    #[must_use]
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }
}

/// A column definition.
///
/// Columns are NOT NULL unless [`nullable`](Self::nullable) is called.
///
/// # Examples
///
/// ```
/// use db2i_db::{ColumnDescriptor, ColumnType, Limit};
///
/// let email = ColumnDescriptor::new("email", ColumnType::String)
///     .limit(Limit::Length(120))
///     .comment("Login address");
/// assert!(!email.null);
/// assert_eq!(email.limit, Some(Limit::Length(120)));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColumnDescriptor {
    /// The column name.
    pub name: String,
    /// The abstract column type.
    pub column_type: ColumnType,
    /// Length or integer width.
    pub limit: Option<Limit>,
    /// Decimal precision.
    pub precision: Option<u32>,
    /// Decimal scale.
    pub scale: Option<u32>,
    /// Whether NULL is allowed.
    pub null: bool,
    /// Column default.
    pub default: Option<DefaultValue>,
    /// Database-generated identity on insert.
    pub identity: bool,
    /// Database-maintained row change timestamp.
    pub auto_update_timestamp: bool,
    /// Column comment.
    pub comment: Option<String>,
    /// Insert the new column before this existing column (ALTER only).
    pub position_hint: Option<String>,
    /// Coded character set id.
    pub character_set_id: Option<u32>,
}

impl ColumnDescriptor {
    /// Creates a NOT NULL column with no default.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            limit: None,
            precision: None,
            scale: None,
            null: false,
            default: None,
            identity: false,
            auto_update_timestamp: false,
            comment: None,
            position_hint: None,
            character_set_id: None,
        }
    }

    /// Sets the limit.
    #[must_use]
    pub const fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets decimal precision and scale.
    #[must_use]
    pub const fn precision_scale(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Allows NULL values.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.null = true;
        self
    }

    /// Sets the default.
    #[must_use]
    pub fn default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the column as an identity column.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Marks the column as a row change timestamp.
    #[must_use]
    pub const fn auto_update_timestamp(mut self) -> Self {
        self.auto_update_timestamp = true;
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Places the column before an existing one when added with ALTER.
    #[must_use]
    pub fn before(mut self, column: impl Into<String>) -> Self {
        self.position_hint = Some(column.into());
        self
    }

    /// Sets the coded character set id.
    #[must_use]
    pub const fn character_set_id(mut self, ccsid: u32) -> Self {
        self.character_set_id = Some(ccsid);
        self
    }

    /// Rejects a NOT NULL column that explicitly asks for a NULL default.
    pub fn validate(&self) -> AdapterResult<()> {
        if !self.null && self.default.as_ref().is_some_and(DefaultValue::is_null) {
            return Err(AdapterError::InvalidOperation(format!(
                "Column '{}' is defined as NOT NULL. Cannot set the default value to NULL.",
                self.name
            )));
        }
        if let Some(DefaultValue::Float(v)) = &self.default {
            if !v.is_finite() {
                return Err(AdapterError::InvalidOperation(format!(
                    "Column '{}' has a non-finite default ({v}).",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// An index definition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IndexDescriptor {
    /// Explicit name; derived from table and columns when `None`.
    pub name: Option<String>,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
    /// Whether this is a unique index.
    pub unique: bool,
}

impl IndexDescriptor {
    /// Creates a non-unique, unnamed index over `columns`.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            columns: columns.into_iter().map(Into::into).collect(),
            unique: false,
        }
    }

    /// Sets an explicit name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Makes the index unique.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// A foreign key definition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ForeignKeyDescriptor {
    /// Explicit constraint name; derived from table and columns when `None`.
    pub constraint: Option<String>,
    /// Local (referencing) columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced columns.
    pub referenced_columns: Vec<String>,
    /// ON DELETE action.
    pub on_delete: Option<ReferentialAction>,
    /// ON UPDATE action.
    pub on_update: Option<ReferentialAction>,
}

impl ForeignKeyDescriptor {
    /// Creates a foreign key from `columns` to `referenced_table (id)`.
    pub fn new<I, S>(columns: I, referenced_table: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            constraint: None,
            columns: columns.into_iter().map(Into::into).collect(),
            referenced_table: referenced_table.into(),
            referenced_columns: vec!["id".to_string()],
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the referenced columns.
    #[must_use]
    pub fn references<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referenced_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets an explicit constraint name.
    #[must_use]
    pub fn constraint(mut self, name: impl Into<String>) -> Self {
        self.constraint = Some(name.into());
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub const fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub const fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = Some(action);
        self
    }
}
