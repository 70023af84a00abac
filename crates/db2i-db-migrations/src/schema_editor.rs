//! Schema editor for DB2 for i.
//!
//! The [`SchemaEditor`] trait is the operation surface a migration
//! orchestrator drives. [`Db2SchemaEditor`] implements it by rendering DDL
//! and issuing it, one statement at a time, through a [`Connection`].
//!
//! Nothing here opens a transaction. A multi-statement operation that fails
//! part way leaves the statements already issued in place.

use db2i_core::logging::{command_span, SQL_TARGET};
use db2i_core::{AdapterError, AdapterResult, AdapterSettings};
use db2i_db::{
    ColumnDescriptor, ColumnType, ForeignKeyDescriptor, IdColumn, IndexDescriptor, Limit, Row,
    TableDescriptor,
};
use db2i_db_backends::db2i::identifiers::{column_list, qualified, quote_identifier, same_identifier};
use db2i_db_backends::db2i::naming::{self, resolve_name};
use db2i_db_backends::{
    AbstractType, CatalogColumnRow, Connection, DialectType, SchemaIntrospector,
};

use crate::column_sql::{default_sql, literal_sql, synthesize, ColumnClauses};
use crate::command_log::CommandLogEntry;
use crate::rename::RenameColumn;

/// Schema operations a migration orchestrator can request.
///
/// Query methods take `&self`; operations that issue DDL take `&mut self`
/// because they append to the editor's command log.
pub trait SchemaEditor {
    /// Returns `true` if the table exists.
    fn has_table(&self, table: &str) -> AdapterResult<bool>;

    /// Creates a table with its columns, foreign keys, indexes, primary key,
    /// and comments.
    fn create_table(&mut self, table: &TableDescriptor) -> AdapterResult<()>;

    /// Renames a table.
    fn rename_table(&mut self, table: &str, new_name: &str) -> AdapterResult<()>;

    /// Drops a table.
    fn drop_table(&mut self, table: &str) -> AdapterResult<()>;

    /// Returns the table's columns as descriptors.
    fn get_columns(&self, table: &str) -> AdapterResult<Vec<ColumnDescriptor>>;

    /// Returns `true` if the table has the column (case-insensitive).
    fn has_column(&self, table: &str, column: &str) -> AdapterResult<bool>;

    /// Adds a column, honouring its position hint.
    fn add_column(&mut self, table: &str, column: &ColumnDescriptor) -> AdapterResult<()>;

    /// Renames a column by copying it under the new name and dropping the old
    /// one.
    fn rename_column(&mut self, table: &str, column: &str, new_name: &str) -> AdapterResult<()>;

    /// Changes a column's type, default, nullability, and comment.
    fn change_column(
        &mut self,
        table: &str,
        column: &str,
        new_column: &ColumnDescriptor,
    ) -> AdapterResult<()>;

    /// Drops a column.
    fn drop_column(&mut self, table: &str, column: &str) -> AdapterResult<()>;

    /// Returns `true` if an index covers exactly `columns`, in any order.
    fn has_index(&self, table: &str, columns: &[String]) -> AdapterResult<bool>;

    /// Returns `true` if the table has an index with this name.
    fn has_index_by_name(&self, table: &str, name: &str) -> AdapterResult<bool>;

    /// Creates an index.
    fn add_index(&mut self, table: &str, index: &IndexDescriptor) -> AdapterResult<()>;

    /// Drops the index covering exactly `columns`, if there is one.
    fn drop_index(&mut self, table: &str, columns: &[String]) -> AdapterResult<()>;

    /// Drops the named index, if it exists.
    fn drop_index_by_name(&mut self, table: &str, name: &str) -> AdapterResult<()>;

    /// Returns `true` if a foreign key matches by name, or by column set when
    /// no name is given.
    fn has_foreign_key(
        &self,
        table: &str,
        columns: &[String],
        constraint: Option<&str>,
    ) -> AdapterResult<bool>;

    /// Adds a foreign key constraint.
    fn add_foreign_key(&mut self, table: &str, foreign_key: &ForeignKeyDescriptor)
        -> AdapterResult<()>;

    /// Drops a foreign key by name, or every foreign key touching `columns`.
    fn drop_foreign_key(
        &mut self,
        table: &str,
        columns: &[String],
        constraint: Option<&str>,
    ) -> AdapterResult<()>;

    /// Creates a schema (library).
    fn create_database(&mut self, name: &str) -> AdapterResult<()>;

    /// Returns `true` if the schema exists.
    fn has_database(&self, name: &str) -> AdapterResult<bool>;

    /// Drops a schema.
    fn drop_database(&mut self, name: &str) -> AdapterResult<()>;

    /// Inserts one row, with every value rendered inline.
    fn insert(&mut self, table: &str, row: &Row) -> AdapterResult<()>;
}

/// Schema editor for DB2 for i.
///
/// All DDL is issued against one schema (library), upper-cased.
///
/// # Examples
///
/// ```
/// use db2i_db::{ColumnDescriptor, ColumnType};
/// use db2i_db_migrations::{Db2SchemaEditor, SchemaEditor};
/// use db2i_test::FakeConnection;
///
/// let conn = FakeConnection::new();
/// let mut editor = Db2SchemaEditor::new(&conn, "appdata");
/// editor
///     .add_column("users", &ColumnDescriptor::new("nick", ColumnType::String).nullable())
///     .unwrap();
/// assert_eq!(
///     conn.executed(),
///     vec!["ALTER TABLE APPDATA.USERS ADD COLUMN NICK VARCHAR(255)".to_string()]
/// );
/// ```
#[derive(Debug)]
pub struct Db2SchemaEditor<C: Connection> {
    conn: C,
    schema: String,
    commands: Vec<CommandLogEntry>,
}

impl<C: Connection> Db2SchemaEditor<C> {
    /// Creates an editor for `schema` over `conn`.
    pub fn new(conn: C, schema: &str) -> Self {
        Self {
            conn,
            schema: quote_identifier(schema),
            commands: Vec::new(),
        }
    }

    /// Creates an editor for the schema named in validated settings.
    pub fn from_settings(conn: C, settings: &AdapterSettings) -> AdapterResult<Self> {
        settings.validate()?;
        Ok(Self::new(conn, &settings.schema_name()))
    }

    /// The managed schema, upper-cased.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// The underlying connection.
    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// An introspector over the managed schema.
    pub fn introspector(&self) -> SchemaIntrospector<'_, C> {
        SchemaIntrospector::new(&self.conn, &self.schema)
    }

    /// The commands run so far, oldest first.
    pub fn commands(&self) -> &[CommandLogEntry] {
        &self.commands
    }

    /// Forgets the recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    fn record<I, S>(&mut self, command: &str, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = CommandLogEntry::new(command, args);
        tracing::debug!(command = %entry, "schema command");
        self.commands.push(entry);
    }

    fn record_index(&mut self, table: &str, index: &IndexDescriptor) {
        self.record("addIndex", [table.to_string(), index.columns.join(",")]);
    }

    fn record_foreign_key(&mut self, table: &str, foreign_key: &ForeignKeyDescriptor) {
        self.record(
            "addForeignKey",
            [
                table.to_string(),
                foreign_key.columns.join(","),
                foreign_key.referenced_table.clone(),
            ],
        );
    }

    /// Logs and executes one statement.
    ///
    /// Failures from the connection propagate unchanged.
    pub fn execute_sql(&self, sql: &str) -> AdapterResult<u64> {
        tracing::info!(target: SQL_TARGET, sql, "executing");
        self.conn.execute(sql)
    }

    /// Maps an abstract column type to the dialect type.
    pub fn to_dialect_type(
        &self,
        column_type: ColumnType,
        limit: Option<Limit>,
    ) -> AdapterResult<DialectType> {
        db2i_db_backends::to_dialect_type(column_type, limit)
    }

    /// Maps a catalog data type to the abstract type.
    pub fn to_abstract_type(&self, sql_type: &str) -> AdapterResult<AbstractType> {
        db2i_db_backends::to_abstract_type(sql_type)
    }

    /// Returns the table's catalog row, if the table exists.
    pub fn describe_table(&self, table: &str) -> AdapterResult<Option<Row>> {
        self.introspector().describe_table(table)
    }

    /// Returns the table's decoded column catalog rows.
    pub fn describe_columns(&self, table: &str) -> AdapterResult<Vec<CatalogColumnRow>> {
        self.introspector().describe_columns(table)
    }

    fn table_name(&self, table: &str) -> String {
        qualified(&self.schema, table)
    }

    // ── Statement rendering ─────────────────────────────────────────────

    /// Builds the clause list for a column on an existing table, enforcing
    /// one identity and one row change timestamp per table.
    ///
    /// `replacing` names the column being redefined, which does not count
    /// against either limit.
    fn column_clauses(
        &self,
        table: &str,
        column: &ColumnDescriptor,
        replacing: Option<&str>,
    ) -> AdapterResult<ColumnClauses> {
        let mut row_change_timestamp_allowed = true;
        if column.identity || column.auto_update_timestamp {
            let existing: Vec<CatalogColumnRow> = self
                .describe_columns(table)?
                .into_iter()
                .filter(|c| !replacing.is_some_and(|r| same_identifier(&c.name, r)))
                .collect();
            if column.identity {
                if let Some(other) = existing.iter().find(|c| c.identity) {
                    return Err(AdapterError::InvalidOperation(format!(
                        "Table '{table}' already has the identity column '{}'.",
                        other.name
                    )));
                }
            } else if existing.iter().any(CatalogColumnRow::is_row_change_timestamp) {
                tracing::warn!(
                    table,
                    column = %column.name,
                    "table already has a row change timestamp; keeping the plain default"
                );
                row_change_timestamp_allowed = false;
            }
        }
        synthesize(&self.conn, column, row_change_timestamp_allowed)
    }

    fn column_comment_sql(&self, schema: &str, table: &str, column: &str, comment: &str) -> String {
        format!(
            "LABEL ON COLUMN {} ({} TEXT IS {})",
            qualified(schema, table),
            quote_identifier(column),
            self.conn.quote_literal(comment)
        )
    }

    fn index_sql(&self, schema: &str, table: &str, index: &IndexDescriptor) -> String {
        let name = resolve_name(index.name.as_deref(), table, &index.columns);
        format!(
            "CREATE {}INDEX {} ON {} ({})",
            if index.unique { "UNIQUE " } else { "" },
            qualified(schema, &name),
            qualified(schema, table),
            column_list(&index.columns)
        )
    }

    fn foreign_key_sql(
        &self,
        schema: &str,
        table: &str,
        foreign_key: &ForeignKeyDescriptor,
    ) -> String {
        let name = resolve_name(foreign_key.constraint.as_deref(), table, &foreign_key.columns);
        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {name} FOREIGN KEY ({}) REFERENCES {} ({})",
            qualified(schema, table),
            column_list(&foreign_key.columns),
            qualified(schema, &foreign_key.referenced_table),
            column_list(&foreign_key.referenced_columns)
        );
        if let Some(action) = foreign_key.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = foreign_key.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        sql
    }

    fn drop_constraint(&self, table: &str, constraint: &str) -> AdapterResult<()> {
        self.execute_sql(&format!(
            "ALTER TABLE {} DROP FOREIGN KEY {}",
            self.table_name(table),
            qualified(&self.schema, constraint)
        ))?;
        Ok(())
    }

    /// Resolves the columns of a new table: the injected id column, the
    /// primary key, and at most one row change timestamp.
    fn table_columns(table: &TableDescriptor) -> AdapterResult<(Vec<ColumnDescriptor>, Vec<String>)> {
        let mut columns = table.columns.clone();
        let id = match &table.options.id {
            IdColumn::Default => Some("id".to_string()),
            IdColumn::Named(name) => Some(name.clone()),
            IdColumn::None => None,
        };
        let primary_key = match id {
            Some(id) => {
                if !columns.iter().any(|c| same_identifier(&c.name, &id)) {
                    columns.insert(0, ColumnDescriptor::new(id.clone(), ColumnType::Integer).identity());
                }
                vec![id]
            }
            None => table.options.primary_key.clone(),
        };

        for column in &columns {
            column.validate()?;
        }
        let identities: Vec<&str> = columns
            .iter()
            .filter(|c| c.identity)
            .map(|c| c.name.as_str())
            .collect();
        if identities.len() > 1 {
            return Err(AdapterError::InvalidOperation(format!(
                "Table '{}' can have only one identity column, found: {}.",
                table.name,
                identities.join(", ")
            )));
        }

        let mut timestamp_seen = false;
        for column in columns.iter_mut().filter(|c| c.auto_update_timestamp && !c.identity) {
            if timestamp_seen {
                tracing::warn!(
                    table = %table.name,
                    column = %column.name,
                    "only one row change timestamp per table; keeping the plain default"
                );
                column.auto_update_timestamp = false;
            }
            timestamp_seen = true;
        }
        Ok((columns, primary_key))
    }
}

impl<C: Connection> SchemaEditor for Db2SchemaEditor<C> {
    fn has_table(&self, table: &str) -> AdapterResult<bool> {
        self.introspector().has_table(table)
    }

    fn create_table(&mut self, table: &TableDescriptor) -> AdapterResult<()> {
        let _span = command_span("createTable").entered();
        self.record("createTable", [table.name.as_str()]);

        let schema = table
            .schema
            .as_deref()
            .map_or_else(|| self.schema.clone(), quote_identifier);
        let (columns, primary_key) = Self::table_columns(table)?;

        let definitions = columns
            .iter()
            .map(|column| {
                synthesize(&self.conn, column, true).map(|clauses| {
                    format!(
                        "{} {}",
                        quote_identifier(&column.name),
                        clauses.without_position()
                    )
                })
            })
            .collect::<AdapterResult<Vec<_>>>()?;

        let mut statements = vec![format!(
            "CREATE TABLE {} ({})",
            qualified(&schema, &table.name),
            definitions.join(", ")
        )];
        for foreign_key in &table.foreign_keys {
            statements.push(self.foreign_key_sql(&schema, &table.name, foreign_key));
        }
        for index in &table.indexes {
            statements.push(self.index_sql(&schema, &table.name, index));
        }
        for foreign_key in &table.foreign_keys {
            self.record_foreign_key(&table.name, foreign_key);
        }
        for index in &table.indexes {
            self.record_index(&table.name, index);
        }
        if !primary_key.is_empty() {
            statements.push(format!(
                "ALTER TABLE {} ADD PRIMARY KEY ({})",
                qualified(&schema, &table.name),
                column_list(&primary_key)
            ));
        }
        if let Some(comment) = &table.options.comment {
            statements.push(format!(
                "LABEL ON TABLE {} IS {}",
                qualified(&schema, &table.name),
                self.conn.quote_literal(comment)
            ));
        }
        for column in &columns {
            if let Some(comment) = &column.comment {
                statements.push(self.column_comment_sql(&schema, &table.name, &column.name, comment));
            }
        }

        for sql in &statements {
            self.execute_sql(sql)?;
        }
        Ok(())
    }

    fn rename_table(&mut self, table: &str, new_name: &str) -> AdapterResult<()> {
        let _span = command_span("renameTable").entered();
        self.record("renameTable", [table, new_name]);
        self.execute_sql(&format!(
            "RENAME TABLE {} TO {}",
            self.table_name(table),
            quote_identifier(new_name)
        ))?;
        Ok(())
    }

    fn drop_table(&mut self, table: &str) -> AdapterResult<()> {
        let _span = command_span("dropTable").entered();
        self.record("dropTable", [table]);
        self.execute_sql(&format!("DROP TABLE {}", self.table_name(table)))?;
        Ok(())
    }

    fn get_columns(&self, table: &str) -> AdapterResult<Vec<ColumnDescriptor>> {
        self.introspector().get_columns(table)
    }

    fn has_column(&self, table: &str, column: &str) -> AdapterResult<bool> {
        self.introspector().has_column(table, column)
    }

    fn add_column(&mut self, table: &str, column: &ColumnDescriptor) -> AdapterResult<()> {
        let _span = command_span("addColumn").entered();
        self.record(
            "addColumn",
            [table, column.name.as_str(), column.column_type.as_str()],
        );
        column.validate()?;
        let definition = self.column_clauses(table, column, None)?;
        self.execute_sql(&format!(
            "ALTER TABLE {} ADD COLUMN {} {definition}",
            self.table_name(table),
            quote_identifier(&column.name)
        ))?;
        if let Some(comment) = &column.comment {
            let sql = self.column_comment_sql(&self.schema, table, &column.name, comment);
            self.execute_sql(&sql)?;
        }
        Ok(())
    }

    fn rename_column(&mut self, table: &str, column: &str, new_name: &str) -> AdapterResult<()> {
        let _span = command_span("renameColumn").entered();
        self.record("renameColumn", [table, column, new_name]);
        RenameColumn::new(table, column, new_name).run(self)
    }

    fn change_column(
        &mut self,
        table: &str,
        column: &str,
        new_column: &ColumnDescriptor,
    ) -> AdapterResult<()> {
        let _span = command_span("changeColumn").entered();
        self.record(
            "changeColumn",
            [table, column, new_column.column_type.as_str()],
        );

        new_column.validate()?;
        let default = new_column.default.as_ref().and_then(|d| default_sql(&self.conn, d));
        if !new_column.null && default.is_none() {
            return Err(AdapterError::InvalidOperation(format!(
                "Column '{}' is defined as NOT NULL. Cannot set the default value to NULL.",
                new_column.name
            )));
        }

        let data_type = self
            .column_clauses(table, new_column, Some(column))?
            .data_type_only();
        let sql = format!(
            "ALTER TABLE {} ALTER COLUMN {} SET DATA TYPE {data_type} {} {}",
            self.table_name(table),
            quote_identifier(column),
            default.map_or_else(|| "SET DEFAULT NULL".to_string(), |v| format!("SET DEFAULT {v}")),
            if new_column.null { "DROP NOT NULL" } else { "SET NOT NULL" }
        );
        self.execute_sql(&sql)?;

        if let Some(comment) = &new_column.comment {
            let sql = self.column_comment_sql(&self.schema, table, column, comment);
            self.execute_sql(&sql)?;
        }
        Ok(())
    }

    fn drop_column(&mut self, table: &str, column: &str) -> AdapterResult<()> {
        let _span = command_span("dropColumn").entered();
        self.record("dropColumn", [table, column]);
        self.execute_sql(&format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.table_name(table),
            quote_identifier(column)
        ))?;
        Ok(())
    }

    fn has_index(&self, table: &str, columns: &[String]) -> AdapterResult<bool> {
        self.introspector().has_index(table, columns)
    }

    fn has_index_by_name(&self, table: &str, name: &str) -> AdapterResult<bool> {
        self.introspector().has_index_by_name(table, name)
    }

    fn add_index(&mut self, table: &str, index: &IndexDescriptor) -> AdapterResult<()> {
        let _span = command_span("addIndex").entered();
        self.record_index(table, index);
        let sql = self.index_sql(&self.schema, table, index);
        self.execute_sql(&sql)?;
        Ok(())
    }

    fn drop_index(&mut self, table: &str, columns: &[String]) -> AdapterResult<()> {
        let _span = command_span("dropIndex").entered();
        self.record("dropIndex", [table.to_string(), columns.join(",")]);
        let indexes = self.introspector().get_indexes(table)?;
        match naming::find_index_by_columns(&indexes, columns) {
            Some(index) => {
                self.execute_sql(&format!("DROP INDEX {}", qualified(&self.schema, &index.name)))?;
            }
            None => tracing::debug!(table, ?columns, "no index over these columns"),
        }
        Ok(())
    }

    fn drop_index_by_name(&mut self, table: &str, name: &str) -> AdapterResult<()> {
        let _span = command_span("dropIndexByName").entered();
        self.record("dropIndexByName", [table, name]);
        // Dropping a column already drops its indexes, so a missing index is fine.
        if self.has_index_by_name(table, name)? {
            self.execute_sql(&format!("DROP INDEX {}", qualified(&self.schema, name)))?;
        } else {
            tracing::debug!(table, name, "index already gone");
        }
        Ok(())
    }

    fn has_foreign_key(
        &self,
        table: &str,
        columns: &[String],
        constraint: Option<&str>,
    ) -> AdapterResult<bool> {
        self.introspector().has_foreign_key(table, columns, constraint)
    }

    fn add_foreign_key(
        &mut self,
        table: &str,
        foreign_key: &ForeignKeyDescriptor,
    ) -> AdapterResult<()> {
        let _span = command_span("addForeignKey").entered();
        self.record_foreign_key(table, foreign_key);
        let sql = self.foreign_key_sql(&self.schema, table, foreign_key);
        self.execute_sql(&sql)?;
        Ok(())
    }

    fn drop_foreign_key(
        &mut self,
        table: &str,
        columns: &[String],
        constraint: Option<&str>,
    ) -> AdapterResult<()> {
        let _span = command_span("dropForeignKey").entered();
        self.record("dropForeignKey", [table.to_string(), columns.join(",")]);

        if let Some(name) = constraint {
            if !self.has_foreign_key(table, columns, Some(name))? {
                return Err(AdapterError::NotFound(format!(
                    "Foreign key '{name}' does not exist on table '{table}'."
                )));
            }
            return self.drop_constraint(table, name);
        }

        let mut names: Vec<String> = Vec::new();
        for column in columns {
            for name in self
                .introspector()
                .foreign_key_constraints_for_column(table, column)?
            {
                if !names.iter().any(|n| same_identifier(n, &name)) {
                    names.push(name);
                }
            }
        }
        if names.is_empty() {
            return Err(AdapterError::NotFound(format!(
                "No foreign key on table '{table}' uses the columns: {}.",
                columns.join(", ")
            )));
        }
        for name in &names {
            self.drop_constraint(table, name)?;
        }
        Ok(())
    }

    fn create_database(&mut self, name: &str) -> AdapterResult<()> {
        let _span = command_span("createDatabase").entered();
        self.record("createDatabase", [name]);
        self.execute_sql(&format!("CREATE SCHEMA {}", quote_identifier(name)))?;
        Ok(())
    }

    fn has_database(&self, name: &str) -> AdapterResult<bool> {
        self.introspector().has_database(name)
    }

    fn drop_database(&mut self, name: &str) -> AdapterResult<()> {
        let _span = command_span("dropDatabase").entered();
        self.record("dropDatabase", [name]);
        self.execute_sql(&format!("DROP SCHEMA {}", quote_identifier(name)))?;
        Ok(())
    }

    fn insert(&mut self, table: &str, row: &Row) -> AdapterResult<()> {
        let _span = command_span("insert").entered();
        self.record("insert", [table.to_string(), row.columns().join(",")]);
        if row.is_empty() {
            return Err(AdapterError::InvalidOperation(format!(
                "Cannot insert a row with no columns into '{table}'."
            )));
        }
        let values = row
            .values()
            .iter()
            .map(|value| literal_sql(&self.conn, value))
            .collect::<AdapterResult<Vec<_>>>()?;
        self.execute_sql(&format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table_name(table),
            column_list(row.columns()),
            values.join(", ")
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db2i_db::{DefaultValue, ReferentialAction, TableOptions, Value};
    use db2i_test::catalog_rows::{constraint_row, foreign_key_row, index_row};
    use db2i_test::{CatalogColumn, FakeConnection};

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn editor(conn: &FakeConnection) -> Db2SchemaEditor<&FakeConnection> {
        Db2SchemaEditor::new(conn, "appdata")
    }

    // ── Construction ────────────────────────────────────────────────────

    #[test]
    fn test_schema_is_upper_cased() {
        let conn = FakeConnection::new();
        assert_eq!(editor(&conn).schema(), "APPDATA");
    }

    #[test]
    fn test_from_settings_requires_name() {
        let conn = FakeConnection::new();
        let settings = AdapterSettings {
            database: "PROD".into(),
            ..AdapterSettings::default()
        };
        assert!(matches!(
            Db2SchemaEditor::from_settings(&conn, &settings),
            Err(AdapterError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_from_settings() {
        let conn = FakeConnection::new();
        let settings = AdapterSettings {
            name: "inventory".into(),
            database: "PROD".into(),
            ..AdapterSettings::default()
        };
        let editor = Db2SchemaEditor::from_settings(&conn, &settings).unwrap();
        assert_eq!(editor.schema(), "INVENTORY");
    }

    // ── Tables ──────────────────────────────────────────────────────────

    #[test]
    fn test_create_table_default_id() {
        let conn = FakeConnection::new();
        let table = TableDescriptor::new("tags")
            .column(ColumnDescriptor::new("label", ColumnType::String).limit(Limit::Length(40)));
        editor(&conn).create_table(&table).unwrap();
        assert_eq!(
            conn.executed(),
            vec![
                "CREATE TABLE APPDATA.TAGS (ID INTEGER GENERATED ALWAYS AS IDENTITY (NO CACHE CYCLE), \
                 LABEL VARCHAR(40) NOT NULL)"
                    .to_string(),
                "ALTER TABLE APPDATA.TAGS ADD PRIMARY KEY (ID)".to_string(),
            ]
        );
    }

    #[test]
    fn test_create_table_named_id() {
        let conn = FakeConnection::new();
        let table = TableDescriptor::new("tags").options(TableOptions {
            id: IdColumn::Named("tag_id".into()),
            ..TableOptions::default()
        });
        editor(&conn).create_table(&table).unwrap();
        let executed = conn.executed();
        assert!(executed[0].contains("TAG_ID INTEGER GENERATED ALWAYS AS IDENTITY"));
        assert_eq!(executed[1], "ALTER TABLE APPDATA.TAGS ADD PRIMARY KEY (TAG_ID)");
    }

    #[test]
    fn test_create_table_composite_key_without_id() {
        let conn = FakeConnection::new();
        let table = TableDescriptor::new("user_roles")
            .column(ColumnDescriptor::new("user_id", ColumnType::Integer))
            .column(ColumnDescriptor::new("role_id", ColumnType::Integer))
            .options(TableOptions {
                id: IdColumn::None,
                primary_key: cols(&["user_id", "role_id"]),
                comment: None,
            });
        editor(&conn).create_table(&table).unwrap();
        assert_eq!(
            conn.executed(),
            vec![
                "CREATE TABLE APPDATA.USER_ROLES (USER_ID INTEGER NOT NULL, ROLE_ID INTEGER NOT NULL)"
                    .to_string(),
                "ALTER TABLE APPDATA.USER_ROLES ADD PRIMARY KEY (USER_ID, ROLE_ID)".to_string(),
            ]
        );
    }

    #[test]
    fn test_create_table_statement_order() {
        let conn = FakeConnection::new();
        let table = TableDescriptor::new("orders")
            .column(
                ColumnDescriptor::new("user_id", ColumnType::Integer)
                    .comment("Buyer")
                    .before("ignored"),
            )
            .index(IndexDescriptor::new(["user_id"]))
            .foreign_key(
                ForeignKeyDescriptor::new(["user_id"], "users").on_delete(ReferentialAction::Cascade),
            )
            .options(TableOptions {
                comment: Some("Orders".into()),
                ..TableOptions::default()
            });
        editor(&conn).create_table(&table).unwrap();
        let executed = conn.executed();
        assert_eq!(executed.len(), 6);
        assert!(executed[0].starts_with("CREATE TABLE APPDATA.ORDERS"));
        assert!(!executed[0].contains("BEFORE"));
        assert_eq!(
            executed[1],
            "ALTER TABLE APPDATA.ORDERS ADD CONSTRAINT ORDERS_USER_ID FOREIGN KEY (USER_ID) \
             REFERENCES APPDATA.USERS (ID) ON DELETE CASCADE"
        );
        assert_eq!(
            executed[2],
            "CREATE INDEX APPDATA.ORDERS_USER_ID ON APPDATA.ORDERS (USER_ID)"
        );
        assert_eq!(executed[3], "ALTER TABLE APPDATA.ORDERS ADD PRIMARY KEY (ID)");
        assert_eq!(executed[4], "LABEL ON TABLE APPDATA.ORDERS IS 'Orders'");
        assert_eq!(
            executed[5],
            "LABEL ON COLUMN APPDATA.ORDERS (USER_ID TEXT IS 'Buyer')"
        );
    }

    #[test]
    fn test_create_table_schema_override() {
        let conn = FakeConnection::new();
        let mut table = TableDescriptor::new("t");
        table.schema = Some("other".into());
        editor(&conn).create_table(&table).unwrap();
        assert!(conn.executed()[0].starts_with("CREATE TABLE OTHER.T"));
    }

    #[test]
    fn test_create_table_rejects_two_identities() {
        let conn = FakeConnection::new();
        let table = TableDescriptor::new("t")
            .column(ColumnDescriptor::new("seq", ColumnType::BigInteger).identity());
        let err = editor(&conn).create_table(&table).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidOperation(_)));
        assert_eq!(conn.statement_count(), 0);
    }

    #[test]
    fn test_create_table_keeps_one_row_change_timestamp() {
        let conn = FakeConnection::new();
        let table = TableDescriptor::new("t")
            .column(
                ColumnDescriptor::new("updated_at", ColumnType::Timestamp)
                    .default(DefaultValue::CURRENT_TIMESTAMP)
                    .auto_update_timestamp(),
            )
            .column(
                ColumnDescriptor::new("synced_at", ColumnType::Timestamp)
                    .default(DefaultValue::CURRENT_TIMESTAMP)
                    .auto_update_timestamp(),
            );
        editor(&conn).create_table(&table).unwrap();
        let create = &conn.executed()[0];
        assert_eq!(create.matches("ROW CHANGE TIMESTAMP").count(), 1);
        assert!(create.contains("SYNCED_AT TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP"));
    }

    #[test]
    fn test_create_table_rejects_null_default_on_not_null() {
        let conn = FakeConnection::new();
        let table = TableDescriptor::new("t")
            .column(ColumnDescriptor::new("code", ColumnType::Char).default(DefaultValue::Null));
        assert!(editor(&conn).create_table(&table).is_err());
        assert_eq!(conn.statement_count(), 0);
    }

    #[test]
    fn test_rename_and_drop_table() {
        let conn = FakeConnection::new();
        let mut editor = editor(&conn);
        editor.rename_table("users", "people").unwrap();
        editor.drop_table("people").unwrap();
        assert_eq!(
            conn.executed(),
            vec![
                "RENAME TABLE APPDATA.USERS TO PEOPLE".to_string(),
                "DROP TABLE APPDATA.PEOPLE".to_string(),
            ]
        );
    }

    // ── Columns ─────────────────────────────────────────────────────────

    #[test]
    fn test_add_column_with_position_and_comment() {
        let conn = FakeConnection::new();
        let column = ColumnDescriptor::new("nick", ColumnType::String)
            .limit(Limit::Length(30))
            .nullable()
            .comment("Display name")
            .before("email");
        editor(&conn).add_column("users", &column).unwrap();
        assert_eq!(
            conn.executed(),
            vec![
                "ALTER TABLE APPDATA.USERS ADD COLUMN NICK VARCHAR(30) BEFORE EMAIL".to_string(),
                "LABEL ON COLUMN APPDATA.USERS (NICK TEXT IS 'Display name')".to_string(),
            ]
        );
    }

    #[test]
    fn test_add_second_identity_rejected() {
        let conn = FakeConnection::new();
        conn.on_query(
            "SYSCOLUMNS",
            vec![CatalogColumn::new("ID", "INTEGER").identity().into_row()],
        );
        let column = ColumnDescriptor::new("seq", ColumnType::Integer).identity();
        let err = editor(&conn).add_column("users", &column).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidOperation(_)));
        assert_eq!(conn.statement_count(), 0);
    }

    #[test]
    fn test_add_row_change_timestamp_when_free() {
        let conn = FakeConnection::new();
        conn.on_query(
            "SYSCOLUMNS",
            vec![CatalogColumn::new("ID", "INTEGER").identity().into_row()],
        );
        let column = ColumnDescriptor::new("updated_at", ColumnType::Timestamp)
            .default(DefaultValue::CURRENT_TIMESTAMP)
            .auto_update_timestamp();
        editor(&conn).add_column("users", &column).unwrap();
        assert_eq!(
            conn.executed()[0],
            "ALTER TABLE APPDATA.USERS ADD COLUMN UPDATED_AT TIMESTAMP NOT NULL \
             GENERATED ALWAYS FOR EACH ROW ON UPDATE AS ROW CHANGE TIMESTAMP"
        );
    }

    #[test]
    fn test_add_row_change_timestamp_when_taken_keeps_default() {
        let conn = FakeConnection::new();
        conn.on_query(
            "SYSCOLUMNS",
            vec![CatalogColumn::new("UPDATED_AT", "TIMESTMP")
                .generated_always()
                .into_row()],
        );
        let column = ColumnDescriptor::new("synced_at", ColumnType::Timestamp)
            .default(DefaultValue::CURRENT_TIMESTAMP)
            .auto_update_timestamp();
        editor(&conn).add_column("users", &column).unwrap();
        assert_eq!(
            conn.executed()[0],
            "ALTER TABLE APPDATA.USERS ADD COLUMN SYNCED_AT TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_change_column() {
        let conn = FakeConnection::new();
        let column = ColumnDescriptor::new("status", ColumnType::String)
            .limit(Limit::Length(20))
            .default("new")
            .comment("State");
        editor(&conn).change_column("orders", "status", &column).unwrap();
        assert_eq!(
            conn.executed(),
            vec![
                "ALTER TABLE APPDATA.ORDERS ALTER COLUMN STATUS SET DATA TYPE VARCHAR(20) \
                 SET DEFAULT 'new' SET NOT NULL"
                    .to_string(),
                "LABEL ON COLUMN APPDATA.ORDERS (STATUS TEXT IS 'State')".to_string(),
            ]
        );
    }

    #[test]
    fn test_change_column_nullable() {
        let conn = FakeConnection::new();
        let column = ColumnDescriptor::new("note", ColumnType::String).nullable();
        editor(&conn).change_column("orders", "note", &column).unwrap();
        assert_eq!(
            conn.executed()[0],
            "ALTER TABLE APPDATA.ORDERS ALTER COLUMN NOTE SET DATA TYPE VARCHAR(255) \
             SET DEFAULT NULL DROP NOT NULL"
        );
    }

    #[test]
    fn test_change_column_rejects_not_null_without_default() {
        let conn = FakeConnection::new();
        let column = ColumnDescriptor::new("note", ColumnType::String);
        let err = editor(&conn).change_column("orders", "note", &column).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidOperation(_)));
        assert_eq!(conn.statement_count(), 0);
        assert!(conn.queries().is_empty());
    }

    #[test]
    fn test_drop_column() {
        let conn = FakeConnection::new();
        editor(&conn).drop_column("users", "nick").unwrap();
        assert_eq!(
            conn.executed(),
            vec!["ALTER TABLE APPDATA.USERS DROP COLUMN NICK".to_string()]
        );
    }

    // ── Indexes ─────────────────────────────────────────────────────────

    #[test]
    fn test_add_unique_named_index() {
        let conn = FakeConnection::new();
        let index = IndexDescriptor::new(["email", "tenant"]).name("ux_email").unique();
        editor(&conn).add_index("users", &index).unwrap();
        assert_eq!(
            conn.executed(),
            vec!["CREATE UNIQUE INDEX APPDATA.UX_EMAIL ON APPDATA.USERS (EMAIL, TENANT)".to_string()]
        );
    }

    #[test]
    fn test_drop_index_by_columns() {
        let conn = FakeConnection::new();
        conn.on_query(
            "SYSKEYS",
            vec![
                index_row("USERS_A_B", "A", "USERS"),
                index_row("USERS_A_B", "B", "USERS"),
            ],
        );
        let mut editor = editor(&conn);
        editor.drop_index("users", &cols(&["b", "a"])).unwrap();
        editor.drop_index("users", &cols(&["c"])).unwrap();
        assert_eq!(conn.executed(), vec!["DROP INDEX APPDATA.USERS_A_B".to_string()]);
    }

    #[test]
    fn test_drop_index_by_name_absent_is_noop() {
        let conn = FakeConnection::new();
        editor(&conn).drop_index_by_name("users", "gone").unwrap();
        assert_eq!(conn.statement_count(), 0);
    }

    #[test]
    fn test_drop_index_by_name() {
        let conn = FakeConnection::new();
        conn.on_query("SYSKEYS", vec![index_row("UX_EMAIL", "EMAIL", "USERS")]);
        editor(&conn).drop_index_by_name("users", "ux_email").unwrap();
        assert_eq!(conn.executed(), vec!["DROP INDEX APPDATA.UX_EMAIL".to_string()]);
    }

    // ── Foreign keys ────────────────────────────────────────────────────

    #[test]
    fn test_add_foreign_key_with_actions() {
        let conn = FakeConnection::new();
        let fk = ForeignKeyDescriptor::new(["owner"], "people")
            .references(["person_id"])
            .constraint("fk_owner")
            .on_delete(ReferentialAction::SetNull)
            .on_update(ReferentialAction::NoAction);
        editor(&conn).add_foreign_key("pets", &fk).unwrap();
        assert_eq!(
            conn.executed(),
            vec![
                "ALTER TABLE APPDATA.PETS ADD CONSTRAINT FK_OWNER FOREIGN KEY (OWNER) \
                 REFERENCES APPDATA.PEOPLE (PERSON_ID) ON DELETE SET NULL ON UPDATE NO ACTION"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_drop_foreign_key_by_name() {
        let conn = FakeConnection::new();
        conn.on_query(
            "SQLFOREIGNKEYS",
            vec![foreign_key_row("FK_OWNER", "PETS", "OWNER", "PEOPLE", "ID")],
        );
        editor(&conn)
            .drop_foreign_key("pets", &cols(&["owner"]), Some("fk_owner"))
            .unwrap();
        assert_eq!(
            conn.executed(),
            vec!["ALTER TABLE APPDATA.PETS DROP FOREIGN KEY APPDATA.FK_OWNER".to_string()]
        );
    }

    #[test]
    fn test_drop_foreign_key_by_name_missing() {
        let conn = FakeConnection::new();
        let err = editor(&conn)
            .drop_foreign_key("pets", &[], Some("fk_owner"))
            .unwrap_err();
        assert!(matches!(err, AdapterError::NotFound(_)));
    }

    #[test]
    fn test_drop_foreign_key_by_columns_deduplicates() {
        let conn = FakeConnection::new();
        conn.on_query("A.COLUMN_NAME = 'A'", vec![constraint_row("FK_AB")]);
        conn.on_query("A.COLUMN_NAME = 'B'", vec![constraint_row("FK_AB")]);
        editor(&conn)
            .drop_foreign_key("t", &cols(&["a", "b"]), None)
            .unwrap();
        assert_eq!(
            conn.executed(),
            vec!["ALTER TABLE APPDATA.T DROP FOREIGN KEY APPDATA.FK_AB".to_string()]
        );
    }

    #[test]
    fn test_drop_foreign_key_by_columns_none_found() {
        let conn = FakeConnection::new();
        let err = editor(&conn)
            .drop_foreign_key("t", &cols(&["a"]), None)
            .unwrap_err();
        assert!(matches!(err, AdapterError::NotFound(_)));
    }

    // ── Schemas and commands ────────────────────────────────────────────

    #[test]
    fn test_create_and_drop_database() {
        let conn = FakeConnection::new();
        let mut editor = editor(&conn);
        editor.create_database("archive").unwrap();
        editor.drop_database("archive").unwrap();
        assert_eq!(
            conn.executed(),
            vec!["CREATE SCHEMA ARCHIVE".to_string(), "DROP SCHEMA ARCHIVE".to_string()]
        );
    }

    #[test]
    fn test_command_log() {
        let conn = FakeConnection::new();
        let mut editor = editor(&conn);
        editor.drop_table("users").unwrap();
        editor
            .add_column("t", &ColumnDescriptor::new("c", ColumnType::Date).nullable())
            .unwrap();
        let commands: Vec<String> = editor.commands().iter().map(ToString::to_string).collect();
        assert_eq!(commands, vec!["dropTable(users)", "addColumn(t, c, date)"]);
        editor.clear_commands();
        assert!(editor.commands().is_empty());
    }

    #[test]
    fn test_create_table_logs_index_and_foreign_key_commands() {
        let conn = FakeConnection::new();
        let mut editor = editor(&conn);
        let table = TableDescriptor::new("orders")
            .column(ColumnDescriptor::new("user_id", ColumnType::Integer))
            .index(IndexDescriptor::new(["user_id"]))
            .foreign_key(ForeignKeyDescriptor::new(["user_id"], "users"));
        editor.create_table(&table).unwrap();
        let commands: Vec<String> = editor.commands().iter().map(ToString::to_string).collect();
        assert_eq!(
            commands,
            vec![
                "createTable(orders)",
                "addForeignKey(orders, user_id, users)",
                "addIndex(orders, user_id)",
            ]
        );
    }

    // ── Rows ────────────────────────────────────────────────────────────

    #[test]
    fn test_insert_renders_null_and_quotes_inline() {
        let conn = FakeConnection::new();
        let mut editor = editor(&conn);
        let row = Row::from_pairs([
            ("id", Value::Int(7)),
            ("parent_id", Value::Null),
            ("name", Value::from("O'Neil")),
            ("active", Value::Bool(false)),
        ]);
        editor.insert("people", &row).unwrap();
        assert_eq!(
            conn.executed(),
            vec![
                "INSERT INTO APPDATA.PEOPLE (ID, PARENT_ID, NAME, ACTIVE) \
                 VALUES (7, NULL, 'O''Neil', 0)"
                    .to_string()
            ]
        );
        assert_eq!(editor.commands()[0].to_string(), "insert(people, id,parent_id,name,active)");
    }

    #[test]
    fn test_insert_empty_row_rejected() {
        let conn = FakeConnection::new();
        let err = editor(&conn).insert("people", &Row::from_pairs(Vec::<(String, Value)>::new()));
        assert!(matches!(err, Err(AdapterError::InvalidOperation(_))));
        assert_eq!(conn.statement_count(), 0);
    }

    #[test]
    fn test_change_column_rejects_non_finite_default() {
        let conn = FakeConnection::new();
        let column = ColumnDescriptor::new("ratio", ColumnType::Double).default(f64::INFINITY);
        let err = editor(&conn).change_column("t", "ratio", &column).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidOperation(_)));
        assert_eq!(conn.statement_count(), 0);
    }

    #[test]
    fn test_type_mapping_passthrough() {
        let conn = FakeConnection::new();
        let editor = editor(&conn);
        assert_eq!(
            editor.to_dialect_type(ColumnType::DateTime, None).unwrap().name,
            "timestamp"
        );
        assert_eq!(
            editor.to_abstract_type("BIGINT").unwrap().column_type,
            ColumnType::BigInteger
        );
    }
}
