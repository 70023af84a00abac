//! Schema introspection against the DB2 for i catalog.
//!
//! [`SchemaIntrospector`] issues read-only catalog queries through a
//! [`Connection`] and decodes the results into typed catalog rows and
//! descriptors. Every filter value is upper-cased before it is quoted, since
//! the catalog stores identifiers in upper case.

use db2i_core::logging::SQL_TARGET;
use db2i_core::AdapterResult;
use db2i_db::{ColumnDescriptor, Row};

use super::catalog::{CatalogColumnRow, CatalogForeignKey, CatalogIndex};
use super::identifiers::{quote_identifier, same_identifier};
use super::naming;
use crate::base::Connection;

/// Reads schema state for one schema (library).
#[derive(Debug)]
pub struct SchemaIntrospector<'a, C: Connection> {
    conn: &'a C,
    schema: String,
}

impl<'a, C: Connection> SchemaIntrospector<'a, C> {
    /// Creates an introspector for `schema`.
    pub fn new(conn: &'a C, schema: &str) -> Self {
        Self {
            conn,
            schema: quote_identifier(schema),
        }
    }

    /// The schema, upper-cased.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    fn literal(&self, value: &str) -> String {
        self.conn.quote_literal(&quote_identifier(value))
    }

    fn fetch_all(&self, sql: &str) -> AdapterResult<Vec<Row>> {
        tracing::debug!(target: SQL_TARGET, sql, "catalog query");
        self.conn.fetch_all(sql)
    }

    fn fetch_row(&self, sql: &str) -> AdapterResult<Option<Row>> {
        tracing::debug!(target: SQL_TARGET, sql, "catalog query");
        self.conn.fetch_row(sql)
    }

    // ── Tables ──────────────────────────────────────────────────────────

    /// Returns the table's `SYSTABLES` row, if the table exists.
    pub fn describe_table(&self, table: &str) -> AdapterResult<Option<Row>> {
        let sql = format!(
            "SELECT * FROM {schema}.SYSTABLES WHERE TABLE_SCHEMA = {s} AND TABLE_NAME = {t}",
            schema = self.schema,
            s = self.literal(&self.schema),
            t = self.literal(table),
        );
        self.fetch_row(&sql)
    }

    /// Returns `true` if the table exists.
    pub fn has_table(&self, table: &str) -> AdapterResult<bool> {
        let sql = format!(
            "SELECT TABLE_NAME FROM {schema}.SYSTABLES WHERE TABLE_SCHEMA = {s} AND TABLE_NAME = {t}",
            schema = self.schema,
            s = self.literal(&self.schema),
            t = self.literal(table),
        );
        Ok(self.fetch_row(&sql)?.is_some())
    }

    // ── Columns ─────────────────────────────────────────────────────────

    /// Returns the table's columns as decoded catalog rows, in ordinal order.
    pub fn describe_columns(&self, table: &str) -> AdapterResult<Vec<CatalogColumnRow>> {
        let sql = format!(
            "SELECT * FROM {schema}.SYSCOLUMNS WHERE TABLE_SCHEMA = {s} AND TABLE_NAME = {t} \
             ORDER BY ORDINAL_POSITION",
            schema = self.schema,
            s = self.literal(&self.schema),
            t = self.literal(table),
        );
        self.fetch_all(&sql)?
            .iter()
            .map(CatalogColumnRow::from_row)
            .collect()
    }

    /// Returns the table's columns as descriptors.
    pub fn get_columns(&self, table: &str) -> AdapterResult<Vec<ColumnDescriptor>> {
        self.describe_columns(table)?
            .iter()
            .map(CatalogColumnRow::to_column_descriptor)
            .collect()
    }

    /// Finds a column by name, case-insensitively.
    pub fn find_column(&self, table: &str, column: &str) -> AdapterResult<Option<CatalogColumnRow>> {
        Ok(self
            .describe_columns(table)?
            .into_iter()
            .find(|c| same_identifier(&c.name, column)))
    }

    /// Returns `true` if the table has the column.
    pub fn has_column(&self, table: &str, column: &str) -> AdapterResult<bool> {
        Ok(self.find_column(table, column)?.is_some())
    }

    // ── Indexes ─────────────────────────────────────────────────────────

    /// Returns the table's indexes with their columns in key order.
    pub fn get_indexes(&self, table: &str) -> AdapterResult<Vec<CatalogIndex>> {
        let sql = format!(
            "SELECT A.INDEX_NAME, A.COLUMN_NAME, B.TABLE_NAME FROM {schema}.SYSKEYS A \
             LEFT JOIN {schema}.SYSINDEXES B ON A.INDEX_NAME = B.INDEX_NAME \
             AND A.INDEX_SCHEMA = B.INDEX_SCHEMA \
             WHERE A.INDEX_SCHEMA = {s} AND B.TABLE_NAME = {t} \
             ORDER BY A.INDEX_NAME, A.ORDINAL_POSITION",
            schema = self.schema,
            s = self.literal(&self.schema),
            t = self.literal(table),
        );
        CatalogIndex::group(&self.fetch_all(&sql)?)
    }

    /// Returns `true` if an index covers exactly `columns`, in any order.
    pub fn has_index(&self, table: &str, columns: &[String]) -> AdapterResult<bool> {
        let indexes = self.get_indexes(table)?;
        Ok(naming::find_index_by_columns(&indexes, columns).is_some())
    }

    /// Returns `true` if the table has an index with this name.
    pub fn has_index_by_name(&self, table: &str, name: &str) -> AdapterResult<bool> {
        let indexes = self.get_indexes(table)?;
        Ok(naming::find_index_by_name(&indexes, name).is_some())
    }

    // ── Foreign keys ────────────────────────────────────────────────────

    /// Returns the table's foreign keys with their column pairs in key order.
    pub fn get_foreign_keys(&self, table: &str) -> AdapterResult<Vec<CatalogForeignKey>> {
        let sql = format!(
            "SELECT FK_NAME, FKTABLE_NAME, FKCOLUMN_NAME, PKTABLE_NAME, PKCOLUMN_NAME \
             FROM SYSIBM.SQLFOREIGNKEYS WHERE FKTABLE_SCHEM = {s} AND FKTABLE_NAME = {t} \
             ORDER BY FK_NAME, KEY_SEQ",
            s = self.literal(&self.schema),
            t = self.literal(table),
        );
        CatalogForeignKey::group(&self.fetch_all(&sql)?)
    }

    /// Returns `true` if a foreign key matches.
    ///
    /// With a constraint name the name alone decides; otherwise the key's
    /// column set must equal `columns`.
    pub fn has_foreign_key(
        &self,
        table: &str,
        columns: &[String],
        constraint: Option<&str>,
    ) -> AdapterResult<bool> {
        let keys = self.get_foreign_keys(table)?;
        Ok(naming::find_foreign_key(&keys, columns, constraint).is_some())
    }

    /// Returns the names of the foreign key constraints that include
    /// `column`, in key position order.
    pub fn foreign_key_constraints_for_column(
        &self,
        table: &str,
        column: &str,
    ) -> AdapterResult<Vec<String>> {
        let sql = format!(
            "SELECT A.CONSTRAINT_NAME FROM {schema}.SYSKEYCST A \
             JOIN {schema}.SYSCST B ON A.CONSTRAINT_SCHEMA = B.CONSTRAINT_SCHEMA \
             AND A.CONSTRAINT_NAME = B.CONSTRAINT_NAME \
             WHERE A.TABLE_SCHEMA = {s} AND A.TABLE_NAME = {t} AND A.COLUMN_NAME = {c} \
             AND B.CONSTRAINT_TYPE = 'FOREIGN KEY' \
             ORDER BY A.COLUMN_POSITION",
            schema = self.schema,
            s = self.literal(&self.schema),
            t = self.literal(table),
            c = self.literal(column),
        );
        self.fetch_all(&sql)?
            .iter()
            .map(|row| {
                row.get::<String>("CONSTRAINT_NAME")
                    .map(|name| name.trim().to_string())
            })
            .collect()
    }

    // ── Schemas ─────────────────────────────────────────────────────────

    /// Returns `true` if the schema (library) exists.
    pub fn has_database(&self, name: &str) -> AdapterResult<bool> {
        let sql = format!(
            "SELECT SCHEMA_NAME FROM QSYS2.SYSSCHEMAS WHERE SCHEMA_NAME = {}",
            self.literal(name)
        );
        Ok(self.fetch_row(&sql)?.is_some())
    }
}
