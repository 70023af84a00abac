//! Index and foreign key names.
//!
//! Objects created without an explicit name get a deterministic one derived
//! from the table and column list, so a later introspection pass recognizes
//! them. Lookup by column list ignores column order and case.

use std::collections::BTreeSet;

use super::catalog::{CatalogForeignKey, CatalogIndex};
use super::identifiers::{quote_identifier, same_identifier};

/// Derives `<TABLE>_<COL1>_<COL2>...`, upper-cased.
///
/// # Examples
///
/// ```
/// use db2i_db_backends::db2i::naming::derive_name;
///
/// let cols = vec!["user_id".to_string(), "created_at".to_string()];
/// assert_eq!(derive_name("orders", &cols), "ORDERS_USER_ID_CREATED_AT");
/// ```
pub fn derive_name(table: &str, columns: &[String]) -> String {
    std::iter::once(table)
        .chain(columns.iter().map(String::as_str))
        .map(quote_identifier)
        .collect::<Vec<_>>()
        .join("_")
}

/// Returns the explicit name when present, otherwise the derived one.
pub fn resolve_name(explicit: Option<&str>, table: &str, columns: &[String]) -> String {
    explicit.map_or_else(|| derive_name(table, columns), quote_identifier)
}

/// Returns `true` if the two column lists name the same set of columns.
///
/// Both set differences must be empty; order and case do not matter.
pub fn same_column_set(a: &[String], b: &[String]) -> bool {
    let left: BTreeSet<String> = a.iter().map(|c| quote_identifier(c)).collect();
    let right: BTreeSet<String> = b.iter().map(|c| quote_identifier(c)).collect();
    left.difference(&right).next().is_none() && right.difference(&left).next().is_none()
}

/// Finds the first index over exactly `columns`.
pub fn find_index_by_columns<'a>(
    indexes: &'a [CatalogIndex],
    columns: &[String],
) -> Option<&'a CatalogIndex> {
    indexes.iter().find(|i| same_column_set(&i.columns, columns))
}

/// Finds an index by name.
pub fn find_index_by_name<'a>(indexes: &'a [CatalogIndex], name: &str) -> Option<&'a CatalogIndex> {
    indexes.iter().find(|i| same_identifier(&i.name, name))
}

/// Finds a foreign key by constraint name, or by column set when no name is
/// given.
pub fn find_foreign_key<'a>(
    keys: &'a [CatalogForeignKey],
    columns: &[String],
    constraint: Option<&str>,
) -> Option<&'a CatalogForeignKey> {
    match constraint {
        Some(name) => keys.iter().find(|k| same_identifier(&k.name, name)),
        None => keys.iter().find(|k| same_column_set(&k.columns, columns)),
    }
}
