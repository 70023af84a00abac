//! Identifier discipline.
//!
//! The catalog stores every identifier upper-cased, so the adapter folds all
//! names it renders to upper case and compares names case-insensitively.
//! Identifiers are emitted unquoted; folding is idempotent.

/// Folds an identifier to the catalog's canonical case.
///
/// # Examples
///
/// ```
/// use db2i_db_backends::db2i::identifiers::quote_identifier;
///
/// assert_eq!(quote_identifier("Users"), "USERS");
/// assert_eq!(quote_identifier(&quote_identifier("Users")), quote_identifier("USERS"));
/// ```
pub fn quote_identifier(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Renders `schema.name`, both folded.
pub fn qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", quote_identifier(schema), quote_identifier(name))
}

/// Compares two identifiers case-insensitively.
pub fn same_identifier(a: &str, b: &str) -> bool {
    quote_identifier(a) == quote_identifier(b)
}

/// Folds and joins a column list with `", "`.
pub fn column_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ")
}
