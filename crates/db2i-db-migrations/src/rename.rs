//! Column rename by copy.
//!
//! DB2 for i cannot rename a column in place, so a rename runs as:
//!
//! 1. **Locate** the column in the catalog.
//! 2. **Validate** that it is not an identity, generated-always, or CLOB
//!    column.
//! 3. **Copy-Add** a column with the new name and the old definition, placed
//!    before the old column.
//! 4. **Copy-Data** with `UPDATE ... SET new = old`.
//! 5. **Drop-Old** the old column.
//!
//! The drop comes last. A failure after step 3 leaves both columns in place;
//! nothing is rolled back.

use db2i_core::{AdapterError, AdapterResult};
use db2i_db::ColumnDescriptor;
use db2i_db_backends::db2i::identifiers::{qualified, quote_identifier};
use db2i_db_backends::{to_dialect_type, CatalogColumnRow, Connection};

use crate::schema_editor::{Db2SchemaEditor, SchemaEditor};

/// Where a rename is.
#[derive(Debug, Clone, PartialEq)]
pub enum RenameState {
    /// Looking the column up.
    Locate,
    /// Checking the located column can be renamed.
    Validate(CatalogColumnRow),
    /// Adding the copy.
    CopyAdd(ColumnDescriptor),
    /// Copying the data.
    CopyData,
    /// Dropping the old column.
    DropOld,
    /// Finished.
    Done,
}

impl RenameState {
    const fn name(&self) -> &'static str {
        match self {
            Self::Locate => "locate",
            Self::Validate(_) => "validate",
            Self::CopyAdd(_) => "copy-add",
            Self::CopyData => "copy-data",
            Self::DropOld => "drop-old",
            Self::Done => "done",
        }
    }
}

/// A pending column rename.
#[derive(Debug, Clone)]
pub struct RenameColumn<'a> {
    table: &'a str,
    from: &'a str,
    to: &'a str,
    state: RenameState,
}

impl<'a> RenameColumn<'a> {
    /// Plans renaming `from` to `to` on `table`.
    pub const fn new(table: &'a str, from: &'a str, to: &'a str) -> Self {
        Self {
            table,
            from,
            to,
            state: RenameState::Locate,
        }
    }

    /// The current state.
    pub const fn state(&self) -> &RenameState {
        &self.state
    }

    /// Runs the rename to completion.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::NotFound`] if the column does not exist; no SQL is
    ///   issued.
    /// - [`AdapterError::InvalidOperation`] for identity and generated-always
    ///   columns; no SQL is issued.
    /// - [`AdapterError::UnsupportedType`] for CLOB columns, whose length the
    ///   copy cannot keep; no SQL is issued.
    /// - Any connection failure from the copy steps, unchanged.
    pub fn run<C: Connection>(mut self, editor: &mut Db2SchemaEditor<C>) -> AdapterResult<()> {
        while self.state != RenameState::Done {
            let state = std::mem::replace(&mut self.state, RenameState::Done);
            let step = state.name();
            self.state = match self.step(editor, state) {
                Ok(next) => next,
                Err(err) => {
                    if matches!(step, "copy-data" | "drop-old") {
                        tracing::error!(
                            table = self.table,
                            from = self.from,
                            to = self.to,
                            step,
                            error = %err,
                            "rename stopped after adding the new column; both columns remain"
                        );
                    }
                    return Err(err);
                }
            };
        }
        Ok(())
    }

    fn step<C: Connection>(
        &self,
        editor: &mut Db2SchemaEditor<C>,
        state: RenameState,
    ) -> AdapterResult<RenameState> {
        match state {
            RenameState::Locate => editor
                .introspector()
                .find_column(self.table, self.from)?
                .map(RenameState::Validate)
                .ok_or_else(|| {
                    AdapterError::NotFound(format!(
                        "The specified column doesn't exist: {}",
                        self.from
                    ))
                }),
            RenameState::Validate(row) => {
                if row.identity || row.is_generated_always() {
                    return Err(AdapterError::InvalidOperation(format!(
                        "Cannot rename the identity or generated column '{}'.",
                        self.from
                    )));
                }
                if row.data_type == "CLOB" {
                    return Err(AdapterError::UnsupportedType(format!(
                        "Cannot rename the CLOB column '{}': the copy would not keep its length.",
                        self.from
                    )));
                }
                let column = self.copy_of(&row)?;
                if let Some(copied) = changed_type(&row, &column)? {
                    tracing::warn!(
                        table = self.table,
                        column = self.from,
                        catalog_type = %row.data_type,
                        copied_type = %copied,
                        "renamed column is recreated with a different type"
                    );
                }
                Ok(RenameState::CopyAdd(column))
            }
            RenameState::CopyAdd(column) => {
                editor.add_column(self.table, &column)?;
                Ok(RenameState::CopyData)
            }
            RenameState::CopyData => {
                editor.execute_sql(&format!(
                    "UPDATE {} SET {} = {}",
                    qualified(editor.schema(), self.table),
                    quote_identifier(self.to),
                    quote_identifier(self.from)
                ))?;
                Ok(RenameState::DropOld)
            }
            RenameState::DropOld => {
                editor.drop_column(self.table, self.from)?;
                Ok(RenameState::Done)
            }
            RenameState::Done => Ok(RenameState::Done),
        }
    }

    /// The new column: the old definition under the new name, placed before
    /// the old column.
    fn copy_of(&self, row: &CatalogColumnRow) -> AdapterResult<ColumnDescriptor> {
        let mut column = row.to_column_descriptor()?;
        column.name = self.to.to_string();
        column.identity = false;
        column.auto_update_timestamp = false;
        column.position_hint = Some(self.from.to_string());
        Ok(column)
    }
}

/// The dialect type the copy will be created with, when it differs from the
/// catalog type.
fn changed_type(row: &CatalogColumnRow, column: &ColumnDescriptor) -> AdapterResult<Option<String>> {
    let copied = to_dialect_type(column.column_type, column.limit)?
        .name
        .to_uppercase();
    let same = copied == row.data_type || (row.data_type == "TIMESTMP" && copied == "TIMESTAMP");
    Ok((!same).then_some(copied))
}
