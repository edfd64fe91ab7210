//! Replaying changes on a schema model.
//!
//! [`apply_changes`] performs on a [`Schema`] what the rendered migration
//! would perform on a database, which lets callers check that a diff
//! actually converges on its target.

use tracing::{debug, trace};

use super::{AlterAction, AlterTable, Change, drop_index_action};
use crate::schema::{Schema, SchemaError, Table};

/// Applies `changes` to a copy of `schema` and returns the result.
///
/// Added columns are appended and removed table options stay in place, as
/// in MySQL. Index drops are resolved by the name MySQL knows the index
/// by, so a change list produced by [`super::diff_schemas`] for `schema`
/// always applies cleanly.
///
/// # Errors
///
/// Returns a [`SchemaError`] when a change refers to a table, column,
/// index or primary key that does not exist, or adds one that already
/// does.
pub fn apply_changes(schema: &Schema, changes: &[Change]) -> Result<Schema, SchemaError> {
    let mut result = schema.clone();
    for change in changes {
        match change {
            Change::DropTable(name) => {
                result.remove_table(name)?;
            }
            Change::CreateTable(table) => result.add_table(table.clone())?,
            Change::AlterTable(alter) => apply_alter(result.table_mut(&alter.table)?, alter)?,
        }
    }
    debug!(changes = changes.len(), tables = result.len(), "applied changes");
    Ok(result)
}

fn apply_alter(table: &mut Table, alter: &AlterTable) -> Result<(), SchemaError> {
    // Drop names refer to the table as it was before this statement.
    let original = table.clone();
    for action in &alter.actions {
        trace!(table = table.name(), ?action, "applying action");
        match action {
            AlterAction::DropColumn(name) => {
                table.remove_column(name)?;
            }
            AlterAction::AddColumn(column) => table.add_column(column.clone())?,
            AlterAction::ChangeColumn { old_name, column } => {
                table.replace_column(old_name, column.clone())?;
            }
            AlterAction::DropPrimaryKey => {
                table.clear_primary_key()?;
            }
            AlterAction::AddPrimaryKey(primary_key) => {
                table.set_primary_key(primary_key.clone())?;
            }
            AlterAction::DropIndex { name } | AlterAction::DropForeignKey { name } => {
                let Some(index) = original
                    .indexes()
                    .iter()
                    .find(|index| drop_index_action(&original, index) == *action)
                else {
                    return Err(SchemaError::UnknownIndex {
                        table: table.name().to_string(),
                        index: name.clone(),
                    });
                };
                table.remove_index(index, name)?;
            }
            AlterAction::AddIndex(index) => table.add_index(index.clone())?,
            AlterAction::SetTableOption { name, value } => {
                table.set_option(name.clone(), value.clone());
            }
        }
    }
    Ok(())
}
