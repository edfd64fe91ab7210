//! Structural schema diff.
//!
//! Compares a `before` and an `after` [`Schema`] and produces the ordered
//! list of [`Change`]s that turns the former into the latter. Both inputs
//! are valid models (duplicates were rejected while parsing), so diffing
//! cannot fail.
//!
//! Ordering is fixed and independent of how the inputs were written:
//!
//! - tables: drops (in `before` order), creates (in `after` order), then
//!   alters (in `before` order);
//! - actions of one table: drop column, add column, change column, drop
//!   primary key, add primary key, drop index, add index, set option.
//!
//! Renames are not detected. A renamed column, index or table shows up as
//! a drop plus an add. Column reordering is not migrated either; it is
//! reported as a warning.

mod apply;
mod change;

pub use apply::apply_changes;
pub use change::{AlterAction, AlterTable, Change};

use tracing::{debug, trace, warn};

use crate::schema::{Index, IndexKey, IndexKind, Schema, Table};

// ================================================================
// Schema level
// ================================================================

/// Computes the changes that migrate `before` into `after`.
#[must_use]
pub fn diff_schemas(before: &Schema, after: &Schema) -> Vec<Change> {
    let mut changes = Vec::new();

    for table in before.tables() {
        if !after.has_table(table.name()) {
            trace!(table = table.name(), "table dropped");
            changes.push(Change::DropTable(table.name().to_string()));
        }
    }

    for table in after.tables() {
        if !before.has_table(table.name()) {
            trace!(table = table.name(), "table created");
            changes.push(Change::CreateTable(table.clone()));
        }
    }

    for old in before.tables() {
        if let Some(new) = after.table(old.name()) {
            if let Some(alter) = diff_table(old, new) {
                changes.push(Change::AlterTable(alter));
            }
        }
    }

    debug!(
        before = before.len(),
        after = after.len(),
        changes = changes.len(),
        "diffed schemas"
    );
    changes
}

// ================================================================
// Table level
// ================================================================

/// Computes the `ALTER TABLE` actions that turn `before` into `after`.
///
/// Returns `None` when the two definitions are equivalent. Table names are
/// not compared; the result is named after `before`.
#[must_use]
pub fn diff_table(before: &Table, after: &Table) -> Option<AlterTable> {
    let mut actions = Vec::new();
    diff_columns(before, after, &mut actions);
    diff_primary_key(before, after, &mut actions);
    diff_indexes(before, after, &mut actions);
    diff_options(before, after, &mut actions);

    trace!(table = before.name(), actions = actions.len(), "diffed table");
    if actions.is_empty() {
        None
    } else {
        Some(AlterTable {
            table: before.name().to_string(),
            actions,
        })
    }
}

fn diff_columns(before: &Table, after: &Table, actions: &mut Vec<AlterAction>) {
    for column in before.columns() {
        if !after.has_column(&column.name) {
            actions.push(AlterAction::DropColumn(column.name.clone()));
        }
    }

    for column in after.columns() {
        if !before.has_column(&column.name) {
            actions.push(AlterAction::AddColumn(column.clone()));
        }
    }

    // Changed columns follow `after` order, which is the order the
    // definitions appear in the new schema.
    for column in after.columns() {
        if let Some(old) = before.column(&column.name) {
            if old != column {
                actions.push(AlterAction::ChangeColumn {
                    old_name: old.name.clone(),
                    column: column.clone(),
                });
            }
        }
    }

    detect_column_order_change(before, after);
}

/// Warns when the columns present on both sides appear in a different
/// order. No action is emitted for it.
fn detect_column_order_change(before: &Table, after: &Table) {
    let before_order: Vec<&str> = before
        .columns()
        .filter(|column| after.has_column(&column.name))
        .map(|column| column.name.as_str())
        .collect();
    let after_order: Vec<&str> = after
        .columns()
        .filter(|column| before.has_column(&column.name))
        .map(|column| column.name.as_str())
        .collect();

    if before_order != after_order {
        warn!(
            table = before.name(),
            ?before_order,
            ?after_order,
            "column order changed; reordering is not migrated"
        );
    }
}

fn diff_primary_key(before: &Table, after: &Table, actions: &mut Vec<AlterAction>) {
    match (before.primary_key(), after.primary_key()) {
        (Some(_), None) => actions.push(AlterAction::DropPrimaryKey),
        (None, Some(new)) => actions.push(AlterAction::AddPrimaryKey(new.clone())),
        (Some(old), Some(new)) if old != new => {
            // No atomic primary key alter in MySQL.
            actions.push(AlterAction::DropPrimaryKey);
            actions.push(AlterAction::AddPrimaryKey(new.clone()));
        }
        _ => {}
    }
}

// ================================================================
// Indexes
// ================================================================

/// Pairs every `before` index with the first unclaimed `after` index that
/// has the same [`IndexKey`]. Duplicate structural keys pair up in
/// declaration order.
fn match_indexes(before: &[Index], after: &[Index]) -> Vec<Option<usize>> {
    let after_keys: Vec<IndexKey> = after.iter().map(Index::key).collect();
    let mut claimed = vec![false; after.len()];
    before
        .iter()
        .map(|index| {
            let key = index.key();
            let matched = (0..after_keys.len()).find(|&i| !claimed[i] && after_keys[i] == key);
            if let Some(i) = matched {
                claimed[i] = true;
            }
            matched
        })
        .collect()
}

fn diff_indexes(before: &Table, after: &Table, actions: &mut Vec<AlterAction>) {
    let pairs = match_indexes(before.indexes(), after.indexes());
    let mut added = vec![true; after.indexes().len()];

    for (old, matched) in before.indexes().iter().zip(&pairs) {
        match matched {
            Some(i) if after.indexes()[*i] == *old => added[*i] = false,
            // Matched but different: no in-place alter, drop and re-add.
            Some(_) | None => {
                trace!(table = before.name(), index = %old.key(), "index dropped");
                actions.push(drop_index_action(before, old));
            }
        }
    }

    for (index, is_added) in after.indexes().iter().zip(added) {
        if is_added {
            actions.push(AlterAction::AddIndex(index.clone()));
        }
    }
}

/// Builds the action dropping `index` from `table`, resolving the name
/// MySQL knows it by.
fn drop_index_action(table: &Table, index: &Index) -> AlterAction {
    if index.kind == IndexKind::Foreign {
        let name = index
            .symbol
            .clone()
            .or_else(|| index.name.clone())
            .unwrap_or_else(|| generated_foreign_key_name(table, index));
        return AlterAction::DropForeignKey { name };
    }

    // Unnamed indexes are named after their first column by MySQL.
    let name = index
        .name
        .as_ref()
        .or(index.symbol.as_ref())
        .or_else(|| index.columns.first().map(|column| &column.name))
        .cloned()
        .unwrap_or_default();
    AlterAction::DropIndex { name }
}

/// `<table>_ibfk_<n>`, `n` counting the table's anonymous foreign keys
/// from 1.
fn generated_foreign_key_name(table: &Table, index: &Index) -> String {
    let ordinal = table
        .indexes()
        .iter()
        .filter(|i| i.kind == IndexKind::Foreign && i.symbol.is_none() && i.name.is_none())
        .position(|i| core::ptr::eq(i, index))
        .map_or(1, |position| position + 1);
    format!("{}_ibfk_{ordinal}", table.name())
}

// ================================================================
// Table options
// ================================================================

/// Options added or changed in `after`. Removed options are left alone:
/// MySQL cannot unset a table option.
fn diff_options(before: &Table, after: &Table, actions: &mut Vec<AlterAction>) {
    for (name, value) in after.options() {
        if before.option(name) != Some(value) {
            actions.push(AlterAction::SetTableOption {
                name: name.clone(),
                value: value.clone(),
            });
        }
    }
}
