//! Change records produced by the diff engine.

use crate::schema::{Column, Index, OptionValue, PrimaryKey, Table};

/// One difference between two schemas, at table granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Change {
    /// The table only exists in `before`.
    DropTable(String),
    /// The table only exists in `after`; carries its full definition.
    CreateTable(Table),
    /// The table exists on both sides with a different definition.
    AlterTable(AlterTable),
}

impl Change {
    /// Name of the table the change applies to.
    #[must_use]
    pub fn table_name(&self) -> &str {
        match self {
            Self::DropTable(name) => name,
            Self::CreateTable(table) => table.name(),
            Self::AlterTable(alter) => &alter.table,
        }
    }
}

/// All actions needed to turn one table into its new definition.
/// Rendered as a single `ALTER TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTable {
    /// Table name.
    pub table: String,
    /// Actions in emission order. Never empty.
    pub actions: Vec<AlterAction>,
}

/// A single clause of an `ALTER TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AlterAction {
    /// `DROP COLUMN`.
    DropColumn(String),
    /// `ADD COLUMN` with the full new definition.
    AddColumn(Column),
    /// `CHANGE COLUMN old new_definition`.
    ChangeColumn {
        /// Column name in `before`.
        old_name: String,
        /// Full definition in `after`.
        column: Column,
    },
    /// `DROP INDEX PRIMARY KEY`.
    DropPrimaryKey,
    /// `ADD PRIMARY KEY`.
    AddPrimaryKey(PrimaryKey),
    /// `DROP INDEX name`.
    DropIndex {
        /// Name MySQL knows the index by.
        name: String,
    },
    /// `DROP FOREIGN KEY symbol`.
    DropForeignKey {
        /// Constraint name MySQL knows the key by.
        name: String,
    },
    /// `ADD ...` index or constraint.
    AddIndex(Index),
    /// `NAME = value` table option.
    SetTableOption {
        /// Normalized option name.
        name: String,
        /// New value.
        value: OptionValue,
    },
}
