//! Schema model.
//!
//! The typed, order-preserving representation of one parsed schema
//! snapshot: tables, their columns, primary key, indexes and options. The
//! model is built once by the parser and only read by the diff engine, so
//! comparisons are structural: two inputs that differ only in whitespace,
//! quoting or keyword case produce equal models.

mod column;
mod index;
mod table;
mod types;

pub use column::{Column, DefaultValue};
pub use index::{
    Index, IndexColumn, IndexKey, IndexKind, IndexMethod, IndexOptions, IndexSignature, PrimaryKey,
    Reference, ReferenceAction, SortOrder,
};
pub use table::{OptionValue, Table};
pub use types::{DataType, TypeLength, TypeName};

use indexmap::IndexMap;

/// A violated model invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two tables share a name.
    #[error("table `{0}` is defined more than once")]
    DuplicateTable(String),

    /// Two columns of one table share a name.
    #[error("column `{column}` is defined more than once in table `{table}`")]
    DuplicateColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// Two indexes of one table share a name.
    #[error("index `{index}` is defined more than once in table `{table}`")]
    DuplicateIndex {
        /// Table name.
        table: String,
        /// Index name.
        index: String,
    },

    /// A table declares more than one primary key.
    #[error("table `{table}` has multiple primary keys")]
    MultiplePrimaryKeys {
        /// Table name.
        table: String,
    },

    /// A change names a table that does not exist.
    #[error("table `{0}` does not exist")]
    UnknownTable(String),

    /// A change names a column that does not exist.
    #[error("column `{column}` does not exist in table `{table}`")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// A change drops an index that does not exist.
    #[error("index `{index}` does not exist in table `{table}`")]
    UnknownIndex {
        /// Table name.
        table: String,
        /// Index name, as it would be dropped.
        index: String,
    },

    /// A change drops the primary key of a table that has none.
    #[error("table `{table}` has no primary key")]
    MissingPrimaryKey {
        /// Table name.
        table: String,
    },
}

/// One parsed schema: its tables in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Schema {
    tables: IndexMap<String, Table>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables in declaration order.
    pub fn tables(&self) -> impl ExactSizeIterator<Item = &Table> {
        self.tables.values()
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Returns true if a table with this name exists.
    #[must_use]
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the schema has no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub(crate) fn add_table(&mut self, table: Table) -> Result<(), SchemaError> {
        if self.tables.contains_key(table.name()) {
            return Err(SchemaError::DuplicateTable(table.name().to_string()));
        }
        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    pub(crate) fn remove_table(&mut self, name: &str) -> Result<Table, SchemaError> {
        self.tables
            .shift_remove(name)
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }

    pub(crate) fn table_mut(&mut self, name: &str) -> Result<&mut Table, SchemaError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }
}
