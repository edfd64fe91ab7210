//! Table definitions.

use core::hash::{Hash, Hasher};

use indexmap::IndexMap;

use super::SchemaError;
use super::column::Column;
use super::index::{Index, PrimaryKey};

/// Value of a table option such as `ENGINE=InnoDB`.
///
/// Words compare case-insensitively (`InnoDB` equals `innodb`) but keep
/// their spelling for output.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value"))]
pub enum OptionValue {
    /// A bare word, kept as written (`InnoDB`, `utf8mb4`).
    Word(String),
    /// A numeric literal as written.
    Number(String),
    /// A string literal, unescaped.
    String(String),
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Word(a), Self::Word(b)) => a.eq_ignore_ascii_case(b),
            (Self::Number(a), Self::Number(b)) | (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for OptionValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Word(word) => word.to_ascii_lowercase().hash(state),
            Self::Number(value) | Self::String(value) => value.hash(state),
        }
    }
}

/// One `CREATE TABLE` definition.
///
/// Columns keep declaration order; lookups by name go through the same
/// ordered map. Instances are built by the parser and only read afterwards.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Table {
    name: String,
    columns: IndexMap<String, Column>,
    primary_key: Option<PrimaryKey>,
    indexes: Vec<Index>,
    options: IndexMap<String, OptionValue>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
            primary_key: None,
            indexes: Vec::new(),
            options: IndexMap::new(),
        }
    }

    /// Table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> {
        self.columns.values()
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Returns true if the table has a column with this name.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// The primary key, if declared.
    #[must_use]
    pub const fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    /// Secondary indexes and constraints in declaration order.
    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Table options in declaration order.
    #[must_use]
    pub const fn options(&self) -> &IndexMap<String, OptionValue> {
        &self.options
    }

    /// Looks up a table option by its normalized (upper-case) name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    pub(crate) fn add_column(&mut self, column: Column) -> Result<(), SchemaError> {
        if self.columns.contains_key(&column.name) {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name,
            });
        }
        self.columns.insert(column.name.clone(), column);
        Ok(())
    }

    pub(crate) fn set_primary_key(&mut self, primary_key: PrimaryKey) -> Result<(), SchemaError> {
        if self.primary_key.is_some() {
            return Err(SchemaError::MultiplePrimaryKeys {
                table: self.name.clone(),
            });
        }
        self.primary_key = Some(primary_key);
        Ok(())
    }

    pub(crate) fn add_index(&mut self, index: Index) -> Result<(), SchemaError> {
        if let Some(name) = &index.name {
            let taken = self
                .indexes
                .iter()
                .any(|existing| existing.name.as_ref() == Some(name));
            if taken {
                return Err(SchemaError::DuplicateIndex {
                    table: self.name.clone(),
                    index: name.clone(),
                });
            }
        }
        self.indexes.push(index);
        Ok(())
    }

    /// Sets a table option. A repeated option keeps its first position and
    /// takes the last value, as MySQL does.
    pub(crate) fn set_option(&mut self, name: String, value: OptionValue) {
        self.options.insert(name, value);
    }

    pub(crate) fn remove_column(&mut self, name: &str) -> Result<Column, SchemaError> {
        self.columns
            .shift_remove(name)
            .ok_or_else(|| self.unknown_column(name))
    }

    /// Replaces the column `old_name` in place. A new name keeps the
    /// column's position.
    pub(crate) fn replace_column(
        &mut self,
        old_name: &str,
        column: Column,
    ) -> Result<(), SchemaError> {
        let Some(position) = self.columns.get_index_of(old_name) else {
            return Err(self.unknown_column(old_name));
        };
        if column.name != old_name && self.columns.contains_key(&column.name) {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name,
            });
        }
        self.columns.shift_remove_index(position);
        self.columns.shift_insert(position, column.name.clone(), column);
        Ok(())
    }

    pub(crate) fn clear_primary_key(&mut self) -> Result<PrimaryKey, SchemaError> {
        self.primary_key
            .take()
            .ok_or_else(|| SchemaError::MissingPrimaryKey {
                table: self.name.clone(),
            })
    }

    /// Removes the first index equal to `index`.
    pub(crate) fn remove_index(&mut self, index: &Index, name: &str) -> Result<(), SchemaError> {
        let Some(position) = self.indexes.iter().position(|existing| existing == index) else {
            return Err(SchemaError::UnknownIndex {
                table: self.name.clone(),
                index: name.to_string(),
            });
        };
        self.indexes.remove(position);
        Ok(())
    }

    fn unknown_column(&self, name: &str) -> SchemaError {
        SchemaError::UnknownColumn {
            table: self.name.clone(),
            column: name.to_string(),
        }
    }
}

/// Structural equality: column order matters, option order does not.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.columns.len() == other.columns.len()
            && self.columns.values().eq(other.columns.values())
            && self.primary_key == other.primary_key
            && self.indexes == other.indexes
            && self.options == other.options
    }
}
