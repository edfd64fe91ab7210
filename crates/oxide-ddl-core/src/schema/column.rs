//! Column definitions.

use super::types::DataType;

/// Default value of a column, tagged by the literal kind it was written as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value"))]
pub enum DefaultValue {
    /// `DEFAULT NULL`.
    Null,
    /// A string literal, unescaped.
    String(String),
    /// A numeric literal as written, sign included (`-1`, `0.00`).
    Number(String),
    /// A keyword or function default, upper-cased. Synonyms of the current
    /// time (`NOW()`, `LOCALTIMESTAMP`) are stored as `CURRENT_TIMESTAMP`.
    Keyword(String),
    /// A bit-value literal (`b'0'`), digits only.
    Bits(String),
    /// A hexadecimal literal (`x'1F'`), digits only, upper-cased.
    Hex(String),
}

/// A single column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Declared data type.
    pub data_type: DataType,
    /// `UNSIGNED`.
    pub unsigned: bool,
    /// `ZEROFILL`.
    pub zerofill: bool,
    /// `BINARY` attribute of a character type.
    pub binary: bool,
    /// `CHARACTER SET` of the column.
    pub charset: Option<String>,
    /// `COLLATE` of the column.
    pub collation: Option<String>,
    /// False when declared `NOT NULL`.
    pub nullable: bool,
    /// `DEFAULT` value.
    pub default: Option<DefaultValue>,
    /// `ON UPDATE` value (e.g. `CURRENT_TIMESTAMP`).
    pub on_update: Option<DefaultValue>,
    /// `AUTO_INCREMENT`.
    pub auto_increment: bool,
    /// `COMMENT`.
    pub comment: Option<String>,
}

impl Column {
    /// Creates a nullable column with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            unsigned: false,
            zerofill: false,
            binary: false,
            charset: None,
            collation: None,
            nullable: true,
            default: None,
            on_update: None,
            auto_increment: false,
            comment: None,
        }
    }

    /// Marks the column `NOT NULL`.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Marks the column `AUTO_INCREMENT`.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
}
