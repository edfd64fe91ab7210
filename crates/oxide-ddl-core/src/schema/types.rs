//! MySQL column data types.

use core::fmt;

use crate::lexer::Keyword;

/// Data type names accepted in column definitions.
///
/// Synonyms are kept apart (`INT` and `INTEGER` are distinct names) so the
/// type renders the way it was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TypeName {
    Bit,
    Tinyint,
    Smallint,
    Mediumint,
    Int,
    Integer,
    Bigint,
    Real,
    Double,
    DoublePrecision,
    Float,
    Decimal,
    Dec,
    Numeric,
    Date,
    Time,
    Timestamp,
    Datetime,
    Year,
    Char,
    Varchar,
    Binary,
    Varbinary,
    Tinyblob,
    Blob,
    Mediumblob,
    Longblob,
    Tinytext,
    Text,
    Mediumtext,
    Longtext,
    Enum,
    Set,
    Bool,
    Boolean,
    Json,
    Geometry,
    Point,
}

impl TypeName {
    /// Maps a data type keyword to its type name. `DOUBLE PRECISION` is
    /// resolved by the parser, which sees the second word.
    #[must_use]
    pub const fn from_keyword(keyword: Keyword) -> Option<Self> {
        let name = match keyword {
            Keyword::Bit => Self::Bit,
            Keyword::Tinyint => Self::Tinyint,
            Keyword::Smallint => Self::Smallint,
            Keyword::Mediumint => Self::Mediumint,
            Keyword::Int => Self::Int,
            Keyword::Integer => Self::Integer,
            Keyword::Bigint => Self::Bigint,
            Keyword::Real => Self::Real,
            Keyword::Double => Self::Double,
            Keyword::Float => Self::Float,
            Keyword::Decimal => Self::Decimal,
            Keyword::Dec => Self::Dec,
            Keyword::Numeric => Self::Numeric,
            Keyword::Date => Self::Date,
            Keyword::Time => Self::Time,
            Keyword::Timestamp => Self::Timestamp,
            Keyword::Datetime => Self::Datetime,
            Keyword::Year => Self::Year,
            Keyword::Char => Self::Char,
            Keyword::Varchar => Self::Varchar,
            Keyword::Binary => Self::Binary,
            Keyword::Varbinary => Self::Varbinary,
            Keyword::Tinyblob => Self::Tinyblob,
            Keyword::Blob => Self::Blob,
            Keyword::Mediumblob => Self::Mediumblob,
            Keyword::Longblob => Self::Longblob,
            Keyword::Tinytext => Self::Tinytext,
            Keyword::Text => Self::Text,
            Keyword::Mediumtext => Self::Mediumtext,
            Keyword::Longtext => Self::Longtext,
            Keyword::Enum => Self::Enum,
            Keyword::Set => Self::Set,
            Keyword::Bool => Self::Bool,
            Keyword::Boolean => Self::Boolean,
            Keyword::Json => Self::Json,
            Keyword::Geometry => Self::Geometry,
            Keyword::Point => Self::Point,
            _ => return None,
        };
        Some(name)
    }

    /// Returns the SQL spelling of the type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bit => "BIT",
            Self::Tinyint => "TINYINT",
            Self::Smallint => "SMALLINT",
            Self::Mediumint => "MEDIUMINT",
            Self::Int => "INT",
            Self::Integer => "INTEGER",
            Self::Bigint => "BIGINT",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::DoublePrecision => "DOUBLE PRECISION",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Dec => "DEC",
            Self::Numeric => "NUMERIC",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Datetime => "DATETIME",
            Self::Year => "YEAR",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::Binary => "BINARY",
            Self::Varbinary => "VARBINARY",
            Self::Tinyblob => "TINYBLOB",
            Self::Blob => "BLOB",
            Self::Mediumblob => "MEDIUMBLOB",
            Self::Longblob => "LONGBLOB",
            Self::Tinytext => "TINYTEXT",
            Self::Text => "TEXT",
            Self::Mediumtext => "MEDIUMTEXT",
            Self::Longtext => "LONGTEXT",
            Self::Enum => "ENUM",
            Self::Set => "SET",
            Self::Bool => "BOOL",
            Self::Boolean => "BOOLEAN",
            Self::Json => "JSON",
            Self::Geometry => "GEOMETRY",
            Self::Point => "POINT",
        }
    }

    /// Returns true for types declared with a value list (`ENUM`, `SET`).
    #[must_use]
    pub const fn takes_values(&self) -> bool {
        matches!(self, Self::Enum | Self::Set)
    }

    /// Returns true for character string types, which accept the column
    /// level `BINARY` attribute.
    #[must_use]
    pub const fn is_character(&self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::Varchar
                | Self::Tinytext
                | Self::Text
                | Self::Mediumtext
                | Self::Longtext
                | Self::Enum
                | Self::Set
        )
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length or precision of a type: `(20)` or `(10,2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeLength {
    /// Display width, length or precision.
    pub length: u32,
    /// Number of digits after the decimal point.
    pub scale: Option<u32>,
}

/// A column data type: the type name plus its optional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DataType {
    /// The type name.
    pub name: TypeName,
    /// `(length)` or `(precision, scale)`, if declared.
    pub length: Option<TypeLength>,
    /// Value list of an `ENUM` or `SET`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub values: Vec<String>,
}

impl DataType {
    /// Creates a data type without parameters.
    #[must_use]
    pub const fn new(name: TypeName) -> Self {
        Self {
            name,
            length: None,
            values: Vec::new(),
        }
    }

    /// Sets the `(length)` parameter.
    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(TypeLength {
            length,
            scale: None,
        });
        self
    }

    /// Sets the `(precision, scale)` parameters.
    #[must_use]
    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.length = Some(TypeLength {
            length: precision,
            scale: Some(scale),
        });
        self
    }

    /// Sets the value list of an `ENUM` or `SET`.
    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name_from_keyword() {
        assert_eq!(TypeName::from_keyword(Keyword::Integer), Some(TypeName::Integer));
        assert_eq!(TypeName::from_keyword(Keyword::Int), Some(TypeName::Int));
        assert_eq!(TypeName::from_keyword(Keyword::Table), None);
    }

    #[test]
    fn synonyms_are_distinct() {
        assert_ne!(DataType::new(TypeName::Int), DataType::new(TypeName::Integer));
    }

    #[test]
    fn builders_set_parameters() {
        let ty = DataType::new(TypeName::Decimal).with_precision(10, 2);
        assert_eq!(
            ty.length,
            Some(TypeLength {
                length: 10,
                scale: Some(2)
            })
        );
        let ty = DataType::new(TypeName::Enum).with_values(["a", "b"]);
        assert_eq!(ty.values, vec!["a", "b"]);
    }
}
