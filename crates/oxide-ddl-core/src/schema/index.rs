//! Primary keys, indexes and constraints.

use core::fmt;

/// Index storage method given by `USING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndexMethod {
    /// `USING BTREE`.
    Btree,
    /// `USING HASH`.
    Hash,
}

impl IndexMethod {
    /// Parses a method name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "BTREE" => Some(Self::Btree),
            "HASH" => Some(Self::Hash),
            _ => None,
        }
    }

    /// Returns the SQL spelling of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Btree => "BTREE",
            Self::Hash => "HASH",
        }
    }
}

/// Sort direction of an index column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SortOrder {
    /// `ASC`.
    Asc,
    /// `DESC`.
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One key part of an index: a column, optionally with a prefix length
/// and a sort direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexColumn {
    /// Column name.
    pub name: String,
    /// Prefix length, as in `name(10)`.
    pub length: Option<u32>,
    /// Sort direction, if written.
    pub order: Option<SortOrder>,
}

impl IndexColumn {
    /// Creates a key part covering the whole column.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: None,
            order: None,
        }
    }
}

/// Options written after the key parts of an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexOptions {
    /// `KEY_BLOCK_SIZE`.
    pub key_block_size: Option<u32>,
    /// `WITH PARSER` plugin of a fulltext index.
    pub parser: Option<String>,
    /// `COMMENT`.
    pub comment: Option<String>,
    /// `INVISIBLE`. `VISIBLE` is the default and is not recorded.
    pub invisible: bool,
}

impl IndexOptions {
    /// Returns true if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The table's primary key. MySQL allows one per table and it is never
/// referred to by a custom name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrimaryKey {
    /// Key parts in declaration order.
    pub columns: Vec<IndexColumn>,
    /// `USING` method, if written.
    pub using: Option<IndexMethod>,
    /// Trailing index options.
    pub options: IndexOptions,
}

impl PrimaryKey {
    /// Creates a primary key over the named columns.
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(IndexColumn::new).collect(),
            using: None,
            options: IndexOptions::default(),
        }
    }
}

/// What an index enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndexKind {
    /// `KEY` / `INDEX`.
    Plain,
    /// `UNIQUE`.
    Unique,
    /// `FULLTEXT`.
    Fulltext,
    /// `SPATIAL`.
    Spatial,
    /// `FOREIGN KEY ... REFERENCES`.
    Foreign,
}

impl IndexKind {
    /// Returns the keywords that introduce this kind of index in an
    /// `ADD` clause or a table body.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "INDEX",
            Self::Unique => "UNIQUE INDEX",
            Self::Fulltext => "FULLTEXT INDEX",
            Self::Spatial => "SPATIAL INDEX",
            Self::Foreign => "FOREIGN KEY",
        }
    }
}

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ReferenceAction {
    /// `RESTRICT`.
    Restrict,
    /// `CASCADE`.
    Cascade,
    /// `SET NULL`.
    SetNull,
    /// `NO ACTION`.
    NoAction,
    /// `SET DEFAULT`.
    SetDefault,
}

impl ReferenceAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// Target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Reference {
    /// Referenced table.
    pub table: String,
    /// Referenced columns.
    pub columns: Vec<IndexColumn>,
    /// `ON DELETE` action.
    pub on_delete: Option<ReferenceAction>,
    /// `ON UPDATE` action.
    pub on_update: Option<ReferenceAction>,
}

/// A secondary index or named constraint of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Index {
    /// `CONSTRAINT symbol`, if given.
    pub symbol: Option<String>,
    /// Index name, if given.
    pub name: Option<String>,
    /// What the index enforces.
    pub kind: IndexKind,
    /// `USING` method, if written.
    pub using: Option<IndexMethod>,
    /// Key parts in declaration order. `(a, b)` and `(b, a)` differ.
    pub columns: Vec<IndexColumn>,
    /// Target of a foreign key; `None` for every other kind.
    pub reference: Option<Reference>,
    /// Trailing index options. Not part of the index identity.
    pub options: IndexOptions,
}

impl Index {
    /// Creates an unnamed index of `kind` over the named columns.
    #[must_use]
    pub fn new<I, S>(kind: IndexKind, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbol: None,
            name: None,
            kind,
            using: None,
            columns: columns.into_iter().map(IndexColumn::new).collect(),
            reference: None,
            options: IndexOptions::default(),
        }
    }

    /// Sets the index name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the `CONSTRAINT` symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Sets the `USING` method.
    #[must_use]
    pub fn using(mut self, method: IndexMethod) -> Self {
        self.using = Some(method);
        self
    }

    /// Returns the key used to match this index across two versions of
    /// a table: its name when it has one, its structure otherwise.
    #[must_use]
    pub fn key(&self) -> IndexKey {
        match &self.name {
            Some(name) => IndexKey::Named(name.clone()),
            None => IndexKey::Structural(IndexSignature {
                kind: self.kind,
                columns: self.columns.clone(),
                using: self.using,
                reference: self.reference.clone(),
            }),
        }
    }
}

/// Structure of an unnamed index, used as its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexSignature {
    /// Index kind.
    pub kind: IndexKind,
    /// Key parts.
    pub columns: Vec<IndexColumn>,
    /// `USING` method.
    pub using: Option<IndexMethod>,
    /// Foreign key target.
    pub reference: Option<Reference>,
}

/// Identity of an index when matching `before` against `after`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexKey {
    /// Matched by explicit name.
    Named(String),
    /// Matched by structure, for indexes without a name.
    Structural(IndexSignature),
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "`{name}`"),
            Self::Structural(sig) => {
                let columns: Vec<&str> = sig.columns.iter().map(|c| c.name.as_str()).collect();
                write!(f, "{} ({})", sig.kind.as_str(), columns.join(", "))
            }
        }
    }
}
