//! Token types for the DDL lexer.

use core::fmt;

use super::Span;

macro_rules! keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        /// MySQL keywords recognized by the lexer.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )*
        }

        impl Keyword {
            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the keyword as an upper-case string.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    // Statements
    Create => "CREATE",
    Table => "TABLE",
    Temporary => "TEMPORARY",
    If => "IF",
    Exists => "EXISTS",
    Like => "LIKE",
    As => "AS",
    Select => "SELECT",

    // Column attributes
    Not => "NOT",
    Null => "NULL",
    Default => "DEFAULT",
    AutoIncrement => "AUTO_INCREMENT",
    Unsigned => "UNSIGNED",
    Zerofill => "ZEROFILL",
    Character => "CHARACTER",
    Charset => "CHARSET",
    Collate => "COLLATE",
    Comment => "COMMENT",
    On => "ON",
    Update => "UPDATE",
    True => "TRUE",
    False => "FALSE",

    // Keys and constraints
    Primary => "PRIMARY",
    Key => "KEY",
    Index => "INDEX",
    Unique => "UNIQUE",
    Fulltext => "FULLTEXT",
    Spatial => "SPATIAL",
    Constraint => "CONSTRAINT",
    Foreign => "FOREIGN",
    References => "REFERENCES",
    Check => "CHECK",
    Using => "USING",
    Asc => "ASC",
    Desc => "DESC",
    Delete => "DELETE",
    Cascade => "CASCADE",
    Restrict => "RESTRICT",
    No => "NO",
    Action => "ACTION",

    // Data types
    Bit => "BIT",
    Tinyint => "TINYINT",
    Smallint => "SMALLINT",
    Mediumint => "MEDIUMINT",
    Int => "INT",
    Integer => "INTEGER",
    Bigint => "BIGINT",
    Real => "REAL",
    Double => "DOUBLE",
    Precision => "PRECISION",
    Float => "FLOAT",
    Decimal => "DECIMAL",
    Dec => "DEC",
    Numeric => "NUMERIC",
    Date => "DATE",
    Time => "TIME",
    Timestamp => "TIMESTAMP",
    Datetime => "DATETIME",
    Year => "YEAR",
    Char => "CHAR",
    Varchar => "VARCHAR",
    Binary => "BINARY",
    Varbinary => "VARBINARY",
    Tinyblob => "TINYBLOB",
    Blob => "BLOB",
    Mediumblob => "MEDIUMBLOB",
    Longblob => "LONGBLOB",
    Tinytext => "TINYTEXT",
    Text => "TEXT",
    Mediumtext => "MEDIUMTEXT",
    Longtext => "LONGTEXT",
    Enum => "ENUM",
    Set => "SET",
    Bool => "BOOL",
    Boolean => "BOOLEAN",
    Json => "JSON",
    Geometry => "GEOMETRY",
    Point => "POINT",
}

impl Keyword {
    /// Returns true if the keyword cannot be used as a bare identifier.
    ///
    /// Non-reserved keywords (`DATE`, `COMMENT`, `TEXT`, ...) are valid
    /// column or table names when written without backticks.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Create
                | Self::Table
                | Self::If
                | Self::Exists
                | Self::Like
                | Self::As
                | Self::Select
                | Self::Not
                | Self::Null
                | Self::Default
                | Self::Character
                | Self::Collate
                | Self::On
                | Self::Update
                | Self::True
                | Self::False
                | Self::Primary
                | Self::Key
                | Self::Index
                | Self::Unique
                | Self::Fulltext
                | Self::Spatial
                | Self::Constraint
                | Self::Foreign
                | Self::References
                | Self::Check
                | Self::Using
                | Self::Asc
                | Self::Desc
                | Self::Delete
                | Self::Cascade
                | Self::Restrict
                | Self::Set
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal, kept as written (e.g. `42`, `0.50`, `0x1F`).
    Number(String),
    /// String literal with quotes removed and escapes resolved.
    String(String),
    /// Bit-value literal `b'0101'`, digits only.
    BitString(String),
    /// Hexadecimal literal `x'1F'`, digits only, upper-cased.
    HexString(String),

    // Identifiers and keywords
    /// Bare or backtick-quoted identifier.
    Identifier(String),
    /// SQL keyword.
    Keyword(Keyword),

    // Operators
    /// `=`
    Eq,
    /// `!=` or `<>`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `~`
    Tilde,

    // Delimiters
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `?`
    Question,
    /// `@`
    At,

    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::String(s) => write!(f, "string '{s}'"),
            Self::BitString(bits) => write!(f, "bit string b'{bits}'"),
            Self::HexString(hex) => write!(f, "hex string x'{hex}'"),
            Self::Identifier(name) => write!(f, "identifier `{name}`"),
            Self::Keyword(kw) => write!(f, "keyword {kw}"),
            Self::Eq => f.write_str("'='"),
            Self::NotEq => f.write_str("'<>'"),
            Self::Lt => f.write_str("'<'"),
            Self::LtEq => f.write_str("'<='"),
            Self::Gt => f.write_str("'>'"),
            Self::GtEq => f.write_str("'>='"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::Percent => f.write_str("'%'"),
            Self::Bang => f.write_str("'!'"),
            Self::Ampersand => f.write_str("'&'"),
            Self::Pipe => f.write_str("'|'"),
            Self::Caret => f.write_str("'^'"),
            Self::Tilde => f.write_str("'~'"),
            Self::LeftParen => f.write_str("'('"),
            Self::RightParen => f.write_str("')'"),
            Self::Comma => f.write_str("','"),
            Self::Semicolon => f.write_str("';'"),
            Self::Dot => f.write_str("'.'"),
            Self::Colon => f.write_str("':'"),
            Self::Question => f.write_str("'?'"),
            Self::At => f.write_str("'@'"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its location and raw text in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
    /// The source text the token was scanned from, quotes included.
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span, text: &'a str) -> Self {
        Self { kind, span, text }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns the identifier this token spells, if any.
    ///
    /// Quoted and bare identifiers qualify, and so do non-reserved
    /// keywords, which keep the spelling of the source.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            TokenKind::Keyword(kw) if !kw.is_reserved() => Some(self.text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("CREATE"), Some(Keyword::Create));
        assert_eq!(Keyword::from_str("create"), Some(Keyword::Create));
        assert_eq!(Keyword::from_str("Auto_Increment"), Some(Keyword::AutoIncrement));
        assert_eq!(Keyword::from_str("not_a_keyword"), None);
    }

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::Varchar.as_str(), "VARCHAR");
        assert_eq!(Keyword::AutoIncrement.to_string(), "AUTO_INCREMENT");
    }

    #[test]
    fn test_non_reserved_keyword_is_identifier() {
        let token = Token::new(TokenKind::Keyword(Keyword::Date), Span::new(0, 4), "date");
        assert_eq!(token.as_identifier(), Some("date"));

        let token = Token::new(TokenKind::Keyword(Keyword::Key), Span::new(0, 3), "key");
        assert_eq!(token.as_identifier(), None);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Comma.to_string(), "','");
        assert_eq!(
            TokenKind::Identifier(String::from("id")).to_string(),
            "identifier `id`"
        );
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }
}
