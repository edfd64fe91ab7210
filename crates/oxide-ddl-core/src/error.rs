//! Error types for the facade.

use core::fmt;

use crate::lexer::{LexError, Span};
use crate::parser::ParseError;

/// Which schema text an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// The `before` side of a diff.
    Before,
    /// The `after` side of a diff.
    After,
    /// The single schema given to [`crate::format_schema`] or
    /// [`crate::parse_schema`].
    Schema,
}

impl Input {
    /// Returns the input's name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Schema => "schema",
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while diffing or formatting schemas.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schema text could not be tokenized.
    #[error("{input}: {source}")]
    Lex {
        /// Which input failed.
        input: Input,
        /// The underlying lexer error.
        source: LexError,
    },

    /// The schema text could not be parsed.
    #[error("{input}: {source}")]
    Parse {
        /// Which input failed.
        input: Input,
        /// The underlying parser error.
        source: ParseError,
    },

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the input that failed to lex or parse.
    #[must_use]
    pub const fn input(&self) -> Option<Input> {
        match self {
            Self::Lex { input, .. } | Self::Parse { input, .. } => Some(*input),
            Self::Io(_) => None,
        }
    }

    /// Returns the location of a lex or parse failure in its input.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Lex { source, .. } => Some(source.span()),
            Self::Parse { source, .. } => Some(source.span),
            Self::Io(_) => None,
        }
    }
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
