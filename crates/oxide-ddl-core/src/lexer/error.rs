//! Lexer error types.

use super::Span;

/// An error raised while tokenizing schema text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A character that cannot start any token.
    #[error("unexpected character {ch:?} at offset {}", span.start)]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Location of the character.
        span: Span,
    },

    /// A string literal without its closing quote.
    #[error("unterminated string literal starting at offset {}", span.start)]
    UnterminatedString {
        /// From the opening quote to the end of input.
        span: Span,
    },

    /// A `b'...'` literal with a digit other than 0 or 1, or an `x'...'`
    /// literal with a non-hex digit or an odd number of digits.
    #[error("invalid bit or hex literal at offset {}", span.start)]
    InvalidLiteral {
        /// The whole literal, prefix and quotes included.
        span: Span,
    },

    /// A backtick-quoted identifier without its closing backtick.
    #[error("unterminated quoted identifier starting at offset {}", span.start)]
    UnterminatedIdentifier {
        /// From the opening backtick to the end of input.
        span: Span,
    },

    /// A `/* ... */` comment that never closes.
    #[error("unterminated block comment starting at offset {}", span.start)]
    UnterminatedComment {
        /// From the opening `/*` to the end of input.
        span: Span,
    },
}

impl LexError {
    /// Returns the location of the error.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnexpectedCharacter { span, .. }
            | Self::UnterminatedString { span }
            | Self::InvalidLiteral { span }
            | Self::UnterminatedIdentifier { span }
            | Self::UnterminatedComment { span } => *span,
        }
    }
}
