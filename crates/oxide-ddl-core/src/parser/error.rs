//! Parser error types.

use crate::lexer::{Span, TokenKind};
use crate::schema::SchemaError;

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {}", span.start)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// Description of the token actually found.
    pub found: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &TokenKind, span: Span) -> Self {
        if matches!(found, TokenKind::Eof) {
            return Self::unexpected_eof(expected, span);
        }
        let expected: String = expected.into();
        Self {
            message: format!("unexpected token: expected {expected}, found {found}"),
            span,
            expected: Some(expected),
            found: Some(found.to_string()),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("unexpected end of input: expected {expected}"),
            span,
            expected: Some(expected),
            found: Some(TokenKind::Eof.to_string()),
        }
    }

    /// Wraps a model invariant violation found at `span`.
    #[must_use]
    pub fn invalid_schema(err: &SchemaError, span: Span) -> Self {
        Self::new(err.to_string(), span)
    }
}
