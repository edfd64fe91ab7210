//! DDL Lexer/Tokenizer
//!
//! A hand-written lexer for the MySQL DDL subset that produces a stream of
//! tokens, each carrying its source span.

mod error;
mod span;
mod token;
mod tokenizer;

pub use error::LexError;
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;

/// Tokenizes `input` into a token vector terminated by [`TokenKind::Eof`].
///
/// # Errors
///
/// Returns the first [`LexError`] encountered.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(input).tokenize()
}
