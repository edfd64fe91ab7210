//! Error types for the command-line tool.

use std::path::{Path, PathBuf};

use oxide_ddl_core::{Error, Input};

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// Path of the input.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An input does not lex or parse.
    #[error("{path}:{line}:{column}: {message}")]
    Syntax {
        /// Path of the input, `-` for stdin.
        path: PathBuf,
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// What went wrong.
        message: String,
    },

    /// Both inputs of a diff were `-`.
    #[error("At most one input may be `-` (stdin)")]
    MultipleStdin,

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (writing output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Converts a core error into a located syntax error.
    ///
    /// `source_of` maps the failing input to its path and text.
    pub(crate) fn from_core<'a>(
        err: Error,
        source_of: impl Fn(Input) -> (&'a Path, &'a str),
    ) -> Self {
        let (input, span, message) = match err {
            Error::Lex { input, source } => (input, source.span(), source.to_string()),
            Error::Parse { input, source } => (input, source.span, source.message),
            Error::Io(err) => return Self::Io(err),
        };
        let (path, text) = source_of(input);
        let (line, column) = span.line_col(text);
        Self::Syntax {
            path: path.to_path_buf(),
            line,
            column,
            message,
        }
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CliError>;
