//! Entry points tying the pipeline together.
//!
//! text -> lexer -> parser -> schema (x2) -> diff -> dialect -> output.

use std::io::Write;

use tracing::debug;

use crate::dialect::{Dialect, MysqlDialect, render_changes};
use crate::diff::{Change, diff_schemas};
use crate::error::{Error, Input, Result};
use crate::lexer::tokenize;
use crate::parser::Parser;
use crate::schema::Schema;

/// Options for [`diff_strings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Wrap a non-empty diff in `BEGIN; ... COMMIT;` with foreign key
    /// checks disabled.
    pub transaction: bool,
}

impl DiffOptions {
    /// Creates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self { transaction: false }
    }

    /// Sets whether the output is wrapped in a transaction.
    #[must_use]
    pub const fn with_transaction(mut self, transaction: bool) -> Self {
        self.transaction = transaction;
        self
    }
}

/// Parses one schema text.
///
/// # Errors
///
/// Returns [`Error::Lex`] or [`Error::Parse`] tagged with [`Input::Schema`].
pub fn parse_schema(text: &str) -> Result<Schema> {
    parse_input(text, Input::Schema)
}

fn parse_input(text: &str, input: Input) -> Result<Schema> {
    let tokens = tokenize(text).map_err(|source| Error::Lex { input, source })?;
    debug!(%input, tokens = tokens.len(), "tokenized schema");
    Parser::new(tokens)
        .parse_schema()
        .map_err(|source| Error::Parse { input, source })
}

/// Parses both schemas and returns the changes from `before` to `after`.
///
/// # Errors
///
/// Fails if either input does not lex or parse. Nothing is diffed unless
/// both sides parse.
pub fn diff(before: &str, after: &str) -> Result<Vec<Change>> {
    let before = parse_input(before, Input::Before)?;
    let after = parse_input(after, Input::After)?;
    Ok(diff_schemas(&before, &after))
}

/// Writes the statements migrating `before` into `after` to `out`.
///
/// Statements end with `;` and are separated by a newline. Equivalent
/// schemas write nothing at all.
///
/// # Errors
///
/// Returns a lex or parse error for either input, or an I/O error from
/// `out`. Nothing is written when an input fails to parse.
pub fn diff_strings<W: Write + ?Sized>(
    out: &mut W,
    before: &str,
    after: &str,
    options: &DiffOptions,
) -> Result<()> {
    let changes = diff(before, after)?;
    let sql = render_changes(&MysqlDialect::new(), &changes);
    if sql.is_empty() {
        return Ok(());
    }

    if options.transaction {
        write!(
            out,
            "BEGIN;\n\nSET FOREIGN_KEY_CHECKS = 0;\n\n{sql}\n\nSET FOREIGN_KEY_CHECKS = 1;\n\nCOMMIT;"
        )?;
    } else {
        out.write_all(sql.as_bytes())?;
    }
    Ok(())
}

/// Writes every table of `text` as a normalized `CREATE TABLE` statement,
/// separated by a blank line.
///
/// # Errors
///
/// Returns a lex or parse error for the input, or an I/O error from `out`.
pub fn format_schema<W: Write + ?Sized>(out: &mut W, text: &str) -> Result<()> {
    let schema = parse_input(text, Input::Schema)?;
    let dialect = MysqlDialect::new();
    let tables: Vec<String> = schema
        .tables()
        .map(|table| format!("{};", dialect.create_table(table)))
        .collect();
    out.write_all(tables.join("\n\n").as_bytes())?;
    Ok(())
}
