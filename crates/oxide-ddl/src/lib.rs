//! # oxide-ddl
//!
//! Command-line front end for [`oxide_ddl_core`]: reads schema files (or
//! stdin), prints the migration between them, or formats a schema.
//!
//! The binary is a thin wrapper around [`run`], which takes its standard
//! streams as parameters.

pub mod cli;
pub mod error;

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use oxide_ddl_core::{DiffOptions, Input};
use tracing::{debug, info};

pub use cli::{Cli, Command, OutputFormat};
pub use error::{CliError, Result};

/// Runs the command described by `cli`.
///
/// Inputs named `-` are read from `stdin`. Output goes to `stdout` unless
/// the command names an output file. Non-empty output ends with a newline.
///
/// # Errors
///
/// Returns [`CliError::Syntax`] with the file, line and column of the first
/// error for inputs that do not parse, and I/O errors for unreadable inputs
/// or an unwritable output.
pub fn run<R: Read, W: Write>(cli: &Cli, mut stdin: R, stdout: &mut W) -> Result<()> {
    match &cli.command {
        Command::Diff {
            before,
            after,
            output,
            txn,
            format,
        } => {
            if cli::is_stdin(before) && cli::is_stdin(after) {
                return Err(CliError::MultipleStdin);
            }
            let before_text = read_input(before, &mut stdin)?;
            let after_text = read_input(after, &mut stdin)?;
            let source_of = |input: Input| match input {
                Input::Before | Input::Schema => (before.as_path(), before_text.as_str()),
                Input::After => (after.as_path(), after_text.as_str()),
            };

            let mut rendered = Vec::new();
            match format {
                OutputFormat::Sql => {
                    let options = DiffOptions::new().with_transaction(*txn);
                    oxide_ddl_core::diff_strings(&mut rendered, &before_text, &after_text, &options)
                        .map_err(|err| CliError::from_core(err, source_of))?;
                }
                OutputFormat::Json => {
                    let changes = oxide_ddl_core::diff(&before_text, &after_text)
                        .map_err(|err| CliError::from_core(err, source_of))?;
                    debug!(changes = changes.len(), "serializing changes");
                    serde_json::to_writer_pretty(&mut rendered, &changes)?;
                }
            }
            if rendered.is_empty() {
                info!("schemas are equivalent");
            }
            emit(&rendered, output.as_deref(), stdout)
        }

        Command::Format { schema, output } => {
            let text = read_input(schema, &mut stdin)?;
            let mut rendered = Vec::new();
            oxide_ddl_core::format_schema(&mut rendered, &text)
                .map_err(|err| CliError::from_core(err, |_| (schema.as_path(), text.as_str())))?;
            emit(&rendered, output.as_deref(), stdout)
        }
    }
}

fn read_input<R: Read>(path: &Path, stdin: &mut R) -> Result<String> {
    let mut text = String::new();
    let read = if cli::is_stdin(path) {
        stdin.read_to_string(&mut text).map(|_| ())
    } else {
        File::open(path).and_then(|mut file| file.read_to_string(&mut text).map(|_| ()))
    };
    read.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read schema");
    Ok(text)
}

/// Writes `rendered` plus a trailing newline to the output file or to
/// `stdout`. Empty output writes nothing, but still creates the file.
fn emit<W: Write>(rendered: &[u8], output: Option<&Path>, stdout: &mut W) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = BufWriter::new(File::create(path)?);
            write_with_newline(&mut file, rendered)?;
            file.flush()?;
            debug!(path = %path.display(), "wrote output");
        }
        None => write_with_newline(stdout, rendered)?,
    }
    Ok(())
}

fn write_with_newline<W: Write + ?Sized>(out: &mut W, rendered: &[u8]) -> io::Result<()> {
    if rendered.is_empty() {
        return Ok(());
    }
    out.write_all(rendered)?;
    out.write_all(b"\n")
}
