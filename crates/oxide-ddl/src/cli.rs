//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

/// Path that stands for standard input.
pub const STDIN: &str = "-";

/// Computes the MySQL statements that migrate one schema into another.
#[derive(Debug, Parser)]
#[command(name = "oxide-ddl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the statements turning BEFORE into AFTER.
    Diff {
        /// Current schema (`-` for stdin).
        before: PathBuf,

        /// Desired schema (`-` for stdin).
        after: PathBuf,

        /// Write to this file instead of stdout.
        #[arg(short, long, env = "OXIDE_DDL_OUTPUT")]
        output: Option<PathBuf>,

        /// Wrap the statements in a transaction with foreign key checks off.
        #[arg(short, long, env = "OXIDE_DDL_TXN")]
        txn: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Sql)]
        format: OutputFormat,
    },

    /// Print a schema in normalized form.
    Format {
        /// Schema to format (`-` for stdin).
        schema: PathBuf,

        /// Write to this file instead of stdout.
        #[arg(short, long, env = "OXIDE_DDL_OUTPUT")]
        output: Option<PathBuf>,
    },
}

/// How `diff` prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Executable SQL statements.
    #[default]
    Sql,
    /// The change list as JSON.
    Json,
}

/// Returns true if `path` means standard input.
#[must_use]
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_diff() {
        let cli = Cli::parse_from(["oxide-ddl", "-v", "diff", "a.sql", "b.sql", "--txn"]);
        assert!(cli.verbose);
        match cli.command {
            Command::Diff {
                before,
                after,
                output,
                txn,
                format,
            } => {
                assert_eq!(before, PathBuf::from("a.sql"));
                assert_eq!(after, PathBuf::from("b.sql"));
                assert_eq!(output, None);
                assert!(txn);
                assert_eq!(format, OutputFormat::Sql);
            }
            Command::Format { .. } => panic!("expected diff"),
        }
    }

    #[test]
    fn test_parse_format_with_output() {
        let cli = Cli::parse_from(["oxide-ddl", "format", "-", "-o", "out.sql", "--verbose"]);
        assert!(cli.verbose);
        match cli.command {
            Command::Format { schema, output } => {
                assert!(is_stdin(&schema));
                assert_eq!(output, Some(PathBuf::from("out.sql")));
            }
            Command::Diff { .. } => panic!("expected format"),
        }
    }

    #[test]
    fn test_json_format() {
        let cli = Cli::parse_from(["oxide-ddl", "diff", "a", "b", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Command::Diff {
                format: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        assert!(Cli::try_parse_from(["oxide-ddl", "diff", "a.sql"]).is_err());
    }
}
