//! oxide-ddl CLI
//!
//! Command-line tool for diffing and formatting MySQL schemas.

use std::io;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use oxide_ddl::{Cli, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the generated SQL.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    run(&cli, io::stdin().lock(), &mut stdout)?;
    Ok(())
}
