//! flagline binary entry point.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use flagline::cli::{Cli, execute, format_errors};
use flagline::{CommandError, Error};
use tracing::Level;

/// Exit status for a line that parsed but carries usage errors.
const EXIT_REJECTED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match execute(&cli).context("flagline failed") {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Some(Error::Command(CommandError::Rejected { errors })) = err.downcast_ref::<Error>() {
                eprint!("{}", format_errors(errors));
                return ExitCode::from(EXIT_REJECTED);
            }
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
