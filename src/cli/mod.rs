//! CLI layer for flagline.
//!
//! Provides the command-line interface using clap, with commands for
//! parsing, tokenizing and showing usage for command lines.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::{ERROR_MARKER, OutputFormat, format_errors};
pub use parser::{Cli, Commands};
