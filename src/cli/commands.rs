//! CLI command implementations.
//!
//! Each subcommand returns its output as a string; `main` decides where it
//! goes and how failures are reported.

use std::fmt::Write as _;
use std::io::{self, Read};

use tracing::debug;

use crate::cli::output::{OutputFormat, format_command, format_tokens};
use crate::cli::parser::{Cli, Commands};
use crate::config::ParserConfig;
use crate::core::tokenize;
use crate::error::{CommandError, Result};
use crate::grammar::{CommandKind, parse_line};

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the line cannot be
/// read or routed, or the parsed line carries usage errors
/// ([`CommandError::Rejected`]).
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = build_config(cli.prefix.as_deref())?;

    match &cli.command {
        Commands::Parse { line, grammar } => {
            let line = match line {
                Some(line) => line.clone(),
                None => read_stdin_line()?,
            };
            cmd_parse(&line, grammar.as_deref(), &config, format)
        }
        Commands::Tokenize { line } => format_tokens(&tokenize(line), format),
        Commands::Usage { command } => cmd_usage(command, &config),
        Commands::Commands => cmd_commands(&config, format),
    }
}

fn build_config(prefix: Option<&str>) -> Result<ParserConfig> {
    let builder = ParserConfig::builder();
    let builder = match prefix {
        Some(prefix) => builder.sigil(prefix),
        None => builder.from_env(),
    };
    Ok(builder.build()?)
}

fn read_stdin_line() -> Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    let line = buf.lines().find(|line| !line.trim().is_empty()).unwrap_or_default();
    if line.is_empty() {
        return Err(CommandError::EmptyInput.into());
    }
    Ok(line.to_string())
}

fn resolve_kind(name: &str) -> Result<CommandKind> {
    CommandKind::from_name(name).ok_or_else(|| CommandError::UnknownCommand(name.to_string()).into())
}

fn cmd_parse(
    line: &str,
    grammar: Option<&str>,
    config: &ParserConfig,
    format: OutputFormat,
) -> Result<String> {
    if line.trim().is_empty() {
        return Err(CommandError::EmptyInput.into());
    }

    let parsed = match grammar {
        Some(name) => {
            let kind = resolve_kind(name)?;
            debug!(command = %kind, "grammar forced");
            kind.parse(line, &config.command_word(kind.name()))
        }
        None => parse_line(line, config).ok_or_else(|| {
            let word = line.split_whitespace().next().unwrap_or_default();
            CommandError::UnknownCommand(word.to_string())
        })?,
    };

    let parsed = parsed.into_result()?;
    format_command(&parsed, format)
}

fn cmd_usage(name: &str, config: &ParserConfig) -> Result<String> {
    let name = name.strip_prefix(config.sigil.as_str()).unwrap_or(name);
    Ok(resolve_kind(name)?.usage(config))
}

fn cmd_commands(config: &ParserConfig, format: OutputFormat) -> Result<String> {
    let words: Vec<String> = CommandKind::ALL
        .iter()
        .map(|kind| config.command_word(kind.name()))
        .collect();
    match format {
        OutputFormat::Json => format.to_json(&words),
        OutputFormat::Text => Ok(words.iter().fold(String::new(), |mut out, word| {
            let _ = writeln!(out, "{word}");
            out
        })),
    }
}
