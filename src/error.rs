//! Error types for flagline.
//!
//! Malformed user input is never an `Err`: grammars record it as
//! [`UsageError`] messages on the command object they return. The
//! [`Error`] hierarchy covers everything around parsing (configuration
//! and the CLI layer). [`ClipError`] stands alone: the CLI renders it next
//! to the parsed clip rather than failing the command.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// CLI command failure.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Invalid parser configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A problem found in one command line.
///
/// The `Display` output of each variant is the exact text surfaced to
/// users, so wording changes here are user-visible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// A recognized flag appeared without its required value.
    #[error("{flag} requires {expected}")]
    MissingValue {
        /// Long form of the flag.
        flag: &'static str,
        /// Description of the expected value.
        expected: &'static str,
    },

    /// Token did not match any alias in the grammar's table.
    #[error("Unknown flag: {0}")]
    UnknownFlag(String),

    /// Positional token left over after a legacy form was read.
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    /// Value could not be parsed as a number.
    #[error("{flag} requires a number")]
    InvalidNumber {
        /// Long form of the flag.
        flag: &'static str,
    },

    /// A 1-based index was zero.
    #[error("{flag} index must be 1 or greater")]
    InvalidIndex {
        /// Long form of the flag.
        flag: &'static str,
    },

    /// Value was not one of the accepted literals.
    #[error("{flag} requires {expected}, got '{value}'")]
    InvalidChoice {
        /// Long form of the flag.
        flag: &'static str,
        /// Description of the accepted literals.
        expected: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Sub-action keyword was not recognized.
    #[error("Invalid {subject} action: {value}")]
    InvalidAction {
        /// What the action applies to (`prompt`, `db`).
        subject: &'static str,
        /// The rejected keyword.
        value: String,
    },

    /// Legacy reminder form did not start with a number.
    #[error("Invalid time format")]
    InvalidTimeFormat,

    /// Flags were given but none of them selects an action.
    #[error("No action specified")]
    NoAction,
}

/// CLI-level errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The line did not start with a known command word.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// No input line was supplied.
    #[error("no input line provided")]
    EmptyInput,

    /// The line parsed, but carries usage errors.
    #[error("{}", errors.join("; "))]
    Rejected {
        /// Error messages in encounter order.
        errors: Vec<String>,
    },

    /// Output serialization failed.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Sigil was empty.
    #[error("command prefix must not be empty")]
    EmptyPrefix,

    /// Sigil contained whitespace or would be read as a flag.
    #[error("invalid command prefix '{0}': must not contain whitespace or start with '-'")]
    InvalidPrefix(String),
}

/// Errors resolving clip locations and time markers into segments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipError {
    /// No location was given.
    #[error("no clip URL specified")]
    NoClips,

    /// A location has no matching marker at its position.
    #[error("clip {clip} is missing its {marker} time")]
    MissingMarker {
        /// 1-based clip number.
        clip: usize,
        /// `start` or `end`.
        marker: &'static str,
    },

    /// More markers than locations.
    #[error("{count} {marker} time(s) have no matching URL")]
    UnpairedMarkers {
        /// Number of surplus markers.
        count: usize,
        /// `start` or `end`.
        marker: &'static str,
    },

    /// Marker text is not `SS`, `MM:SS` or `HH:MM:SS`.
    #[error("invalid timestamp '{0}' (expected SS, MM:SS or HH:MM:SS)")]
    InvalidTimestamp(String),

    /// End marker does not come after the start marker.
    #[error("clip {clip} ends before it starts")]
    EmptyRange {
        /// 1-based clip number.
        clip: usize,
    },
}
