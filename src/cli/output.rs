//! Output formatting for CLI commands.
//!
//! Text output flattens a parsed command into `field: value` lines,
//! leaving out fields that carry nothing. JSON output is the serde
//! representation, pretty-printed.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::core::format_timestamp;
use crate::error::{ClipError, CommandError, Result};
use crate::grammar::{ClipCommand, Command};

/// Marker printed before each usage error.
pub const ERROR_MARKER: &str = "❌";

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Parses a format name. Anything other than `json` is text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Serializes `value` as pretty JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// [`CommandError::OutputFormat`] if serialization fails.
    pub fn to_json<T: Serialize + ?Sized>(self, value: &T) -> Result<String> {
        let mut json = serde_json::to_string_pretty(value)
            .map_err(|e| CommandError::OutputFormat(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}

/// Renders a parsed command.
///
/// # Errors
///
/// [`CommandError::OutputFormat`] if the command cannot be serialized.
pub fn format_command(command: &Command, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format.to_json(command),
        OutputFormat::Text => {
            let value = serde_json::to_value(command)
                .map_err(|e| CommandError::OutputFormat(e.to_string()))?;
            let mut out = String::new();
            let _ = writeln!(out, "command: {}", command.kind());
            if let Some(parsed) = value.get("parsed") {
                flatten(&mut out, "", parsed);
            }
            if let Command::Clip(clip) = command {
                write_segments(&mut out, clip);
            }
            Ok(out)
        }
    }
}

/// Renders usage errors one per line behind [`ERROR_MARKER`].
#[must_use]
pub fn format_errors(errors: &[String]) -> String {
    errors.iter().fold(String::new(), |mut out, err| {
        let _ = writeln!(out, "{ERROR_MARKER} {err}");
        out
    })
}

/// Renders tokens, one per line, or as a JSON array.
///
/// # Errors
///
/// [`CommandError::OutputFormat`] if JSON serialization fails.
pub fn format_tokens(tokens: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format.to_json(tokens),
        OutputFormat::Text => Ok(tokens.iter().enumerate().fold(String::new(), |mut out, (i, token)| {
            let _ = writeln!(out, "[{i}] {token}");
            out
        })),
    }
}

/// Appends resolved clip segments, or why they do not resolve.
fn write_segments(out: &mut String, clip: &ClipCommand) {
    match clip.segments() {
        Ok(segments) => {
            for (i, segment) in segments.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "segment {}: {} {} -> {}",
                    i + 1,
                    segment.url,
                    format_timestamp(segment.start),
                    format_timestamp(segment.end)
                );
            }
        }
        Err(ClipError::NoClips) => {}
        Err(err) => {
            let _ = writeln!(out, "segments: {err}");
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn flatten(out: &mut String, path: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "errors" || is_blank(child) {
                    continue;
                }
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                flatten(out, &child_path, child);
            }
        }
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(scalar).collect();
            let _ = writeln!(out, "{path}: {}", rendered.join(", "));
        }
        other => {
            let _ = writeln!(out, "{path}: {}", scalar(other));
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
