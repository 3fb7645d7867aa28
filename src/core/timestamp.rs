//! Clip time markers.
//!
//! Accepts `SS`, `MM:SS` and `HH:MM:SS`, each with optional fractional
//! seconds (`65`, `1:05`, `1:05.5`, `0:01:05`).

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ClipError;

#[allow(clippy::expect_used)]
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:(\d+):)?(\d+):)?(\d+(?:\.\d+)?)$").expect("timestamp pattern is valid")
});

/// Parses a time marker into seconds.
///
/// # Errors
///
/// Returns [`ClipError::InvalidTimestamp`] when `text` is not one of the
/// accepted shapes.
pub fn parse_timestamp(text: &str) -> Result<f64, ClipError> {
    let invalid = || ClipError::InvalidTimestamp(text.to_string());
    let caps = TIMESTAMP.captures(text.trim()).ok_or_else(invalid)?;

    let part = |i: usize| -> Result<f64, ClipError> {
        caps.get(i)
            .map_or(Ok(0.0), |m| m.as_str().parse::<f64>().map_err(|_| invalid()))
    };

    Ok(part(1)? * 3600.0 + part(2)? * 60.0 + part(3)?)
}

/// Formats seconds as `M:SS`, or `M:SS.ss` when fractional.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = seconds % 60.0;
    if secs.fract() == 0.0 {
        format!("{minutes}:{:02}", secs as u64)
    } else {
        format!("{minutes}:{secs:05.2}")
    }
}
