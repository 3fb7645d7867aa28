//! Flag-boundary-aware value consumption.
//!
//! Every grammar reads a flag's argument through [`consume_value`], so a
//! single quoted token and several bare words both work as one value:
//!
//! ```text
//! ["--send", "hello", "world", "--llm", "chatgpt"]  start=1 → ("hello world", 3)
//! ["--send", "hello world", "--llm"]                start=1 → ("hello world", 2)
//! ```

/// Returns `true` if `token` starts a new flag.
///
/// A lone `-` is a value, and so is anything like `-5` or `-0.5`, so that
/// negative numbers can be passed as arguments.
#[must_use]
pub fn is_flag(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('-') && chars.next().is_some_and(|second| !second.is_ascii_digit())
}

/// Collects tokens from `start` up to the next flag.
///
/// Returns the collected tokens and the count the caller's index must
/// advance by, which covers the flag itself plus its values. When nothing
/// is collected the count is 1, stepping over the flag alone.
#[must_use]
pub fn consume_values(tokens: &[String], start: usize) -> (Vec<String>, usize) {
    let values: Vec<String> = tokens
        .get(start..)
        .unwrap_or_default()
        .iter()
        .take_while(|token| !is_flag(token))
        .cloned()
        .collect();
    let consumed = values.len() + 1;
    (values, consumed)
}

/// Collects tokens from `start` up to the next flag into one
/// space-joined value.
///
/// Returns `(None, 1)` when `start` is out of range or the next token is
/// already a flag; callers report that as a missing value.
#[must_use]
pub fn consume_value(tokens: &[String], start: usize) -> (Option<String>, usize) {
    let (values, consumed) = consume_values(tokens, start);
    if values.is_empty() {
        (None, 1)
    } else {
        (Some(values.join(" ")), consumed)
    }
}
