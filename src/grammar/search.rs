//! Search command grammars (`$wolfram`, `$google`).
//!
//! ```text
//! $wolfram --query integrate x^2
//! $wolfram -q "what is pi"
//! $wolfram integrate x^2                    (legacy: whole text is the query)
//! $google --search python tutorial
//! $google -s "how to code"
//! $google python tutorial                   (legacy)
//! ```

use serde::Serialize;

use crate::core::{FlagParser, FlagSpec, FlagTable, Remainder};

/// Wolfram command name, without sigil.
pub const WOLFRAM: &str = "wolfram";

/// Google command name, without sigil.
pub const GOOGLE: &str = "google";

/// Legacy form, for usage text.
pub const LEGACY: &str = "<query>    treat the whole text as the query";

/// The single flag both search grammars know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFlag {
    /// `--query` / `--search`
    Query,
}

const WOLFRAM_FLAGS: &[FlagSpec<SearchFlag>] = &[FlagSpec {
    flag: SearchFlag::Query,
    aliases: &["--query", "-q"],
    value: Some("text"),
    help: "Search query",
}];

const GOOGLE_FLAGS: &[FlagSpec<SearchFlag>] = &[FlagSpec {
    flag: SearchFlag::Query,
    aliases: &["--search", "-s", "--query", "-q"],
    value: Some("text"),
    help: "Search query",
}];

/// Alias table for `$wolfram`.
pub static WOLFRAM_TABLE: FlagTable<SearchFlag> = FlagTable::new(WOLFRAM_FLAGS);

/// Alias table for `$google`.
pub static GOOGLE_TABLE: FlagTable<SearchFlag> = FlagTable::new(GOOGLE_FLAGS);

/// Parsed search command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchCommand {
    /// Query text.
    pub query: Option<String>,
    /// No query given: show usage instead of searching.
    pub show_usage: bool,
    /// Usage errors in encounter order.
    pub errors: Vec<String>,
}

impl SearchCommand {
    /// Returns `true` if there is something to search for.
    #[must_use]
    pub const fn has_action(&self) -> bool {
        self.query.is_some()
    }
}

fn parse_with(line: &str, prefix: &str, table: &FlagTable<SearchFlag>, expected: &'static str) -> SearchCommand {
    let mut cmd = SearchCommand::default();

    match Remainder::of(line, prefix) {
        Remainder::Empty => cmd.show_usage = true,
        Remainder::Legacy(text) => cmd.query = Some(text.to_string()),
        Remainder::Flags(tokens) => {
            let errors = FlagParser::new(&tokens, table).run(|SearchFlag::Query, args| {
                cmd.query = Some(args.require(expected)?);
                Ok(())
            });
            cmd.errors = errors;
            if !cmd.has_action() {
                cmd.show_usage = true;
            }
        }
    }

    cmd
}

/// Parses a `$wolfram` line. `prefix` is the full command word.
#[must_use]
pub fn parse_wolfram(line: &str, prefix: &str) -> SearchCommand {
    parse_with(line, prefix, &WOLFRAM_TABLE, "a search term")
}

/// Parses a `$google` line. `prefix` is the full command word.
///
/// `--search` and `--query` are interchangeable.
#[must_use]
pub fn parse_google(line: &str, prefix: &str) -> SearchCommand {
    parse_with(line, prefix, &GOOGLE_TABLE, "a query")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("$wolfram --query integrate x^2", "integrate x^2")]
    #[test_case("$wolfram -q \"what is pi\"", "what is pi")]
    #[test_case("$wolfram integrate x^2", "integrate x^2")]
    #[test_case("$wolfram   2 + 2  ", "2 + 2")]
    fn test_wolfram_query(line: &str, expected: &str) {
        let cmd = parse_wolfram(line, "$wolfram");
        assert!(cmd.errors.is_empty());
        assert_eq!(cmd.query.as_deref(), Some(expected));
        assert!(!cmd.show_usage);
    }

    #[test_case("$google --search python tutorial", "python tutorial")]
    #[test_case("$google -s 'how to code'", "how to code")]
    #[test_case("$google -q rust", "rust")]
    #[test_case("$google python tutorial", "python tutorial")]
    fn test_google_query(line: &str, expected: &str) {
        let cmd = parse_google(line, "$google");
        assert!(cmd.errors.is_empty());
        assert_eq!(cmd.query.as_deref(), Some(expected));
    }

    #[test]
    fn test_empty_shows_usage() {
        let cmd = parse_wolfram("$wolfram", "$wolfram");
        assert!(cmd.show_usage);
        assert!(cmd.errors.is_empty());
        assert!(parse_google("  $google  ", "$google").show_usage);
    }

    #[test]
    fn test_missing_query_value() {
        let cmd = parse_wolfram("$wolfram -q", "$wolfram");
        assert_eq!(cmd.errors, ["--query requires a search term"]);
        assert!(cmd.query.is_none());

        let cmd = parse_google("$google --search", "$google");
        assert_eq!(cmd.errors, ["--search requires a query"]);
    }

    #[test]
    fn test_wolfram_rejects_google_alias() {
        let cmd = parse_wolfram("$wolfram -s pi", "$wolfram");
        assert_eq!(cmd.errors, ["Unknown flag: -s", "Unknown flag: pi"]);
    }

    #[test]
    fn test_negative_number_in_query() {
        let cmd = parse_wolfram("$wolfram -q solve x = -3", "$wolfram");
        assert_eq!(cmd.query.as_deref(), Some("solve x = -3"));
    }
}
