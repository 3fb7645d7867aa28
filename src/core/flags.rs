//! Flag alias tables and the shared flag-driven parse loop.
//!
//! Each grammar declares a static [`FlagTable`] mapping literal tokens to
//! its own flag enum, then hands the tokens to a [`FlagParser`] together
//! with a handler closure. The parser owns index bookkeeping and the
//! unknown-flag policy; handlers only apply values.

use std::fmt::Write as _;
use std::str::FromStr;

use tracing::trace;

use super::consume::{consume_value, consume_values, is_flag};
use super::tokenizer::tokenize;
use crate::error::UsageError;

/// One entry of a grammar's alias table.
#[derive(Debug)]
pub struct FlagSpec<F> {
    /// Semantic identity of the flag.
    pub flag: F,
    /// Literal tokens selecting this flag, long form first.
    pub aliases: &'static [&'static str],
    /// Value placeholder for usage text; `None` for switches.
    pub value: Option<&'static str>,
    /// One-line description for usage text.
    pub help: &'static str,
}

impl<F> FlagSpec<F> {
    /// Returns the long form, used when naming the flag in errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.aliases.first().copied().unwrap_or_default()
    }

    fn signature(&self) -> String {
        let mut sig = self.aliases.join(", ");
        if let Some(value) = self.value {
            let _ = write!(sig, " <{value}>");
        }
        sig
    }
}

/// Static, read-only alias table for one grammar.
#[derive(Debug)]
pub struct FlagTable<F: 'static> {
    specs: &'static [FlagSpec<F>],
}

impl<F: 'static> FlagTable<F> {
    /// Wraps a list of flag specs.
    #[must_use]
    pub const fn new(specs: &'static [FlagSpec<F>]) -> Self {
        Self { specs }
    }

    /// Finds the entry whose aliases contain `token` (exact match).
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<&'static FlagSpec<F>> {
        self.specs.iter().find(|spec| spec.aliases.contains(&token))
    }

    /// Renders the table as aligned usage lines.
    #[must_use]
    pub fn usage(&self) -> String {
        let signatures: Vec<String> = self.specs.iter().map(FlagSpec::signature).collect();
        let width = signatures.iter().map(String::len).max().unwrap_or(0);
        let mut out = String::new();
        for (spec, sig) in self.specs.iter().zip(&signatures) {
            let _ = writeln!(out, "  {sig:<width$}  {}", spec.help);
        }
        out
    }
}

/// What remains of a line once its command word is stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remainder<'a> {
    /// Nothing after the command word.
    Empty,
    /// Text not starting with `-`: the grammar's flag-free legacy form.
    Legacy(&'a str),
    /// Tokenized flag syntax.
    Flags(Vec<String>),
}

impl<'a> Remainder<'a> {
    /// Strips `prefix` and surrounding whitespace from `line` and
    /// classifies the rest.
    #[must_use]
    pub fn of(line: &'a str, prefix: &str) -> Self {
        let text = line.trim();
        let text = text.strip_prefix(prefix).unwrap_or(text).trim();
        if text.is_empty() {
            Self::Empty
        } else if text.starts_with('-') {
            Self::Flags(tokenize(text))
        } else {
            Self::Legacy(text)
        }
    }
}

/// Argument access for the flag currently being handled.
///
/// Each read advances past the tokens it consumed, so handlers never
/// touch the loop index directly.
#[derive(Debug)]
pub struct FlagArgs<'t> {
    tokens: &'t [String],
    flag: &'static str,
    at: usize,
    advance: usize,
}

impl FlagArgs<'_> {
    /// Long form of the flag being handled.
    #[must_use]
    pub const fn flag(&self) -> &'static str {
        self.flag
    }

    /// Reads the next value. Consecutive calls chain: the second value
    /// starts where the first ended.
    pub fn value(&mut self) -> Option<String> {
        let (value, consumed) = consume_value(self.tokens, self.at + self.advance);
        self.advance += consumed - 1;
        value
    }

    /// Reads exactly one token, unless it is a flag.
    pub fn word(&mut self) -> Option<String> {
        let token = self
            .tokens
            .get(self.at + self.advance)
            .filter(|token| !is_flag(token))?;
        self.advance += 1;
        Some(token.clone())
    }

    /// Reads every token up to the next flag as separate values.
    pub fn values(&mut self) -> Vec<String> {
        let (values, consumed) = consume_values(self.tokens, self.at + self.advance);
        self.advance += consumed - 1;
        values
    }

    /// Reads the next value, failing with a missing-value error.
    ///
    /// # Errors
    ///
    /// [`UsageError::MissingValue`] when no value follows the flag.
    pub fn require(&mut self, expected: &'static str) -> Result<String, UsageError> {
        let flag = self.flag;
        self.value()
            .ok_or(UsageError::MissingValue { flag, expected })
    }

    /// Reads and parses a numeric value. The tokens are consumed even when
    /// parsing fails.
    ///
    /// # Errors
    ///
    /// [`UsageError::MissingValue`] or [`UsageError::InvalidNumber`].
    pub fn require_number<T: FromStr>(&mut self, expected: &'static str) -> Result<T, UsageError> {
        let flag = self.flag;
        self.require(expected)?
            .trim()
            .parse()
            .map_err(|_| UsageError::InvalidNumber { flag })
    }

    /// Reads a user-facing 1-based index and returns it 0-based.
    ///
    /// # Errors
    ///
    /// As [`require_number`](Self::require_number), plus
    /// [`UsageError::InvalidIndex`] for `0`.
    pub fn require_index(&mut self, expected: &'static str) -> Result<usize, UsageError> {
        let flag = self.flag;
        let index: usize = self.require_number(expected)?;
        index
            .checked_sub(1)
            .ok_or(UsageError::InvalidIndex { flag })
    }
}

/// Drives a token list through an alias table.
#[derive(Debug)]
pub struct FlagParser<'t, F: 'static> {
    tokens: &'t [String],
    table: &'t FlagTable<F>,
}

impl<'t, F: Copy + 'static> FlagParser<'t, F> {
    /// Creates a parser over `tokens`.
    #[must_use]
    pub const fn new(tokens: &'t [String], table: &'t FlagTable<F>) -> Self {
        Self { tokens, table }
    }

    /// Runs the loop, calling `handle` for every recognized flag.
    ///
    /// Unknown tokens and handler failures are collected rather than
    /// stopping the loop. Every iteration advances by at least one token.
    /// Returns the error messages in encounter order.
    pub fn run<H>(self, mut handle: H) -> Vec<String>
    where
        H: FnMut(F, &mut FlagArgs<'t>) -> Result<(), UsageError>,
    {
        let mut errors = Vec::new();
        let mut index = 0;

        while let Some(token) = self.tokens.get(index) {
            let Some(spec) = self.table.lookup(token) else {
                trace!(%token, index, "unknown flag");
                errors.push(UsageError::UnknownFlag(token.clone()).to_string());
                index += 1;
                continue;
            };

            let mut args = FlagArgs {
                tokens: self.tokens,
                flag: spec.name(),
                at: index,
                advance: 1,
            };
            if let Err(err) = handle(spec.flag, &mut args) {
                trace!(flag = spec.name(), %err, "flag rejected");
                errors.push(err.to_string());
            }
            index += args.advance;
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Demo {
        Name,
        Verbose,
        Count,
        Pair,
    }

    const DEMO_FLAGS: &[FlagSpec<Demo>] = &[
        FlagSpec {
            flag: Demo::Name,
            aliases: &["--name", "-n"],
            value: Some("text"),
            help: "Set the name",
        },
        FlagSpec {
            flag: Demo::Verbose,
            aliases: &["--verbose"],
            value: None,
            help: "Be loud",
        },
        FlagSpec {
            flag: Demo::Count,
            aliases: &["--count", "-c"],
            value: Some("n"),
            help: "How many",
        },
        FlagSpec {
            flag: Demo::Pair,
            aliases: &["--pair"],
            value: Some("key value"),
            help: "Chained values",
        },
    ];

    static DEMO: FlagTable<Demo> = FlagTable::new(DEMO_FLAGS);

    #[derive(Debug, Default)]
    struct Seen {
        name: Option<String>,
        verbose: bool,
        count: Option<u32>,
        pair: Option<(String, String)>,
    }

    fn run(line: &str) -> (Seen, Vec<String>) {
        let tokens = tokenize(line);
        let mut seen = Seen::default();
        let errors = FlagParser::new(&tokens, &DEMO).run(|flag, args| {
            match flag {
                Demo::Name => seen.name = Some(args.require("a name")?),
                Demo::Verbose => seen.verbose = true,
                Demo::Count => seen.count = Some(args.require_number("a count")?),
                Demo::Pair => {
                    let key = args.require("a key")?;
                    let value = args.require("a value")?;
                    seen.pair = Some((key, value));
                }
            }
            Ok(())
        });
        (seen, errors)
    }

    #[test]
    fn test_lookup_by_any_alias() {
        assert_eq!(DEMO.lookup("-n").map(|s| s.flag), Some(Demo::Name));
        assert_eq!(DEMO.lookup("--name").map(|s| s.flag), Some(Demo::Name));
        assert!(DEMO.lookup("--nam").is_none());
        assert_eq!(DEMO.lookup("-c").map(FlagSpec::name), Some("--count"));
    }

    #[test]
    fn test_usage_lists_every_flag() {
        let usage = DEMO.usage();
        assert_eq!(usage.lines().count(), 4);
        assert!(usage.contains("--name, -n <text>"));
        assert!(usage.contains("Be loud"));
    }

    #[test]
    fn test_remainder_classification() {
        assert_eq!(Remainder::of("  $cmd  ", "$cmd"), Remainder::Empty);
        assert_eq!(Remainder::of("", "$cmd"), Remainder::Empty);
        assert_eq!(Remainder::of("$cmd hello there", "$cmd"), Remainder::Legacy("hello there"));
        assert_eq!(
            Remainder::of("$cmd -n 'a b'", "$cmd"),
            Remainder::Flags(vec!["-n".to_string(), "a b".to_string()])
        );
    }

    #[test]
    fn test_run_applies_values() {
        let (seen, errors) = run("--verbose -n two words -c 3");
        assert!(errors.is_empty());
        assert!(seen.verbose);
        assert_eq!(seen.name.as_deref(), Some("two words"));
        assert_eq!(seen.count, Some(3));
    }

    #[test]
    fn test_run_collects_every_error() {
        let (seen, errors) = run("--bogus -c many --verbose -n");
        assert_eq!(
            errors,
            [
                "Unknown flag: --bogus",
                "--count requires a number",
                "--name requires a name",
            ]
        );
        assert!(seen.verbose);
        assert!(seen.count.is_none());
    }

    #[test]
    fn test_chained_values_advance_past_both() {
        let (seen, errors) = run("--pair alpha --verbose");
        // `alpha` is the key; the value read stops at --verbose.
        assert_eq!(errors, ["--pair requires a value"]);
        assert!(seen.verbose);

        let tokens = tokenize("--pair alpha");
        let mut args = FlagArgs {
            tokens: &tokens,
            flag: "--pair",
            at: 0,
            advance: 1,
        };
        assert_eq!(args.value().as_deref(), Some("alpha"));
        assert_eq!(args.advance, 2);
        assert_eq!(args.value(), None);
        assert_eq!(args.advance, 2);
    }

    #[test]
    fn test_word_reads_one_token() {
        let tokens = tokenize("-p set be brief --verbose");
        let mut args = FlagArgs {
            tokens: &tokens,
            flag: "-p",
            at: 0,
            advance: 1,
        };
        assert_eq!(args.word().as_deref(), Some("set"));
        assert_eq!(args.value().as_deref(), Some("be brief"));
        assert_eq!(args.advance, 4);
        assert_eq!(args.word(), None);
    }

    #[test]
    fn test_require_index_is_zero_based() {
        let tokens = tokenize("--clip 2");
        let mut args = FlagArgs {
            tokens: &tokens,
            flag: "--clip",
            at: 0,
            advance: 1,
        };
        assert_eq!(args.require_index("an index"), Ok(1));

        let tokens = tokenize("--clip 0");
        let mut args = FlagArgs {
            tokens: &tokens,
            flag: "--clip",
            at: 0,
            advance: 1,
        };
        assert_eq!(
            args.require_index("an index"),
            Err(UsageError::InvalidIndex { flag: "--clip" })
        );
    }
}
