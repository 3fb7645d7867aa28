//! Scheduled-reminder grammar (`$remindMeIn`).
//!
//! ```text
//! $remindMeIn --time 10 --message Take a break
//! $remindMeIn -t 5 -m "Check the oven"
//! $remindMeIn 10 Take a break               (legacy: minutes then message)
//! ```

use serde::Serialize;

use crate::core::{FlagArgs, FlagParser, FlagSpec, FlagTable, Remainder};
use crate::error::UsageError;

/// Command name, without sigil.
pub const NAME: &str = "remindMeIn";

/// Legacy form, for usage text.
pub const LEGACY: &str = "<minutes> [message...]";

/// Delay used when none is given.
pub const DEFAULT_MINUTES: f64 = 5.0;

/// Flag identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderFlag {
    /// `--time`
    Time,
    /// `--message`
    Message,
}

const REMINDER_FLAGS: &[FlagSpec<ReminderFlag>] = &[
    FlagSpec {
        flag: ReminderFlag::Time,
        aliases: &["--time", "-t"],
        value: Some("minutes"),
        help: "Delay in minutes (default 5)",
    },
    FlagSpec {
        flag: ReminderFlag::Message,
        aliases: &["--message", "-m"],
        value: Some("text"),
        help: "Reminder message",
    },
];

/// Alias table for the reminder grammar.
pub static FLAGS: FlagTable<ReminderFlag> = FlagTable::new(REMINDER_FLAGS);

/// Parsed `$remindMeIn` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderCommand {
    /// Delay in minutes.
    pub minutes: f64,
    /// Optional reminder text.
    pub message: Option<String>,
    /// Usage errors in encounter order.
    pub errors: Vec<String>,
}

impl Default for ReminderCommand {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_MINUTES,
            message: None,
            errors: Vec::new(),
        }
    }
}

impl ReminderCommand {
    fn apply(&mut self, flag: ReminderFlag, args: &mut FlagArgs<'_>) -> Result<(), UsageError> {
        match flag {
            ReminderFlag::Time => {
                // Only the first word counts: `-t 10 minutes` is 10.
                let value = args.require("a value")?;
                let first = value.split_whitespace().next().unwrap_or_default();
                self.minutes = first.parse::<f64>().map_err(|_| UsageError::InvalidNumber {
                    flag: args.flag(),
                })?;
            }
            ReminderFlag::Message => self.message = Some(args.require("text")?),
        }
        Ok(())
    }
}

/// Parses a `$remindMeIn` line. `prefix` is the full command word.
///
/// Empty input yields the default five-minute reminder with no message.
#[must_use]
pub fn parse(line: &str, prefix: &str) -> ReminderCommand {
    let mut cmd = ReminderCommand::default();

    match Remainder::of(line, prefix) {
        Remainder::Empty => {}
        Remainder::Legacy(text) => {
            let (minutes, message) = match text.split_once(char::is_whitespace) {
                Some((minutes, message)) => (minutes, Some(message.trim())),
                None => (text, None),
            };
            match minutes.parse::<f64>() {
                Ok(minutes) => {
                    cmd.minutes = minutes;
                    cmd.message = message.filter(|m| !m.is_empty()).map(str::to_string);
                }
                Err(_) => cmd.errors.push(UsageError::InvalidTimeFormat.to_string()),
            }
        }
        Remainder::Flags(tokens) => {
            let errors = FlagParser::new(&tokens, &FLAGS).run(|flag, args| cmd.apply(flag, args));
            cmd.errors = errors;
        }
    }

    cmd
}
