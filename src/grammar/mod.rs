//! Per-command grammars and the line dispatcher.
//!
//! Each submodule owns one command family: its alias table, its command
//! struct and a `parse(line, prefix)` entry point. [`parse_line`] picks the
//! grammar from the leading command word.

pub mod chat;
pub mod clip;
pub mod db;
pub mod music;
pub mod reminder;
pub mod search;

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::CommandError;

pub use chat::ChatCommand;
pub use clip::{ClipCommand, ClipSegment};
pub use db::DbCommand;
pub use music::MusicCommand;
pub use reminder::ReminderCommand;
pub use search::SearchCommand;

/// Command families known to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `chat`
    Chat,
    /// `music`
    Music,
    /// `wolfram`
    Wolfram,
    /// `google`
    Google,
    /// `db`
    Db,
    /// `remindMeIn`
    Reminder,
    /// `clip`
    Clip,
}

impl CommandKind {
    /// Every command family, in help order.
    pub const ALL: [Self; 7] = [
        Self::Chat,
        Self::Music,
        Self::Wolfram,
        Self::Google,
        Self::Db,
        Self::Reminder,
        Self::Clip,
    ];

    /// Command name without sigil.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chat => chat::NAME,
            Self::Music => music::NAME,
            Self::Wolfram => search::WOLFRAM,
            Self::Google => search::GOOGLE,
            Self::Db => db::NAME,
            Self::Reminder => reminder::NAME,
            Self::Clip => clip::NAME,
        }
    }

    /// Resolves a command name (without sigil). Fused db names such as
    /// `dbStats` resolve to [`CommandKind::Db`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if db::FUSED_NAMES.contains(&name) {
            return Some(Self::Db);
        }
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Parses `line` with this family's grammar. `prefix` is the full
    /// command word, sigil included.
    #[must_use]
    pub fn parse(self, line: &str, prefix: &str) -> Command {
        match self {
            Self::Chat => Command::Chat(chat::parse(line, prefix)),
            Self::Music => Command::Music(music::parse(line, prefix)),
            Self::Wolfram => Command::Wolfram(search::parse_wolfram(line, prefix)),
            Self::Google => Command::Google(search::parse_google(line, prefix)),
            Self::Db => Command::Db(db::parse(line, prefix)),
            Self::Reminder => Command::Reminder(reminder::parse(line, prefix)),
            Self::Clip => Command::Clip(clip::parse(line, prefix)),
        }
    }

    /// Renders usage text for this family.
    #[must_use]
    pub fn usage(self, config: &ParserConfig) -> String {
        let word = config.command_word(self.name());
        let (flags, legacy) = match self {
            Self::Chat => (chat::FLAGS.usage(), chat::LEGACY),
            Self::Music => (music::FLAGS.usage(), music::LEGACY),
            Self::Wolfram => (search::WOLFRAM_TABLE.usage(), search::LEGACY),
            Self::Google => (search::GOOGLE_TABLE.usage(), search::LEGACY),
            Self::Db => (db::FLAGS.usage(), db::LEGACY),
            Self::Reminder => (reminder::FLAGS.usage(), reminder::LEGACY),
            Self::Clip => (clip::FLAGS.usage(), clip::LEGACY),
        };
        format!("Usage: {word} [flags]\n\nFlags:\n{flags}\nLegacy:\n  {word} {legacy}\n")
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed line, tagged by command family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", content = "parsed", rename_all = "lowercase")]
pub enum Command {
    /// `$chat`
    Chat(ChatCommand),
    /// `$music`
    Music(MusicCommand),
    /// `$wolfram`
    Wolfram(SearchCommand),
    /// `$google`
    Google(SearchCommand),
    /// `$db`
    Db(DbCommand),
    /// `$remindMeIn`
    #[serde(rename = "remindMeIn")]
    Reminder(ReminderCommand),
    /// `$clip`
    Clip(ClipCommand),
}

impl Command {
    /// Family this command belongs to.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Chat(_) => CommandKind::Chat,
            Self::Music(_) => CommandKind::Music,
            Self::Wolfram(_) => CommandKind::Wolfram,
            Self::Google(_) => CommandKind::Google,
            Self::Db(_) => CommandKind::Db,
            Self::Reminder(_) => CommandKind::Reminder,
            Self::Clip(_) => CommandKind::Clip,
        }
    }

    /// Usage errors collected while parsing.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Chat(cmd) => &cmd.errors,
            Self::Music(cmd) => &cmd.errors,
            Self::Wolfram(cmd) | Self::Google(cmd) => &cmd.errors,
            Self::Db(cmd) => &cmd.errors,
            Self::Reminder(cmd) => &cmd.errors,
            Self::Clip(cmd) => &cmd.errors,
        }
    }

    /// Returns `true` when no usage errors were recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Splits a command from its errors. A command with errors is
    /// terminal: only the messages are returned.
    ///
    /// # Errors
    ///
    /// [`CommandError::Rejected`] carrying every message in order.
    pub fn into_result(self) -> Result<Self, CommandError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(CommandError::Rejected {
                errors: self.errors().to_vec(),
            })
        }
    }
}

/// Routes a line to the grammar named by its leading command word.
///
/// Returns `None` when the line is blank, does not start with the
/// configured sigil, or names no known command.
#[must_use]
pub fn parse_line(line: &str, config: &ParserConfig) -> Option<Command> {
    let word = line.split_whitespace().next()?;
    let name = word.strip_prefix(config.sigil.as_str())?;
    let kind = CommandKind::from_name(name)?;
    let prefix = config.command_word(kind.name());

    let command = kind.parse(line, &prefix);
    debug!(command = %kind, errors = command.errors().len(), "parsed line");
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn dollar() -> ParserConfig {
        ParserConfig::default()
    }

    #[test_case("$chat hi", CommandKind::Chat)]
    #[test_case("$music -p", CommandKind::Music)]
    #[test_case("$wolfram 2+2", CommandKind::Wolfram)]
    #[test_case("$google rust", CommandKind::Google)]
    #[test_case("$db", CommandKind::Db)]
    #[test_case("$dbExport", CommandKind::Db; "fused db name")]
    #[test_case("$remindMeIn 3", CommandKind::Reminder)]
    #[test_case("  $clip --cancel", CommandKind::Clip; "leading whitespace")]
    fn test_routes_by_command_word(line: &str, kind: CommandKind) {
        let command = parse_line(line, &dollar()).unwrap();
        assert_eq!(command.kind(), kind);
        assert!(command.is_valid(), "{:?}", command.errors());
    }

    #[test_case(""; "empty")]
    #[test_case("   \t "; "whitespace only")]
    #[test_case("chat hi"; "missing sigil")]
    #[test_case("$chatter hi"; "longer word")]
    #[test_case("$CHAT hi"; "case sensitive")]
    #[test_case("hello $chat"; "not leading")]
    fn test_unclaimed_lines(line: &str) {
        assert!(parse_line(line, &dollar()).is_none());
    }

    #[test]
    fn test_fused_db_keeps_action() {
        let Some(Command::Db(cmd)) = parse_line("$dbImport", &dollar()) else {
            panic!("expected db command");
        };
        assert_eq!(cmd.action, Some(db::DbAction::Import));
    }

    #[test]
    fn test_custom_sigil() {
        let config = ParserConfig::builder().sigil("!").build().unwrap();
        let command = parse_line("!remindMeIn -t 2 -m tea", &config).unwrap();
        assert_eq!(command.kind(), CommandKind::Reminder);
        assert!(parse_line("$remindMeIn 2", &config).is_none());
    }

    #[test]
    fn test_parsing_is_repeatable() {
        let line = r#"$clip -u "https://x/a" -s 5 -e 15 --bogus"#;
        assert_eq!(parse_line(line, &dollar()), parse_line(line, &dollar()));
    }

    #[test]
    fn test_into_result_rejects_errors() {
        let command = parse_line("$chat --send", &dollar()).unwrap();
        match command.into_result() {
            Err(CommandError::Rejected { errors }) => {
                assert_eq!(errors, ["--send requires a message"]);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(parse_line("$chat hi", &dollar()).unwrap().into_result().is_ok());
    }

    #[test]
    fn test_name_round_trip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(CommandKind::from_name("dbStats"), Some(CommandKind::Db));
        assert_eq!(CommandKind::from_name("remind"), None);
    }

    #[test]
    fn test_usage_mentions_flags_and_legacy() {
        let usage = CommandKind::Clip.usage(&dollar());
        assert!(usage.starts_with("Usage: $clip [flags]"));
        assert!(usage.contains("--url, -u <url>"));
        assert!(usage.contains("$clip <url> [start] [end]"));
    }

    #[test]
    fn test_json_shape() {
        let command = parse_line("$db -e", &dollar()).unwrap();
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["command"], "db");
        assert_eq!(json["parsed"]["action"], "export");

        let command = parse_line("$remindMeIn 1", &dollar()).unwrap();
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["command"], "remindMeIn");
    }
}
