//! Data-store administration grammar (`$db`).
//!
//! ```text
//! $db --stats
//! $db -e
//! $db import                                (legacy: action keyword)
//! $dbStats                                  (legacy: fused command word)
//! ```

use serde::Serialize;

use crate::core::{FlagParser, FlagSpec, FlagTable, Remainder, tokenize};
use crate::error::UsageError;

/// Command name, without sigil.
pub const NAME: &str = "db";

/// Fused legacy command names (`$dbStats` and friends).
pub const FUSED_NAMES: [&str; 3] = ["dbStats", "dbExport", "dbImport"];

/// Legacy form, for usage text.
pub const LEGACY: &str = "stats|export|import    (also dbStats, dbExport, dbImport)";

/// Administrative action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbAction {
    /// Show database statistics.
    Stats,
    /// Export the database to JSON.
    Export,
    /// Import the database from JSON.
    Import,
}

impl DbAction {
    /// Maps a legacy keyword, case-insensitively.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "stats" => Some(Self::Stats),
            "export" => Some(Self::Export),
            "import" => Some(Self::Import),
            _ => None,
        }
    }
}

const DB_FLAGS: &[FlagSpec<DbAction>] = &[
    FlagSpec {
        flag: DbAction::Stats,
        aliases: &["--stats", "-s"],
        value: None,
        help: "Show database statistics",
    },
    FlagSpec {
        flag: DbAction::Export,
        aliases: &["--export", "-e"],
        value: None,
        help: "Export database to JSON",
    },
    FlagSpec {
        flag: DbAction::Import,
        aliases: &["--import", "-i"],
        value: None,
        help: "Import database from JSON",
    },
];

/// Alias table for the db grammar.
pub static FLAGS: FlagTable<DbAction> = FlagTable::new(DB_FLAGS);

/// Parsed `$db` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DbCommand {
    /// Requested action; the last flag wins.
    pub action: Option<DbAction>,
    /// Usage errors in encounter order.
    pub errors: Vec<String>,
}

impl DbCommand {
    /// Returns `true` if an action was selected.
    #[must_use]
    pub const fn has_action(&self) -> bool {
        self.action.is_some()
    }
}

/// Parses a `$db` line. `prefix` is the full command word (`$db`).
///
/// The fused forms work because `$dbStats` starts with `$db`, leaving
/// `Stats` as a legacy keyword. Words after the keyword are rejected.
/// Empty input shows statistics.
#[must_use]
pub fn parse(line: &str, prefix: &str) -> DbCommand {
    let mut cmd = DbCommand::default();

    match Remainder::of(line, prefix) {
        Remainder::Empty => cmd.action = Some(DbAction::Stats),
        Remainder::Legacy(text) => {
            let mut words = tokenize(text).into_iter();
            let word = words.next().unwrap_or_default();
            match DbAction::from_keyword(&word) {
                Some(action) => cmd.action = Some(action),
                None => cmd
                    .errors
                    .push(UsageError::InvalidAction { subject: "db", value: word }.to_string()),
            }
            cmd.errors
                .extend(words.map(|extra| UsageError::UnexpectedArgument(extra).to_string()));
        }
        Remainder::Flags(tokens) => {
            let errors = FlagParser::new(&tokens, &FLAGS).run(|action, _| {
                cmd.action = Some(action);
                Ok(())
            });
            cmd.errors = errors;
            if !cmd.has_action() {
                cmd.action = Some(DbAction::Stats);
            }
        }
    }

    cmd
}
