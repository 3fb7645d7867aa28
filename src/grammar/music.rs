//! Media-player command grammar (`$music`).
//!
//! ```text
//! $music --init
//! $music -p
//! $music --youtube "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
//! $music -y "url1" "url2" "url3"            add several, play the first
//! $music --queue -y "url1" "url2"           add several to the queue
//! $music initialize                         (legacy: action keyword)
//! ```

use serde::Serialize;

use crate::core::{FlagArgs, FlagParser, FlagSpec, FlagTable, Remainder};
use crate::error::UsageError;

/// Command name, without sigil.
pub const NAME: &str = "music";

/// Legacy form, for usage text.
pub const LEGACY: &str = "<action>    initialize, play, pause, stop, next, previous, name";

/// Flag identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicFlag {
    /// `--init`
    Init,
    /// `--play`
    Play,
    /// `--pause`
    Pause,
    /// `--stop`
    Stop,
    /// `--next`
    Next,
    /// `--prev`
    Prev,
    /// `--name`
    Name,
    /// `--youtube`
    Youtube,
    /// `--queue`
    Queue,
}

const MUSIC_FLAGS: &[FlagSpec<MusicFlag>] = &[
    FlagSpec {
        flag: MusicFlag::Init,
        aliases: &["--init", "--initialize", "-i"],
        value: None,
        help: "Connect to the voice channel",
    },
    FlagSpec {
        flag: MusicFlag::Play,
        aliases: &["--play", "-p"],
        value: None,
        help: "Resume playback",
    },
    FlagSpec {
        flag: MusicFlag::Pause,
        aliases: &["--pause"],
        value: None,
        help: "Pause playback",
    },
    FlagSpec {
        flag: MusicFlag::Stop,
        aliases: &["--stop", "-s"],
        value: None,
        help: "Stop and disconnect",
    },
    FlagSpec {
        flag: MusicFlag::Next,
        aliases: &["--next", "-n"],
        value: None,
        help: "Next song",
    },
    FlagSpec {
        flag: MusicFlag::Prev,
        aliases: &["--prev", "--previous"],
        value: None,
        help: "Previous song",
    },
    FlagSpec {
        flag: MusicFlag::Name,
        aliases: &["--name"],
        value: None,
        help: "Show the current song",
    },
    FlagSpec {
        flag: MusicFlag::Youtube,
        aliases: &["--youtube", "-y"],
        value: Some("url..."),
        help: "Play YouTube video(s), skipping to the first",
    },
    FlagSpec {
        flag: MusicFlag::Queue,
        aliases: &["--queue", "--add-next"],
        value: None,
        help: "With --youtube: add to the queue without playing",
    },
];

/// Alias table for the music grammar.
pub static FLAGS: FlagTable<MusicFlag> = FlagTable::new(MUSIC_FLAGS);

/// Player action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicAction {
    /// Connect to the voice channel.
    Init,
    /// Resume playback.
    Play,
    /// Pause playback.
    Pause,
    /// Stop and disconnect.
    Stop,
    /// Skip forward.
    Next,
    /// Skip back.
    Prev,
    /// Report the current song.
    Name,
    /// Play or queue the given URLs.
    Youtube,
    /// Play the bundled test track.
    PlayTest,
    /// Legacy keyword with no known mapping, kept verbatim.
    Custom(String),
}

impl MusicAction {
    /// Maps a legacy action keyword.
    #[must_use]
    pub fn from_keyword(word: &str) -> Self {
        match word {
            "initialize" => Self::Init,
            "play" => Self::Play,
            "pause" => Self::Pause,
            "stop" => Self::Stop,
            "next" => Self::Next,
            "previous" => Self::Prev,
            "name" => Self::Name,
            "playTest" => Self::PlayTest,
            other => Self::Custom(other.to_string()),
        }
    }
}

/// Parsed `$music` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MusicCommand {
    /// Requested action; the last action flag wins.
    pub action: Option<MusicAction>,
    /// URLs given to `--youtube`, in order.
    pub youtube_urls: Vec<String>,
    /// Queue URLs instead of playing them.
    pub queue_only: bool,
    /// Usage errors in encounter order.
    pub errors: Vec<String>,
}

impl MusicCommand {
    /// Returns `true` if an action was selected.
    #[must_use]
    pub const fn has_action(&self) -> bool {
        self.action.is_some()
    }

    fn is_blank(&self) -> bool {
        self.action.is_none() && self.youtube_urls.is_empty() && !self.queue_only
    }

    fn apply(&mut self, flag: MusicFlag, args: &mut FlagArgs<'_>) -> Result<(), UsageError> {
        let action = match flag {
            MusicFlag::Init => MusicAction::Init,
            MusicFlag::Play => MusicAction::Play,
            MusicFlag::Pause => MusicAction::Pause,
            MusicFlag::Stop => MusicAction::Stop,
            MusicFlag::Next => MusicAction::Next,
            MusicFlag::Prev => MusicAction::Prev,
            MusicFlag::Name => MusicAction::Name,
            MusicFlag::Youtube => {
                self.action = Some(MusicAction::Youtube);
                let urls = args.values();
                if urls.is_empty() {
                    return Err(UsageError::MissingValue {
                        flag: args.flag(),
                        expected: "at least one URL",
                    });
                }
                self.youtube_urls.extend(urls);
                return Ok(());
            }
            MusicFlag::Queue => {
                self.queue_only = true;
                return Ok(());
            }
        };
        self.action = Some(action);
        Ok(())
    }
}

/// Parses a `$music` line. `prefix` is the full command word.
///
/// Empty input reports the current song. Text not starting with `-` is
/// read as a legacy action keyword (first word only).
#[must_use]
pub fn parse(line: &str, prefix: &str) -> MusicCommand {
    let mut cmd = MusicCommand::default();

    match Remainder::of(line, prefix) {
        Remainder::Empty => cmd.action = Some(MusicAction::Name),
        Remainder::Legacy(text) => {
            let word = text.split_whitespace().next().unwrap_or_default();
            cmd.action = Some(MusicAction::from_keyword(word));
        }
        Remainder::Flags(tokens) => {
            let errors = FlagParser::new(&tokens, &FLAGS).run(|flag, args| cmd.apply(flag, args));
            cmd.errors = errors;
            if cmd.is_blank() {
                cmd.action = Some(MusicAction::Name);
            } else if cmd.action.is_none() {
                cmd.errors.push(UsageError::NoAction.to_string());
            }
        }
    }

    cmd
}
