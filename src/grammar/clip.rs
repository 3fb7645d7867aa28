//! Media-clip extraction grammar (`$clip`).
//!
//! Locations and time markers repeat; they are paired by position, so the
//! second `--start` belongs to the second `--url` wherever it appears.
//!
//! ```text
//! $clip -u "url" -s 5 -e 15
//! $clip -u "url" -s 1:05 -e 1:15 --format gif
//! $clip -u "url1" -s 5 -e 15 -u "url2" -s 20 -e 30
//! $clip --resolution 720p --clip 2
//! $clip --confirm --skip 2
//! $clip -u "url" -s 5 -e 15 --force
//! $clip https://x/v 0:05 0:15               (legacy: url [start] [end])
//! ```

use serde::Serialize;

use crate::core::{FlagArgs, FlagParser, FlagSpec, FlagTable, Remainder, parse_timestamp, tokenize};
use crate::error::{ClipError, UsageError};

/// Command name, without sigil.
pub const NAME: &str = "clip";

/// Legacy form, for usage text.
pub const LEGACY: &str = "<url> [start] [end]";

/// Flag identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipFlag {
    /// `--url`
    Url,
    /// `--start`
    Start,
    /// `--end`
    End,
    /// `--resolution`
    Resolution,
    /// `--fps`
    Fps,
    /// `--bitrate`
    Bitrate,
    /// `--format`
    Format,
    /// `--force`
    Force,
    /// `--confirm`
    Confirm,
    /// `--cancel`
    Cancel,
    /// `--clip`
    Clip,
    /// `--skip`
    Skip,
}

const CLIP_FLAGS: &[FlagSpec<ClipFlag>] = &[
    FlagSpec {
        flag: ClipFlag::Url,
        aliases: &["--url", "-u"],
        value: Some("url"),
        help: "Video URL (repeatable)",
    },
    FlagSpec {
        flag: ClipFlag::Start,
        aliases: &["--start", "-s"],
        value: Some("time"),
        help: "Start time, seconds or MM:SS (repeatable)",
    },
    FlagSpec {
        flag: ClipFlag::End,
        aliases: &["--end", "-e"],
        value: Some("time"),
        help: "End time, seconds or MM:SS (repeatable)",
    },
    FlagSpec {
        flag: ClipFlag::Resolution,
        aliases: &["--resolution", "-r"],
        value: Some("res"),
        help: "Resolution (1080p, 720p, 480p, 360p)",
    },
    FlagSpec {
        flag: ClipFlag::Fps,
        aliases: &["--fps"],
        value: Some("fps"),
        help: "Frames per second",
    },
    FlagSpec {
        flag: ClipFlag::Bitrate,
        aliases: &["--bitrate", "-b"],
        value: Some("rate"),
        help: "Video bitrate (e.g. 2500k)",
    },
    FlagSpec {
        flag: ClipFlag::Format,
        aliases: &["--format", "-f"],
        value: Some("fmt"),
        help: "Output format (mp4, gif, mp3, ...)",
    },
    FlagSpec {
        flag: ClipFlag::Force,
        aliases: &["--force"],
        value: None,
        help: "Skip preview, process immediately",
    },
    FlagSpec {
        flag: ClipFlag::Confirm,
        aliases: &["--confirm"],
        value: None,
        help: "Confirm and process pending clips",
    },
    FlagSpec {
        flag: ClipFlag::Cancel,
        aliases: &["--cancel"],
        value: None,
        help: "Cancel pending clips",
    },
    FlagSpec {
        flag: ClipFlag::Clip,
        aliases: &["--clip"],
        value: Some("n"),
        help: "Modify a specific pending clip (1-based)",
    },
    FlagSpec {
        flag: ClipFlag::Skip,
        aliases: &["--skip"],
        value: Some("n"),
        help: "Skip a clip when confirming (1-based, repeatable)",
    },
];

/// Alias table for the clip grammar.
pub static FLAGS: FlagTable<ClipFlag> = FlagTable::new(CLIP_FLAGS);

/// Parsed `$clip` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClipCommand {
    /// Video locations, in input order.
    pub urls: Vec<String>,
    /// Start markers, paired with `urls` by position.
    pub starts: Vec<String>,
    /// End markers, paired with `urls` by position.
    pub ends: Vec<String>,
    /// Target resolution.
    pub resolution: Option<String>,
    /// Target frame rate.
    pub fps: Option<u32>,
    /// Target video bitrate.
    pub bitrate: Option<String>,
    /// Output container or codec.
    pub output_format: Option<String>,
    /// Process without preview.
    pub force: bool,
    /// Process pending clips.
    pub confirm: bool,
    /// Drop pending clips.
    pub cancel: bool,
    /// Pending clip to modify, 0-based.
    pub clip_index: Option<usize>,
    /// Pending clips to skip on confirm, 0-based.
    pub skip_indices: Vec<usize>,
    /// Nothing requested: list pending clips.
    pub show_pending: bool,
    /// Usage errors in encounter order.
    pub errors: Vec<String>,
}

/// One location with resolved start and end seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipSegment {
    /// Video location.
    pub url: String,
    /// Start, in seconds.
    pub start: f64,
    /// End, in seconds.
    pub end: f64,
}

impl ClipSegment {
    /// Length in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl ClipCommand {
    /// Returns `true` if any field asks for something to happen.
    #[must_use]
    pub fn has_action(&self) -> bool {
        !self.urls.is_empty()
            || !self.starts.is_empty()
            || !self.ends.is_empty()
            || self.resolution.is_some()
            || self.fps.is_some()
            || self.bitrate.is_some()
            || self.output_format.is_some()
            || self.force
            || self.confirm
            || self.cancel
            || self.clip_index.is_some()
            || !self.skip_indices.is_empty()
    }

    /// Pairs each location with its start and end markers.
    ///
    /// # Errors
    ///
    /// Returns [`ClipError`] when there are no locations, a location lacks
    /// a marker, markers outnumber locations, a marker does not parse, or
    /// a clip ends before it starts.
    pub fn segments(&self) -> Result<Vec<ClipSegment>, ClipError> {
        if self.urls.is_empty() {
            return Err(ClipError::NoClips);
        }
        for (marker, list) in [("start", &self.starts), ("end", &self.ends)] {
            if list.len() > self.urls.len() {
                return Err(ClipError::UnpairedMarkers {
                    count: list.len() - self.urls.len(),
                    marker,
                });
            }
        }

        self.urls
            .iter()
            .enumerate()
            .map(|(i, url)| {
                let clip = i + 1;
                let start = self
                    .starts
                    .get(i)
                    .ok_or(ClipError::MissingMarker { clip, marker: "start" })?;
                let end = self
                    .ends
                    .get(i)
                    .ok_or(ClipError::MissingMarker { clip, marker: "end" })?;
                let start = parse_timestamp(start)?;
                let end = parse_timestamp(end)?;
                if end <= start {
                    return Err(ClipError::EmptyRange { clip });
                }
                Ok(ClipSegment {
                    url: url.clone(),
                    start,
                    end,
                })
            })
            .collect()
    }

    fn apply(&mut self, flag: ClipFlag, args: &mut FlagArgs<'_>) -> Result<(), UsageError> {
        match flag {
            ClipFlag::Url => self.urls.push(args.require("a URL")?),
            ClipFlag::Start => self.starts.push(args.require("a time value")?),
            ClipFlag::End => self.ends.push(args.require("a time value")?),
            ClipFlag::Resolution => self.resolution = Some(args.require("a value")?),
            ClipFlag::Fps => self.fps = Some(args.require_number("a value")?),
            ClipFlag::Bitrate => self.bitrate = Some(args.require("a value")?),
            ClipFlag::Format => self.output_format = Some(args.require("a value")?),
            ClipFlag::Force => self.force = true,
            ClipFlag::Confirm => self.confirm = true,
            ClipFlag::Cancel => self.cancel = true,
            ClipFlag::Clip => self.clip_index = Some(args.require_index("an index")?),
            ClipFlag::Skip => self.skip_indices.push(args.require_index("an index")?),
        }
        Ok(())
    }

    fn apply_legacy(&mut self, text: &str) {
        let mut tokens = tokenize(text).into_iter();
        self.urls.extend(tokens.next());
        self.starts.extend(tokens.next());
        self.ends.extend(tokens.next());
        self.errors
            .extend(tokens.map(|extra| UsageError::UnexpectedArgument(extra).to_string()));
    }
}

/// Parses a `$clip` line. `prefix` is the full command word.
///
/// Empty input lists pending clips.
#[must_use]
pub fn parse(line: &str, prefix: &str) -> ClipCommand {
    let mut cmd = ClipCommand::default();

    match Remainder::of(line, prefix) {
        Remainder::Empty => cmd.show_pending = true,
        Remainder::Legacy(text) => cmd.apply_legacy(text),
        Remainder::Flags(tokens) => {
            let errors = FlagParser::new(&tokens, &FLAGS).run(|flag, args| cmd.apply(flag, args));
            cmd.errors = errors;
            if !cmd.has_action() {
                cmd.show_pending = true;
            }
        }
    }

    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn clip(rest: &str) -> ClipCommand {
        parse(&format!("$clip {rest}"), "$clip")
    }

    #[test]
    fn test_two_clips_pair_by_position() {
        let cmd = clip(r#"-u "https://x/a" -s 5 -e 15 -u "https://x/b" -s 20 -e 30"#);
        assert!(cmd.errors.is_empty());
        assert_eq!(cmd.urls, ["https://x/a", "https://x/b"]);
        assert_eq!(cmd.starts, ["5", "20"]);
        assert_eq!(cmd.ends, ["15", "30"]);

        let segments = cmd.segments().unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].url, "https://x/b");
        assert!((segments[1].duration() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_markers_pair_by_index_not_adjacency() {
        let cmd = clip("-u a -u b -s 1 -s 2 -e 3 -e 4");
        let segments = cmd.segments().unwrap();
        assert!((segments[0].start - 1.0).abs() < f64::EPSILON);
        assert!((segments[1].end - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_encoding_options() {
        let cmd = clip("-u v -s 1:05 -e 1:15 --format gif -r 720p --fps 15 -b 1500k --force");
        assert!(cmd.errors.is_empty());
        assert_eq!(cmd.output_format.as_deref(), Some("gif"));
        assert_eq!(cmd.resolution.as_deref(), Some("720p"));
        assert_eq!(cmd.fps, Some(15));
        assert_eq!(cmd.bitrate.as_deref(), Some("1500k"));
        assert!(cmd.force);
        let segments = cmd.segments().unwrap();
        assert!((segments[0].start - 65.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_indices_become_zero_based() {
        let cmd = clip("--confirm --skip 2 --skip 3 --clip 1");
        assert!(cmd.errors.is_empty());
        assert!(cmd.confirm);
        assert_eq!(cmd.skip_indices, [1, 2]);
        assert_eq!(cmd.clip_index, Some(0));
    }

    #[test_case("--fps fast", "--fps requires a number")]
    #[test_case("--clip two", "--clip requires a number")]
    #[test_case("--skip 0", "--skip index must be 1 or greater")]
    #[test_case("--clip -1", "--clip requires a number")]
    fn test_bad_numbers(rest: &str, message: &str) {
        let cmd = clip(&format!("{rest} --cancel"));
        assert_eq!(cmd.errors, [message]);
        assert!(cmd.fps.is_none());
        assert!(cmd.clip_index.is_none());
        assert!(cmd.skip_indices.is_empty());
        assert!(cmd.cancel);
    }

    #[test_case("-u", "--url requires a URL")]
    #[test_case("--start", "--start requires a time value")]
    #[test_case("-e", "--end requires a time value")]
    #[test_case("-r", "--resolution requires a value")]
    #[test_case("--fps", "--fps requires a value")]
    #[test_case("-b", "--bitrate requires a value")]
    #[test_case("-f", "--format requires a value")]
    #[test_case("--clip", "--clip requires an index")]
    #[test_case("--skip", "--skip requires an index")]
    fn test_trailing_flag(flag: &str, message: &str) {
        let cmd = clip(&format!("--force {flag}"));
        assert_eq!(cmd.errors, [message]);
    }

    #[test]
    fn test_empty_lists_pending() {
        let cmd = clip("");
        assert!(cmd.show_pending);
        assert!(cmd.errors.is_empty());
    }

    #[test]
    fn test_legacy_positional_form() {
        let cmd = clip("https://x/v 0:05 0:15");
        assert!(cmd.errors.is_empty());
        assert_eq!(cmd.urls, ["https://x/v"]);
        assert_eq!(cmd.starts, ["0:05"]);
        assert_eq!(cmd.ends, ["0:15"]);

        let cmd = clip("https://x/v 1 2 3");
        assert_eq!(cmd.errors, ["Unexpected argument: 3"]);
    }

    #[test]
    fn test_segment_errors() {
        assert_eq!(clip("--force").segments(), Err(ClipError::NoClips));
        assert_eq!(
            clip("-u a -s 1").segments(),
            Err(ClipError::MissingMarker { clip: 1, marker: "end" })
        );
        assert_eq!(
            clip("-u a -s 1 -s 2 -e 3").segments(),
            Err(ClipError::UnpairedMarkers { count: 1, marker: "start" })
        );
        assert_eq!(
            clip("-u a -s 10 -e 5").segments(),
            Err(ClipError::EmptyRange { clip: 1 })
        );
        assert_eq!(
            clip("-u a -s soon -e 5").segments(),
            Err(ClipError::InvalidTimestamp("soon".to_string()))
        );
    }
}
