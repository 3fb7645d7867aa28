//! # flagline
//!
//! Parses chat-bot command lines such as `$chat -l gemini -s Hello` into
//! structured, validated command objects.
//!
//! The pipeline has three layers:
//!
//! - [`core::tokenize`] splits a line into tokens, honoring single and
//!   double quotes, mixed quotes and backslash escapes.
//! - [`core::consume_value`] reads one flag value: every token up to the
//!   next flag, space-joined, so quoting is optional.
//! - One grammar per command family in [`grammar`], each driven by a
//!   static alias table through [`core::FlagParser`].
//!
//! Malformed input never fails a parse. Each command object carries an
//! `errors` list; a non-empty list means the caller should show those
//! messages and ignore the rest.
//!
//! ## Example
//!
//! ```
//! use flagline::{Command, ParserConfig, parse_line};
//!
//! let config = ParserConfig::default();
//! let Some(Command::Chat(chat)) = parse_line("$chat -l CHATGPT -s Hello world", &config) else {
//!     unreachable!();
//! };
//! assert_eq!(chat.llm.as_deref(), Some("chatgpt"));
//! assert_eq!(chat.message.as_deref(), Some("Hello world"));
//! assert!(chat.errors.is_empty());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod grammar;

pub use config::ParserConfig;
pub use crate::core::{consume_value, tokenize};
pub use error::{ClipError, CommandError, ConfigError, Error, Result, UsageError};
pub use grammar::{Command, CommandKind, parse_line};
