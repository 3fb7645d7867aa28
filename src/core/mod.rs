//! Lexical layer shared by every grammar.
//!
//! The tokenizer turns a line into tokens, the consumption protocol reads
//! flag values out of them, and the flag table/parser pair drives each
//! grammar's loop.

pub mod consume;
pub mod flags;
pub mod timestamp;
pub mod tokenizer;

pub use consume::{consume_value, consume_values, is_flag};
pub use flags::{FlagArgs, FlagParser, FlagSpec, FlagTable, Remainder};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use tokenizer::tokenize;
