//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};

use crate::config::PREFIX_ENV_VAR;

/// flagline: parse chat-bot command lines into structured commands.
///
/// Reads one line such as `$chat -l gemini -s Hello`, routes it to the
/// grammar named by its command word and prints the result.
#[derive(Parser, Debug)]
#[command(name = "flagline")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command sigil preceding every command name.
    ///
    /// Defaults to `$`.
    #[arg(short, long, env = PREFIX_ENV_VAR, global = true)]
    pub prefix: Option<String>,

    /// Enable verbose logging on stderr (repeat for more).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse one command line.
    ///
    /// Reads the line from stdin when it is not given as an argument.
    /// Exits non-zero and prints each usage error when the line is rejected.
    #[command(after_help = r#"Examples:
  flagline parse '$chat -l gemini -s Hello there'
  flagline parse '$clip -u "https://x/a" -s 5 -e 15'
  flagline parse '$dbStats'                        # Fused legacy form
  echo '$music -y url1 url2' | flagline parse      # Read from stdin
  flagline --prefix ! parse '!remindMeIn 10 tea'   # Custom sigil
  flagline parse -g wolfram '-q speed of light'     # Force a grammar
  flagline --format json parse '$google rust' | jq .parsed.query
"#)]
    Parse {
        /// Full line including its command word.
        #[arg(allow_hyphen_values = true)]
        line: Option<String>,

        /// Parse with this grammar, ignoring the line's own command word.
        #[arg(short, long)]
        grammar: Option<String>,
    },

    /// Show the tokens a line splits into.
    #[command(after_help = r#"Examples:
  flagline tokenize '-s "Hello world" --llm chatgpt'
  flagline --format json tokenize "it's \"quoted\""
"#)]
    Tokenize {
        /// Text to tokenize.
        #[arg(allow_hyphen_values = true)]
        line: String,
    },

    /// Show flags and legacy form for one command.
    #[command(after_help = r#"Examples:
  flagline usage chat
  flagline --prefix ! usage clip
"#)]
    Usage {
        /// Command name without sigil (chat, music, wolfram, ...).
        command: String,
    },

    /// List every known command.
    Commands,
}
