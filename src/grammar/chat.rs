//! Assistant command grammar (`$chat`).
//!
//! ```text
//! $chat --llm gemini --model gemini-1.5-pro --send Hello
//! $chat -l chatgpt -m gpt-4 -p 2 -s Test message
//! $chat --models
//! $chat -p set "You are a pirate"
//! $chat --clear --llm deepseek -s Fresh start
//! $chat what is the weather like          (legacy: whole text is the message)
//! ```

use serde::Serialize;

use crate::core::{FlagArgs, FlagParser, FlagSpec, FlagTable, Remainder};
use crate::error::UsageError;

/// Command name, without sigil.
pub const NAME: &str = "chat";

/// Legacy form, for usage text.
pub const LEGACY: &str = "<message>    send the whole text as a message";

/// Flag identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatFlag {
    /// `--llm`
    Llm,
    /// `--model`
    Model,
    /// `--prompt`
    Prompt,
    /// `--send`
    Send,
    /// `--models`
    Models,
    /// `--status`
    Status,
    /// `--clear`
    Clear,
    /// `--listen`
    Listen,
}

const CHAT_FLAGS: &[FlagSpec<ChatFlag>] = &[
    FlagSpec {
        flag: ChatFlag::Llm,
        aliases: &["--llm", "-l"],
        value: Some("name"),
        help: "Set LLM (chatgpt/gemini/deepseek)",
    },
    FlagSpec {
        flag: ChatFlag::Model,
        aliases: &["--model", "-m"],
        value: Some("name"),
        help: "Set model for the current LLM",
    },
    FlagSpec {
        flag: ChatFlag::Prompt,
        aliases: &["--prompt", "-p"],
        value: Some("action"),
        help: "Prompt actions: list, show, set <text>, or an index",
    },
    FlagSpec {
        flag: ChatFlag::Send,
        aliases: &["--send", "-s"],
        value: Some("message"),
        help: "Send a message to the LLM",
    },
    FlagSpec {
        flag: ChatFlag::Models,
        aliases: &["--models"],
        value: None,
        help: "Show all available LLMs and models",
    },
    FlagSpec {
        flag: ChatFlag::Status,
        aliases: &["--status", "-st"],
        value: None,
        help: "Show current configuration",
    },
    FlagSpec {
        flag: ChatFlag::Clear,
        aliases: &["--clear", "-c"],
        value: None,
        help: "Clear chat history",
    },
    FlagSpec {
        flag: ChatFlag::Listen,
        aliases: &["--listen"],
        value: Some("on|off"),
        help: "Enable or disable listen mode",
    },
];

/// Alias table for the chat grammar.
pub static FLAGS: FlagTable<ChatFlag> = FlagTable::new(CHAT_FLAGS);

/// What `--prompt` asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "lowercase")]
pub enum PromptAction {
    /// List the preset prompts.
    List,
    /// Show the active prompt.
    Show,
    /// Replace the prompt with custom text.
    Set(String),
    /// Switch to a preset by index.
    Index(usize),
}

/// Listen-mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenMode {
    /// Respond to every message in the channel.
    On,
    /// Respond to explicit commands only.
    Off,
}

/// Parsed `$chat` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatCommand {
    /// Provider name, lower-cased.
    pub llm: Option<String>,
    /// Model name, verbatim.
    pub model: Option<String>,
    /// Prompt action.
    pub prompt: Option<PromptAction>,
    /// Message to send.
    pub message: Option<String>,
    /// List available models.
    pub show_models: bool,
    /// Show current configuration.
    pub show_status: bool,
    /// Clear conversation history.
    pub clear_history: bool,
    /// Listen-mode change.
    pub listen: Option<ListenMode>,
    /// Usage errors in encounter order.
    pub errors: Vec<String>,
}

impl ChatCommand {
    /// Returns `true` if any field asks for something to happen.
    #[must_use]
    pub const fn has_action(&self) -> bool {
        self.llm.is_some()
            || self.model.is_some()
            || self.prompt.is_some()
            || self.message.is_some()
            || self.show_models
            || self.show_status
            || self.clear_history
            || self.listen.is_some()
    }

    fn apply(&mut self, flag: ChatFlag, args: &mut FlagArgs<'_>) -> Result<(), UsageError> {
        match flag {
            ChatFlag::Llm => {
                self.llm = Some(args.require("a value (chatgpt/gemini/deepseek)")?.to_lowercase());
            }
            ChatFlag::Model => self.model = Some(args.require("a model name")?),
            ChatFlag::Prompt => self.prompt = Some(parse_prompt(args)?),
            ChatFlag::Send => self.message = Some(args.require("a message")?),
            ChatFlag::Models => self.show_models = true,
            ChatFlag::Status => self.show_status = true,
            ChatFlag::Clear => self.clear_history = true,
            ChatFlag::Listen => self.listen = Some(parse_listen(args)?),
        }
        Ok(())
    }
}

fn parse_prompt(args: &mut FlagArgs<'_>) -> Result<PromptAction, UsageError> {
    // The action is one word so that `set` can read its text after it.
    let flag = args.flag();
    let action = args.word().ok_or(UsageError::MissingValue {
        flag,
        expected: "an action (list/show/set/0-3)",
    })?;
    match action.as_str() {
        "list" => Ok(PromptAction::List),
        "show" => Ok(PromptAction::Show),
        "set" => args
            .value()
            .map(PromptAction::Set)
            .ok_or(UsageError::MissingValue {
                flag: "--prompt set",
                expected: "prompt text",
            }),
        digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => digits
            .parse()
            .map(PromptAction::Index)
            .map_err(|_| invalid_prompt(digits)),
        other => Err(invalid_prompt(other)),
    }
}

fn invalid_prompt(value: &str) -> UsageError {
    UsageError::InvalidAction {
        subject: "prompt",
        value: value.to_string(),
    }
}

fn parse_listen(args: &mut FlagArgs<'_>) -> Result<ListenMode, UsageError> {
    const EXPECTED: &str = "'on' or 'off'";
    let flag = args.flag();
    let value = args.require(EXPECTED)?;
    match value.to_lowercase().as_str() {
        "on" => Ok(ListenMode::On),
        "off" => Ok(ListenMode::Off),
        _ => Err(UsageError::InvalidChoice {
            flag,
            expected: EXPECTED,
            value,
        }),
    }
}

/// Parses a `$chat` line. `prefix` is the full command word.
///
/// Empty input shows status. Text not starting with `-` is sent as the
/// message. With flags and no action, status is shown.
#[must_use]
pub fn parse(line: &str, prefix: &str) -> ChatCommand {
    let mut cmd = ChatCommand::default();

    match Remainder::of(line, prefix) {
        Remainder::Empty => cmd.show_status = true,
        Remainder::Legacy(text) => cmd.message = Some(text.to_string()),
        Remainder::Flags(tokens) => {
            let errors = FlagParser::new(&tokens, &FLAGS).run(|flag, args| cmd.apply(flag, args));
            cmd.errors = errors;
            if !cmd.has_action() {
                cmd.show_status = true;
            }
        }
    }

    cmd
}
