//! Parser configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.

use crate::error::ConfigError;

/// Default command sigil.
pub const DEFAULT_SIGIL: &str = "$";

/// Environment variable overriding the command sigil.
pub const PREFIX_ENV_VAR: &str = "FLAGLINE_PREFIX";

/// Configuration for line dispatch.
///
/// Grammars themselves take no configuration; this only decides which
/// leading word selects which grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Characters preceding every command name (`$` in `$chat`).
    pub sigil: String,
}

impl ParserConfig {
    /// Creates a new builder for `ParserConfig`.
    #[must_use]
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `FLAGLINE_PREFIX` holds an invalid sigil.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().from_env().build()
    }

    /// Returns the full command word for a command name, e.g. `$chat`.
    #[must_use]
    pub fn command_word(&self, name: &str) -> String {
        format!("{}{name}", self.sigil)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            sigil: DEFAULT_SIGIL.to_string(),
        }
    }
}

/// Builder for [`ParserConfig`].
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    sigil: Option<String>,
}

impl ParserConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.sigil.is_none() {
            self.sigil = std::env::var(PREFIX_ENV_VAR).ok();
        }
        self
    }

    /// Sets the command sigil.
    #[must_use]
    pub fn sigil(mut self, sigil: impl Into<String>) -> Self {
        self.sigil = Some(sigil.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPrefix`] for an empty sigil and
    /// [`ConfigError::InvalidPrefix`] when it contains whitespace or starts
    /// with `-`.
    pub fn build(self) -> Result<ParserConfig, ConfigError> {
        let sigil = self.sigil.unwrap_or_else(|| DEFAULT_SIGIL.to_string());
        if sigil.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if sigil.starts_with('-') || sigil.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidPrefix(sigil));
        }
        Ok(ParserConfig { sigil })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sigil() {
        let config = ParserConfig::builder().build().unwrap();
        assert_eq!(config.sigil, "$");
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn test_explicit_sigil_wins() {
        let config = ParserConfig::builder().sigil("!").from_env().build().unwrap();
        assert_eq!(config.sigil, "!");
        assert_eq!(config.command_word("clip"), "!clip");
    }

    #[test]
    fn test_rejects_empty_sigil() {
        let result = ParserConfig::builder().sigil("").build();
        assert_eq!(result, Err(ConfigError::EmptyPrefix));
    }

    #[test]
    fn test_rejects_flag_like_sigil() {
        assert!(matches!(
            ParserConfig::builder().sigil("--").build(),
            Err(ConfigError::InvalidPrefix(_))
        ));
        assert!(matches!(
            ParserConfig::builder().sigil("$ ").build(),
            Err(ConfigError::InvalidPrefix(_))
        ));
    }
}
