//! Command representation
//!
//! A command is a verb followed by flat string tokens, as delivered by the
//! host console.

use crate::path::{ArgReader, DecodeError};
use crate::request::EditRequest;
use npcloot_config::StoreError;

/// Console command prefix that the host prepends to editor commands
pub const CONSOLE_PREFIX: &str = "UI_NL";

/// Command error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Malformed {verb} command: {source}")]
    Malformed {
        verb: String,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CommandError {
    /// Tokens could not be decoded
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::Empty | Self::UnknownCommand(_))
    }

    /// Address did not resolve
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }

    /// Rename target already exists
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Store(StoreError::Conflict(_)))
    }
}

/// A tokenized command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Verb (matched case-sensitively)
    pub verb: String,
    /// Tokens after the verb
    pub args: Vec<String>,
}

impl Command {
    /// Create a new command
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Build from console tokens, dropping a leading [`CONSOLE_PREFIX`]
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = tokens.into_iter().map(Into::into).peekable();
        if tokens.peek().map(String::as_str) == Some(CONSOLE_PREFIX) {
            tokens.next();
        }

        let verb = tokens.next().ok_or(CommandError::Empty)?;
        Ok(Self {
            verb,
            args: tokens.collect(),
        })
    }

    /// Split a console line on whitespace
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        Self::from_tokens(line.split_whitespace())
    }

    /// Typed view of the arguments
    pub fn reader(&self) -> ArgReader<'_> {
        ArgReader::new(&self.args)
    }
}

/// Command handler trait
///
/// A handler only decodes; applying and persisting the decoded request is
/// done by the router so that every verb shares one mutation path.
pub trait CommandHandler: Send + Sync {
    /// Get the verb this handler answers to
    fn name(&self) -> &str;

    /// Get command description
    fn description(&self) -> &str;

    /// Get usage string
    fn usage(&self) -> &str {
        self.name()
    }

    /// Decode the tokens after the verb
    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder() {
        let cmd = Command::new("OPENPREFAB").arg("my").arg("npc");

        assert_eq!(cmd.verb, "OPENPREFAB");
        assert_eq!(cmd.reader().key(0).unwrap(), "my npc");
    }

    #[test]
    fn test_parse_strips_console_prefix() {
        let cmd = Command::parse("UI_NL OPENPREFABS 2 false").unwrap();

        assert_eq!(cmd.verb, "OPENPREFABS");
        assert_eq!(cmd.args, vec!["2", "false"]);
        assert_eq!(Command::parse("OPENPREFABS 2 false").unwrap(), cmd);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(Command::parse("UI_NL"), Err(CommandError::Empty));
    }

    #[test]
    fn test_error_kinds() {
        let malformed = CommandError::Malformed {
            verb: "CHGMINAMOUNT".into(),
            source: DecodeError::EmptyKey,
        };
        assert!(malformed.is_malformed());
        assert!(!malformed.is_not_found());

        let conflict = CommandError::from(StoreError::Conflict("x".into()));
        assert!(conflict.is_conflict());
        assert!(!conflict.is_malformed());
    }
}
