//! Path encoding and decoding
//!
//! An edit address travels as a flat token list: fixed positional fields
//! first, then the free-text profile key (which may contain spaces), then
//! optionally a sentinel word followed by the edited value.
//!
//! ```text
//! CHGDROPCHANCE 0 1 Ice Cream Man amount 40
//!               │ │ └────┬──────┘ │      └ value
//!               │ │     key       sentinel
//!               │ └ table index
//!               └ item index
//! ```
//!
//! The decoder splits on the *first* sentinel occurrence. A profile key that
//! contains the sentinel word as a standalone token therefore cannot be
//! addressed by value-carrying commands: `a amount b amount 5` decodes to key
//! `a` and value `b amount 5`, which then fails to parse as a number. Use
//! [`CommandRouter::submit`](crate::router::CommandRouter::submit) for such keys.

use crate::command::Command;
use std::fmt;
use std::num::IntErrorKind;
use thiserror::Error;

/// Sentinel preceding the value of field edits and searches
pub const VALUE_SENTINEL: &str = "amount";

/// Sentinel preceding the new key of a rename
pub const RENAME_SENTINEL: &str = "newname";

/// Token decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid {name}: '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid flag {name}: '{value}'")]
    InvalidFlag { name: &'static str, value: String },

    #[error("Sentinel '{0}' not found")]
    MissingSentinel(&'static str),

    #[error("No value after sentinel '{0}'")]
    EmptyValue(&'static str),

    #[error("Profile key is empty")]
    EmptyKey,
}

/// A decoded free-text key and the value that followed the sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// Join `tokens[start..]` into a profile key
pub fn decode_key<S: AsRef<str>>(tokens: &[S], start: usize) -> Result<String, DecodeError> {
    let key = join(tokens.get(start..).unwrap_or_default());
    if key.is_empty() {
        return Err(DecodeError::EmptyKey);
    }
    Ok(key)
}

/// Split `tokens[start..]` at the first `sentinel` into key and value
pub fn decode_key_value<S: AsRef<str>>(
    tokens: &[S],
    start: usize,
    sentinel: &'static str,
) -> Result<KeyValue, DecodeError> {
    let span = tokens.get(start..).unwrap_or_default();
    let at = span
        .iter()
        .position(|t| t.as_ref() == sentinel)
        .ok_or(DecodeError::MissingSentinel(sentinel))?;

    if at + 1 == span.len() {
        return Err(DecodeError::EmptyValue(sentinel));
    }
    if at == 0 {
        return Err(DecodeError::EmptyKey);
    }

    Ok(KeyValue {
        key: join(&span[..at]),
        value: join(&span[at + 1..]),
    })
}

fn join<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
}

/// Typed access to a command's positional arguments
#[derive(Debug, Clone, Copy)]
pub struct ArgReader<'a> {
    tokens: &'a [String],
}

impl<'a> ArgReader<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        Self { tokens }
    }

    /// Get number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if there are no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Required raw token
    pub fn token(&self, index: usize, name: &'static str) -> Result<&'a str, DecodeError> {
        self.tokens
            .get(index)
            .map(String::as_str)
            .ok_or(DecodeError::MissingArgument(name))
    }

    pub fn int(&self, index: usize, name: &'static str) -> Result<i32, DecodeError> {
        parse_number(self.token(index, name)?, name)
    }

    /// Non-negative position (table, item or slot index, page number)
    pub fn index(&self, index: usize, name: &'static str) -> Result<usize, DecodeError> {
        parse_number(self.token(index, name)?, name)
    }

    pub fn flag(&self, index: usize, name: &'static str) -> Result<bool, DecodeError> {
        parse_flag(self.token(index, name)?, name)
    }

    /// Free-text key from `start` to the end
    pub fn key(&self, start: usize) -> Result<String, DecodeError> {
        decode_key(self.tokens, start)
    }

    /// Free-text key and value from `start`, split at `sentinel`
    pub fn key_value(&self, start: usize, sentinel: &'static str) -> Result<KeyValue, DecodeError> {
        decode_key_value(self.tokens, start, sentinel)
    }
}

/// Parse an edited integer value, saturating at the `i32` limits
///
/// Store writers clamp every value into its field's range, so an integer too
/// large for `i32` is still an edit rather than a malformed command.
pub fn parse_saturating(value: &str, name: &'static str) -> Result<i32, DecodeError> {
    match value.trim().parse::<i32>() {
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i32::MAX),
            IntErrorKind::NegOverflow => Ok(i32::MIN),
            _ => Err(DecodeError::InvalidNumber {
                name,
                value: value.to_string(),
            }),
        },
    }
}

/// Parse a numeric value token
pub fn parse_number<T: std::str::FromStr>(value: &str, name: &'static str) -> Result<T, DecodeError> {
    value.trim().parse().map_err(|_| DecodeError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

/// Parse a boolean flag token (`true`/`false`/`1`/`0`, any case)
pub fn parse_flag(value: &str, name: &'static str) -> Result<bool, DecodeError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(DecodeError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}

/// Builder for an encoded command line
///
/// Keys and values are split on whitespace, so runs of spaces inside a key
/// collapse to one after a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    verb: String,
    tokens: Vec<String>,
}

impl CommandLine {
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            tokens: Vec::new(),
        }
    }

    /// Append a positional field
    pub fn arg(mut self, value: impl fmt::Display) -> Self {
        self.tokens.push(value.to_string());
        self
    }

    /// Append the free-text key
    pub fn key(mut self, key: &str) -> Self {
        self.tokens.extend(key.split_whitespace().map(str::to_string));
        self
    }

    /// Append a sentinel and the value behind it
    pub fn value(mut self, sentinel: &str, value: impl fmt::Display) -> Self {
        self.tokens.push(sentinel.to_string());
        self.tokens
            .extend(value.to_string().split_whitespace().map(str::to_string));
        self
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Tokens after the verb
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_command(self) -> Command {
        Command {
            verb: self.verb,
            args: self.tokens,
        }
    }

    /// Line as sent through the host console (with the command prefix)
    pub fn console_line(&self) -> String {
        format!("{} {}", crate::command::CONSOLE_PREFIX, self)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.verb)?;
        for token in &self.tokens {
            write!(f, " {}", token)?;
        }
        Ok(())
    }
}
