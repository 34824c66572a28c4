//! User-facing commands emitted by the presentation surface.

use crate::model::task::{Filter, TaskId, UnknownFilter};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One user interaction routed to the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(TaskId),
    Delete(TaskId),
    ClearCompleted,
    SetFilter(Filter),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    Empty,
    UnknownVerb(String),
    MissingId(&'static str),
    InvalidId(String),
    Filter(UnknownFilter),
}

impl Display for CommandParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownVerb(verb) => write!(f, "unknown command `{verb}`"),
            Self::MissingId(verb) => write!(f, "`{verb}` needs a task id"),
            Self::InvalidId(value) => write!(f, "invalid task id `{value}`"),
            Self::Filter(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Filter(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UnknownFilter> for CommandParseError {
    fn from(value: UnknownFilter) -> Self {
        Self::Filter(value)
    }
}

impl Command {
    /// Parses `add <text>`, `toggle <id>`, `delete <id>`, `clear` and
    /// `filter <all|active|completed>`.
    ///
    /// `add` keeps the raw remainder; blank text is left to the store.
    pub fn parse(input: &str) -> Result<Self, CommandParseError> {
        let (verb, rest) = split_verb(input);

        match verb.as_str() {
            "" => Err(CommandParseError::Empty),
            "add" => Ok(Self::Add(rest.to_string())),
            "toggle" => parse_id("toggle", rest).map(Self::Toggle),
            "delete" | "rm" => parse_id("delete", rest).map(Self::Delete),
            "clear" => Ok(Self::ClearCompleted),
            "filter" => Ok(Self::SetFilter(rest.parse()?)),
            other => Err(CommandParseError::UnknownVerb(other.to_string())),
        }
    }
}

/// Splits input into a lowercased verb and the raw remainder after the
/// first whitespace character.
pub fn split_verb(input: &str) -> (String, &str) {
    let input = input.trim_start();
    let (verb, rest) = input
        .split_once(char::is_whitespace)
        .unwrap_or((input, ""));
    (verb.to_ascii_lowercase(), rest)
}

fn parse_id(verb: &'static str, rest: &str) -> Result<TaskId, CommandParseError> {
    let value = rest.trim();
    if value.is_empty() {
        return Err(CommandParseError::MissingId(verb));
    }
    value
        .parse()
        .map_err(|_| CommandParseError::InvalidId(value.to_string()))
}
