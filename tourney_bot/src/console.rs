//! Console transport: one chat message per stdin line.
//!
//! A line reads `<user_id> <display_name> <message>`, for example
//! `1001 Alice !join Summer Cup`. Display names are a single word.

use thiserror::Error;
use tourney::Caller;

/// Malformed console line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("Expected `<user_id> <display_name> <message>`")]
    MissingField,

    #[error("Invalid user id '{0}'")]
    InvalidUserId(String),
}

/// Chat message read from the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage<'a> {
    pub caller: Caller,
    pub content: &'a str,
}

/// Split a console line into caller and message content
pub fn parse_line(line: &str) -> Result<ConsoleMessage<'_>, ConsoleError> {
    let mut parts = line.trim().splitn(3, char::is_whitespace);

    let user_id = parts.next().filter(|s| !s.is_empty()).ok_or(ConsoleError::MissingField)?;
    let user_id = user_id
        .parse::<u64>()
        .map_err(|_| ConsoleError::InvalidUserId(user_id.to_string()))?;

    let display_name = parts.next().filter(|s| !s.is_empty()).ok_or(ConsoleError::MissingField)?;
    let content = parts.next().map(str::trim).unwrap_or_default();

    Ok(ConsoleMessage {
        caller: Caller::new(user_id, display_name),
        content,
    })
}

/// Command text after the prefix, none for ordinary chat
pub fn strip_prefix<'a>(content: &'a str, prefix: &str) -> Option<&'a str> {
    content
        .strip_prefix(prefix)
        .map(str::trim)
        .filter(|rest| !rest.is_empty())
}
