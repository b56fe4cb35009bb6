//! Chat command parsing.
//!
//! Input is the message text after the bot prefix, e.g. `report Cup 1 2 1`.
//! Every command keeps its long name, its short alias and its Russian alias.

use crate::tournament::Slot;
use std::fmt;

/// Command list shown by `help`
pub const HELP: &str = "\
Tournament commands:
  create_tournament (ct) <max> <name> [description]   Create a tournament
  join_tournament (join) <name>                        Join a tournament
  leave_tournament (leave) <name>                      Leave before the start
  start_tournament (start) <name>                      Start (creator only)
  report_score (report) <name> <round> <match> <1|2>   Report a match winner
  tournament_info (info) <name>                        Show status and standings
  end_tournament (end) <name>                          Finish (creator only)
  list_tournaments (tournaments)                       List all tournaments
  bracket <name>                                       Show the bracket
  help                                                 Show this help

Russian aliases: турнир, участник, выйти, начать, результат, турнир_инфо,
завершить, список, сетка";

/// Parsed tournament command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create {
        max_participants: usize,
        name: String,
        description: String,
    },
    Join {
        name: String,
    },
    Leave {
        name: String,
    },
    Start {
        name: String,
    },
    Report {
        name: String,
        round: u32,
        match_number: usize,
        winner: Slot,
    },
    Info {
        name: String,
    },
    End {
        name: String,
    },
    List,
    Bracket {
        name: String,
    },
    Help,
}

impl Command {
    /// Canonical command name, used in logs
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create_tournament",
            Command::Join { .. } => "join_tournament",
            Command::Leave { .. } => "leave_tournament",
            Command::Start { .. } => "start_tournament",
            Command::Report { .. } => "report_score",
            Command::Info { .. } => "tournament_info",
            Command::End { .. } => "end_tournament",
            Command::List => "list_tournaments",
            Command::Bracket { .. } => "bracket",
            Command::Help => "help",
        }
    }

    /// Whether a successful run changes registry state
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::Info { .. } | Command::List | Command::Bracket { .. } | Command::Help
        )
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Required argument absent; carries the usage line.
    MissingArgument(&'static str),
    /// Argument is not a valid positive number.
    InvalidNumber { argument: &'static str, value: String },
    /// Winner is neither 1 nor 2.
    InvalidWinner(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument(usage) => write!(f, "Missing argument. Usage: `{}`", usage),
            Self::InvalidNumber { argument, value } => write!(
                f,
                "Invalid {} '{}'. Must be a positive number",
                argument, value
            ),
            Self::InvalidWinner(value) => {
                write!(f, "Invalid winner '{}'. The winner number must be 1 or 2", value)
            }
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

const CREATE_USAGE: &str = "create_tournament <max> <name> [description]";
const REPORT_USAGE: &str = "report_score <name> <round> <match> <1|2>";

/// Parse a command string into a Command.
///
/// # Arguments
///
/// * `input` - Message text with the prefix already removed
///
/// # Returns
///
/// * `Ok(Command)` - Successfully parsed command
/// * `Err(ParseError)` - Parse error with descriptive message
///
/// # Examples
///
/// ```
/// use tourney::commands::{Command, parse_command};
///
/// assert!(matches!(parse_command("tournaments"), Ok(Command::List)));
/// assert!(matches!(
///     parse_command("join Summer Cup"),
///     Ok(Command::Join { name }) if name == "Summer Cup"
/// ));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let (keyword, rest) = split_word(trimmed);

    match keyword {
        "create_tournament" | "ct" | "турнир" => parse_create(rest),
        "join_tournament" | "join" | "участник" => Ok(Command::Join {
            name: required_name(rest, "join_tournament <name>")?,
        }),
        "leave_tournament" | "leave" | "выйти" => Ok(Command::Leave {
            name: required_name(rest, "leave_tournament <name>")?,
        }),
        "start_tournament" | "start" | "начать" => Ok(Command::Start {
            name: required_name(rest, "start_tournament <name>")?,
        }),
        "report_score" | "report" | "результат" => parse_report(rest),
        "tournament_info" | "info" | "турнир_инфо" => Ok(Command::Info {
            name: required_name(rest, "tournament_info <name>")?,
        }),
        "end_tournament" | "end" | "завершить" => Ok(Command::End {
            name: required_name(rest, "end_tournament <name>")?,
        }),
        "list_tournaments" | "tournaments" | "список" => Ok(Command::List),
        "bracket" | "сетка" => Ok(Command::Bracket {
            name: required_name(rest, "bracket <name>")?,
        }),
        "help" => Ok(Command::Help),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse "create_tournament <max> <name> [description]"
fn parse_create(rest: &str) -> Result<Command, ParseError> {
    let (max_participants, rest) = split_word(rest);
    let max_participants = parse_number(Some(max_participants), "participant count", CREATE_USAGE)?;
    let (name, description) = split_word(rest);
    let name = required_name(name, CREATE_USAGE)?;
    let description = description.to_string();

    Ok(Command::Create {
        max_participants,
        name,
        description,
    })
}

/// Parse "report_score <name> <round> <match> <1|2>"
fn parse_report(rest: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = rest.split_ascii_whitespace().collect();
    let name = required_name(parts.first().copied().unwrap_or_default(), REPORT_USAGE)?;
    let round = parse_number(parts.get(1).copied(), "round number", REPORT_USAGE)?;
    let match_number = parse_number(parts.get(2).copied(), "match number", REPORT_USAGE)?;

    let winner = parts
        .get(3)
        .copied()
        .ok_or(ParseError::MissingArgument(REPORT_USAGE))?;
    let winner = winner
        .parse::<u8>()
        .ok()
        .and_then(|value| Slot::try_from(value).ok())
        .ok_or_else(|| ParseError::InvalidWinner(winner.to_string()))?;

    Ok(Command::Report {
        name,
        round,
        match_number,
        winner,
    })
}

/// Split off the first word, trimming what remains
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    input
        .split_once(char::is_whitespace)
        .map_or((input, ""), |(word, rest)| (word, rest.trim()))
}

fn required_name(value: &str, usage: &'static str) -> Result<String, ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseError::MissingArgument(usage));
    }
    Ok(value.to_string())
}

fn parse_number<T: std::str::FromStr>(
    value: Option<&str>,
    argument: &'static str,
    usage: &'static str,
) -> Result<T, ParseError> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or(ParseError::MissingArgument(usage))?;
    value.parse().map_err(|_| ParseError::InvalidNumber {
        argument,
        value: value.to_string(),
    })
}
