//! Tournament error types.

use super::models::{ParticipantId, Slot, TournamentStatus};
use thiserror::Error;

/// Tournament errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// No tournament is registered under this name
    #[error("Tournament not found: {0}")]
    TournamentNotFound(String),

    /// Round or match number outside the bracket
    #[error("Match not found: round {round}, match {match_number}")]
    MatchNotFound { round: u32, match_number: usize },

    /// User is not registered in the tournament
    #[error("User {0} is not a participant")]
    NotParticipant(ParticipantId),

    /// Another tournament already uses this name
    #[error("Tournament already exists: {0}")]
    DuplicateName(String),

    /// Participant cap below the minimum of two
    #[error("Invalid tournament size {0}: at least 2 participants required")]
    InvalidSize(usize),

    /// Registration is closed
    #[error("Tournament is not accepting registrations (status: {actual})")]
    NotRegistering { actual: TournamentStatus },

    /// User already registered
    #[error("User {0} already joined")]
    AlreadyJoined(ParticipantId),

    /// No free places left
    #[error("Tournament is full ({max} participants)")]
    Full { max: usize },

    #[error("Insufficient participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    /// Caller may not perform this operation
    #[error("User {0} is not allowed to do this")]
    Unauthorized(ParticipantId),

    /// Result for this match is already recorded
    #[error("Result already reported: round {round}, match {match_number}")]
    AlreadyReported { round: u32, match_number: usize },

    /// Chosen winner slot holds nobody
    #[error("Slot {slot} of this match is empty")]
    EmptySlot { slot: Slot },

    /// Results are frozen once the tournament is closed
    #[error("Tournament is finished")]
    TournamentFinished,

    /// Stored tournament contradicts itself
    #[error("Invalid tournament record '{name}': {reason}")]
    InvalidRecord { name: String, reason: String },
}

impl TournamentError {
    /// Get the message shown to chat users.
    ///
    /// User ids are left out, the reply already goes to the user concerned.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::TournamentNotFound(_) => {
                "Tournament not found! Use `tournaments` to see the list of tournaments.".to_string()
            }
            TournamentError::MatchNotFound { .. } => "Match not found!".to_string(),
            TournamentError::NotParticipant(_) => {
                "You are not registered in this tournament!".to_string()
            }
            TournamentError::DuplicateName(_) => {
                "A tournament with this name already exists!".to_string()
            }
            TournamentError::InvalidSize(_) => "The minimum number of participants is 2!".to_string(),
            TournamentError::NotRegistering { actual } => match actual {
                TournamentStatus::Registration => "Registration is open.".to_string(),
                TournamentStatus::Active => "The tournament has already started!".to_string(),
                TournamentStatus::Finished => "The tournament is already finished!".to_string(),
            },
            TournamentError::AlreadyJoined(_) => {
                "You are already registered in this tournament!".to_string()
            }
            TournamentError::Full { .. } => "The tournament is already full!".to_string(),
            TournamentError::InsufficientParticipants { needed, current } => format!(
                "Not enough participants to start the tournament ({current}/{needed})!"
            ),
            TournamentError::Unauthorized(_) => {
                "You are not allowed to do this for this tournament!".to_string()
            }
            TournamentError::AlreadyReported { .. } => {
                "The result of this match has already been recorded!".to_string()
            }
            TournamentError::EmptySlot { slot } => {
                format!("There is no player {} in this match!", slot)
            }
            TournamentError::TournamentFinished => {
                "The tournament is already finished!".to_string()
            }
            TournamentError::InvalidRecord { .. } => "Tournament data is damaged!".to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
