//! Tournament data models for single-elimination tournaments.

use super::bracket::{Bracket, Match};
use super::errors::{TournamentError, TournamentResult};
use super::render::BracketView;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// Platform user id of a participant
pub type ParticipantId = u64;

/// Smallest tournament that can be played
pub const MIN_PARTICIPANTS: usize = 2;

/// Tournament status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    /// Accepting registrations
    Registration,
    /// Bracket generated, matches being played
    Active,
    /// Closed by the creator
    Finished,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentStatus::Registration => write!(f, "registration"),
            TournamentStatus::Active => write!(f, "active"),
            TournamentStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Player slot of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    /// The opposite slot
    pub fn other(self) -> Self {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }

    /// Slot a winner of the given 0-based feeder match lands in
    pub fn for_feeder(index: usize) -> Self {
        if index % 2 == 0 { Slot::First } else { Slot::Second }
    }
}

impl TryFrom<u8> for Slot {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Slot::First),
            2 => Ok(Slot::Second),
            other => Err(other),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::First => write!(f, "1"),
            Slot::Second => write!(f, "2"),
        }
    }
}

/// Tournament participant with running statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Platform user id
    pub id: ParticipantId,
    /// Display name at join time
    pub name: String,
    /// Matches won
    pub wins: u32,
    /// Matches lost
    pub losses: u32,
}

impl Participant {
    /// Create a participant with a clean record
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            wins: 0,
            losses: 0,
        }
    }
}

/// Parameters of a tournament to be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTournament {
    /// Unique tournament name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Participant cap
    pub max_participants: usize,
    /// User that created the tournament
    pub creator_id: ParticipantId,
    /// Channel the tournament was announced in
    pub channel_id: Option<u64>,
}

impl NewTournament {
    pub fn new(name: impl Into<String>, max_participants: usize, creator_id: ParticipantId) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            max_participants,
            creator_id,
            channel_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn in_channel(mut self, channel_id: u64) -> Self {
        self.channel_id = Some(channel_id);
        self
    }
}

/// Tournament record
///
/// Fields are private so the lifecycle methods stay the only way to change
/// status, participants and bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub(super) name: String,
    pub(super) description: String,
    pub(super) max_participants: usize,
    pub(super) participants: Vec<Participant>,
    pub(super) status: TournamentStatus,
    pub(super) creator_id: ParticipantId,
    pub(super) channel_id: Option<u64>,
    pub(super) current_round: u32,
    pub(super) bracket: Bracket,
    pub(super) created_at: DateTime<Utc>,
    pub(super) started_at: Option<DateTime<Utc>>,
    pub(super) finished_at: Option<DateTime<Utc>>,
    /// Creation order within the registry
    #[serde(default)]
    pub(super) sequence: u64,
}

impl Tournament {
    /// Create a tournament in registration
    pub fn new(params: NewTournament) -> TournamentResult<Self> {
        if params.max_participants < MIN_PARTICIPANTS {
            return Err(TournamentError::InvalidSize(params.max_participants));
        }

        Ok(Self {
            name: params.name,
            description: params.description,
            max_participants: params.max_participants,
            participants: Vec::new(),
            status: TournamentStatus::Registration,
            creator_id: params.creator_id,
            channel_id: params.channel_id,
            current_round: 0,
            bracket: Bracket::default(),
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
            sequence: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn max_participants(&self) -> usize {
        self.max_participants
    }

    /// Participants in join order, or seeding order once started
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    pub fn creator_id(&self) -> ParticipantId {
        self.creator_id
    }

    pub fn channel_id(&self) -> Option<u64> {
        self.channel_id
    }

    /// Lowest round with an undecided match; 0 before the start
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn bracket(&self) -> &Bracket {
        &self.bracket
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Whether the registered participant count reached the cap
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants
    }

    /// Check the invariants `new`, `join` and `start` maintain
    ///
    /// Used on records that did not go through those operations, such as
    /// tournaments read back from a snapshot.
    pub fn validate(&self) -> TournamentResult<()> {
        if self.max_participants < MIN_PARTICIPANTS {
            return Err(TournamentError::InvalidSize(self.max_participants));
        }

        if self.participants.len() > self.max_participants {
            return Err(TournamentError::Full {
                max: self.max_participants,
            });
        }

        let mut ids = HashSet::with_capacity(self.participants.len());
        if let Some(duplicate) = self.participants.iter().find(|p| !ids.insert(p.id)) {
            return Err(TournamentError::AlreadyJoined(duplicate.id));
        }

        match self.status {
            TournamentStatus::Registration if !self.bracket.is_empty() => {
                return Err(self.invalid_record("bracket present during registration"));
            }
            TournamentStatus::Active if self.bracket.is_empty() => {
                return Err(self.invalid_record("active without a bracket"));
            }
            _ => {}
        }

        let strangers = self
            .bracket
            .rounds()
            .flat_map(|(_, matches)| matches)
            .flat_map(|m| [m.player1, m.player2, m.winner])
            .flatten()
            .any(|id| !ids.contains(&id));
        if strangers {
            return Err(self.invalid_record("bracket references unknown participants"));
        }

        Ok(())
    }

    fn invalid_record(&self, reason: &str) -> TournamentError {
        TournamentError::InvalidRecord {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Read-only projection of a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub name: String,
    pub description: String,
    pub status: TournamentStatus,
    pub current_round: u32,
    pub max_participants: usize,
    pub creator_id: ParticipantId,
    /// Win/loss table
    pub participants: Vec<Participant>,
}

/// One row of the tournament list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentListing {
    pub name: String,
    pub status: TournamentStatus,
    pub participant_count: usize,
    pub max_participants: usize,
}

/// Result of closing a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseOutcome {
    pub name: String,
    /// Winner of the final, `None` when it was never decided
    pub champion: Option<Participant>,
}

/// Reported match together with the bracket it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub completed: Match,
    pub winner: Option<Participant>,
    pub bracket: BracketView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tournament_rejects_single_participant_cap() {
        let err = Tournament::new(NewTournament::new("Cup", 1, 7)).unwrap_err();
        assert_eq!(err, TournamentError::InvalidSize(1));
    }

    #[test]
    fn test_new_tournament_starts_in_registration() {
        let tournament = Tournament::new(
            NewTournament::new("Cup", 8, 7)
                .with_description("Annual cup")
                .in_channel(99),
        )
        .unwrap();

        assert_eq!(tournament.status(), TournamentStatus::Registration);
        assert_eq!(tournament.description(), "Annual cup");
        assert_eq!(tournament.channel_id(), Some(99));
        assert_eq!(tournament.current_round(), 0);
        assert!(tournament.bracket().is_empty());
        assert!(tournament.participants().is_empty());
    }

    fn registering(max: usize, ids: &[ParticipantId]) -> Tournament {
        let mut tournament = Tournament::new(NewTournament::new("Cup", max, 7)).unwrap();
        tournament.participants = ids
            .iter()
            .map(|&id| Participant::new(id, format!("P{}", id)))
            .collect();
        tournament
    }

    #[test]
    fn test_validate_accepts_consistent_records() {
        assert_eq!(registering(4, &[1, 2, 3]).validate(), Ok(()));

        let mut started = registering(4, &[1, 2, 3]);
        started.bracket = Bracket::generate(&[1, 2, 3]);
        started.status = TournamentStatus::Active;
        assert_eq!(started.validate(), Ok(()));

        let mut closed_early = registering(4, &[1]);
        closed_early.status = TournamentStatus::Finished;
        assert_eq!(closed_early.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        let mut tournament = registering(2, &[]);
        tournament.max_participants = 1;
        assert_eq!(tournament.validate(), Err(TournamentError::InvalidSize(1)));

        let over_cap = registering(2, &[1, 2, 3]);
        assert_eq!(over_cap.validate(), Err(TournamentError::Full { max: 2 }));
    }

    #[test]
    fn test_validate_rejects_duplicate_participants() {
        let tournament = registering(8, &[10, 20, 10, 30]);
        assert_eq!(
            tournament.validate(),
            Err(TournamentError::AlreadyJoined(10))
        );
    }

    #[test]
    fn test_validate_rejects_bracket_status_mismatch() {
        let mut early = registering(4, &[1, 2]);
        early.bracket = Bracket::generate(&[1, 2]);
        assert!(matches!(
            early.validate(),
            Err(TournamentError::InvalidRecord { .. })
        ));

        let mut empty = registering(4, &[1, 2]);
        empty.status = TournamentStatus::Active;
        assert!(matches!(
            empty.validate(),
            Err(TournamentError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_bracket_players() {
        let mut tournament = registering(4, &[1, 2]);
        tournament.bracket = Bracket::generate(&[1, 99]);
        tournament.status = TournamentStatus::Active;
        assert!(matches!(
            tournament.validate(),
            Err(TournamentError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_slot_parsing() {
        assert_eq!(Slot::try_from(1), Ok(Slot::First));
        assert_eq!(Slot::try_from(2), Ok(Slot::Second));
        assert_eq!(Slot::try_from(3), Err(3));
        assert_eq!(Slot::try_from(0), Err(0));
    }

    #[test]
    fn test_slot_for_feeder() {
        assert_eq!(Slot::for_feeder(0), Slot::First);
        assert_eq!(Slot::for_feeder(1), Slot::Second);
        assert_eq!(Slot::for_feeder(4), Slot::First);
        assert_eq!(Slot::First.other(), Slot::Second);
    }

    #[test]
    fn test_status_order_is_forward_only() {
        assert!(TournamentStatus::Registration < TournamentStatus::Active);
        assert!(TournamentStatus::Active < TournamentStatus::Finished);
    }
}
