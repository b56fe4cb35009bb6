//! Tournament state transitions and match reporting.
//!
//! Every operation validates first and mutates last, a failed call leaves the
//! tournament untouched.

use super::bracket::{Bracket, Match};
use super::errors::{TournamentError, TournamentResult};
use super::models::{
    CloseOutcome, MIN_PARTICIPANTS, Participant, ParticipantId, Slot, Tournament,
    TournamentListing, TournamentStatus, TournamentSummary,
};
use super::seeding::Seeder;
use chrono::Utc;

impl Tournament {
    /// Register a participant
    pub fn join(&mut self, participant: Participant) -> TournamentResult<()> {
        self.ensure_registering()?;

        if self.participant(participant.id).is_some() {
            return Err(TournamentError::AlreadyJoined(participant.id));
        }

        if self.is_full() {
            return Err(TournamentError::Full {
                max: self.max_participants,
            });
        }

        self.participants.push(participant);
        Ok(())
    }

    /// Unregister a participant before the start
    pub fn leave(&mut self, participant_id: ParticipantId) -> TournamentResult<Participant> {
        self.ensure_registering()?;

        let position = self
            .participants
            .iter()
            .position(|p| p.id == participant_id)
            .ok_or(TournamentError::NotParticipant(participant_id))?;

        Ok(self.participants.remove(position))
    }

    /// Shuffle the participants and generate the bracket
    pub fn start(&mut self, requester_id: ParticipantId, seeder: &mut Seeder) -> TournamentResult<()> {
        self.ensure_creator(requester_id)?;
        self.ensure_registering()?;

        if self.participants.len() < MIN_PARTICIPANTS {
            return Err(TournamentError::InsufficientParticipants {
                needed: MIN_PARTICIPANTS,
                current: self.participants.len(),
            });
        }

        seeder.shuffle(&mut self.participants);
        let seeding: Vec<ParticipantId> = self.participants.iter().map(|p| p.id).collect();

        self.bracket = Bracket::generate(&seeding);
        self.status = TournamentStatus::Active;
        self.current_round = 1;
        self.started_at = Some(Utc::now());

        Ok(())
    }

    /// Record the winner of a match
    ///
    /// # Arguments
    ///
    /// * `caller_id` - Reporting user, must play in the match or own the tournament
    /// * `round` - Round number (1-indexed)
    /// * `match_number` - Match number within the round (1-indexed)
    /// * `winner` - Slot of the winning player
    ///
    /// # Returns
    ///
    /// * `TournamentResult<Match>` - The completed match
    pub fn report_result(
        &mut self,
        caller_id: ParticipantId,
        round: u32,
        match_number: usize,
        winner: Slot,
    ) -> TournamentResult<Match> {
        if self.status == TournamentStatus::Finished {
            return Err(TournamentError::TournamentFinished);
        }

        let target = self
            .bracket
            .get(round, match_number)
            .ok_or(TournamentError::MatchNotFound {
                round,
                match_number,
            })?;

        if !target.involves(caller_id) && caller_id != self.creator_id {
            return Err(TournamentError::Unauthorized(caller_id));
        }

        if target.completed {
            return Err(TournamentError::AlreadyReported {
                round,
                match_number,
            });
        }

        // A result needs both players; the opponent may still be undecided
        for slot in [winner, winner.other()] {
            if target.player(slot).is_none() {
                return Err(TournamentError::EmptySlot { slot });
            }
        }

        let (winner_id, loser_id) = self
            .bracket
            .record(round, match_number, winner)
            .ok_or(TournamentError::MatchNotFound {
                round,
                match_number,
            })?;

        for participant in &mut self.participants {
            if participant.id == winner_id {
                participant.wins += 1;
            } else if Some(participant.id) == loser_id {
                participant.losses += 1;
            }
        }
        self.current_round = self.bracket.current_round();

        log::info!(
            "Tournament '{}': round {} match {} won by {}",
            self.name,
            round,
            match_number,
            winner_id
        );

        self.bracket
            .get(round, match_number)
            .cloned()
            .ok_or(TournamentError::MatchNotFound {
                round,
                match_number,
            })
    }

    /// Finish the tournament and name the champion, if decided
    pub fn close(&mut self, requester_id: ParticipantId) -> TournamentResult<CloseOutcome> {
        self.ensure_creator(requester_id)?;

        if self.status != TournamentStatus::Finished {
            self.status = TournamentStatus::Finished;
            self.finished_at = Some(Utc::now());
        }

        Ok(CloseOutcome {
            name: self.name.clone(),
            champion: self.champion().cloned(),
        })
    }

    /// Winner of the final
    pub fn champion(&self) -> Option<&Participant> {
        self.bracket
            .champion()
            .and_then(|id| self.participant(id))
    }

    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            current_round: self.current_round,
            max_participants: self.max_participants,
            creator_id: self.creator_id,
            participants: self.participants.clone(),
        }
    }

    pub fn listing(&self) -> TournamentListing {
        TournamentListing {
            name: self.name.clone(),
            status: self.status,
            participant_count: self.participants.len(),
            max_participants: self.max_participants,
        }
    }

    fn ensure_registering(&self) -> TournamentResult<()> {
        if self.status != TournamentStatus::Registration {
            return Err(TournamentError::NotRegistering {
                actual: self.status,
            });
        }
        Ok(())
    }

    fn ensure_creator(&self, requester_id: ParticipantId) -> TournamentResult<()> {
        if requester_id != self.creator_id {
            return Err(TournamentError::Unauthorized(requester_id));
        }
        Ok(())
    }
}
