//! Single-elimination bracket generation and winner propagation.
//!
//! Round 1 pairs the seeded participants two by two, an odd participant out
//! gets a bye. Every later round has half as many matches (rounded up) as the
//! round before it, down to the final.
//!
//! The winner of round `r` match `i` (0-based) moves into round `r + 1`
//! match `i / 2`, slot 1 for even `i` and slot 2 for odd `i`. A match with a
//! single feeder can never get an opponent, so it is completed as a bye as
//! soon as its player arrives. Round 1 byes are pushed forward while the
//! bracket is generated.

use super::models::{ParticipantId, Slot};
use serde::{Deserialize, Serialize};

/// One bracket match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Round number (1-indexed)
    pub round: u32,
    pub player1: Option<ParticipantId>,
    pub player2: Option<ParticipantId>,
    /// Always one of the two players once completed
    pub winner: Option<ParticipantId>,
    pub completed: bool,
}

impl Match {
    /// Placeholder waiting for earlier rounds
    pub fn pending(round: u32) -> Self {
        Self {
            round,
            player1: None,
            player2: None,
            winner: None,
            completed: false,
        }
    }

    /// Match between two known players
    pub fn pairing(round: u32, player1: ParticipantId, player2: ParticipantId) -> Self {
        Self {
            round,
            player1: Some(player1),
            player2: Some(player2),
            winner: None,
            completed: false,
        }
    }

    /// Automatic advance of a player without opponent
    pub fn bye(round: u32, player: ParticipantId) -> Self {
        Self {
            round,
            player1: Some(player),
            player2: None,
            winner: Some(player),
            completed: true,
        }
    }

    /// Player assigned to a slot
    pub fn player(&self, slot: Slot) -> Option<ParticipantId> {
        match slot {
            Slot::First => self.player1,
            Slot::Second => self.player2,
        }
    }

    /// Slot the winner played in
    pub fn winner_slot(&self) -> Option<Slot> {
        let winner = self.winner?;
        if self.player1 == Some(winner) {
            Some(Slot::First)
        } else if self.player2 == Some(winner) {
            Some(Slot::Second)
        } else {
            None
        }
    }

    /// Completed without a second player
    pub fn is_bye(&self) -> bool {
        self.completed && self.player2.is_none()
    }

    /// Whether `id` plays in this match
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.player1 == Some(id) || self.player2 == Some(id)
    }

    fn assign(&mut self, slot: Slot, player: ParticipantId) {
        match slot {
            Slot::First => self.player1 = Some(player),
            Slot::Second => self.player2 = Some(player),
        }
    }
}

/// Rounds of matches, round 1 first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    rounds: Vec<Vec<Match>>,
}

impl Bracket {
    /// Build the full bracket from participants in seeding order
    ///
    /// Callers make sure there are at least two participants. Fewer than
    /// that yields an empty bracket (none) or a lone bye (one).
    pub fn generate(participants: &[ParticipantId]) -> Self {
        if participants.is_empty() {
            return Self::default();
        }

        let first_round: Vec<Match> = participants
            .chunks(2)
            .map(|pair| match pair.get(1) {
                Some(&player2) => Match::pairing(1, pair[0], player2),
                None => Match::bye(1, pair[0]),
            })
            .collect();

        let mut rounds = vec![first_round];
        loop {
            let previous = rounds.last().map_or(0, Vec::len);
            if previous <= 1 {
                break;
            }
            let round = rounds.len() as u32 + 1;
            rounds.push(
                (0..previous.div_ceil(2))
                    .map(|_| Match::pending(round))
                    .collect(),
            );
        }

        let mut bracket = Self { rounds };

        let byes: Vec<(usize, ParticipantId)> = bracket.rounds[0]
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_bye())
            .filter_map(|(index, m)| m.winner.map(|winner| (index, winner)))
            .collect();
        for (index, winner) in byes {
            bracket.advance(1, index, winner);
        }

        bracket
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Number of rounds, the last one being the final
    pub fn round_count(&self) -> u32 {
        self.rounds.len() as u32
    }

    /// Matches of a round (1-indexed)
    pub fn round(&self, round: u32) -> Option<&[Match]> {
        let index = round.checked_sub(1)?;
        self.rounds.get(index as usize).map(Vec::as_slice)
    }

    /// Iterate `(round number, matches)` in order
    pub fn rounds(&self) -> impl Iterator<Item = (u32, &[Match])> {
        self.rounds
            .iter()
            .enumerate()
            .map(|(index, matches)| (index as u32 + 1, matches.as_slice()))
    }

    /// Match by round and 1-indexed match number
    pub fn get(&self, round: u32, match_number: usize) -> Option<&Match> {
        let index = match_number.checked_sub(1)?;
        self.round(round)?.get(index)
    }

    /// The single match of the last round
    pub fn final_match(&self) -> Option<&Match> {
        self.rounds.last().and_then(|matches| matches.first())
    }

    /// Winner of the final, once it is completed
    pub fn champion(&self) -> Option<ParticipantId> {
        self.final_match()
            .filter(|m| m.completed)
            .and_then(|m| m.winner)
    }

    /// Lowest round that still has an undecided match
    pub fn current_round(&self) -> u32 {
        self.rounds()
            .find(|(_, matches)| matches.iter().any(|m| !m.completed))
            .map_or(self.round_count(), |(round, _)| round)
    }

    /// Number of matches that still need a result
    pub fn open_matches(&self) -> usize {
        self.rounds.iter().flatten().filter(|m| !m.completed).count()
    }

    /// Complete a match with the player in `slot` as winner and propagate
    ///
    /// Returns the winner and the loser (if any). Validation is the caller's
    /// job, this only refuses a missing match or an empty slot.
    pub(crate) fn record(
        &mut self,
        round: u32,
        match_number: usize,
        slot: Slot,
    ) -> Option<(ParticipantId, Option<ParticipantId>)> {
        let index = match_number.checked_sub(1)?;
        let target = self.match_mut(round, index)?;
        let winner = target.player(slot)?;
        let loser = target.player(slot.other());

        target.winner = Some(winner);
        target.completed = true;
        self.advance(round, index, winner);

        Some((winner, loser))
    }

    fn match_mut(&mut self, round: u32, index: usize) -> Option<&mut Match> {
        let round_index = round.checked_sub(1)?;
        self.rounds.get_mut(round_index as usize)?.get_mut(index)
    }

    /// Move the winner of `round` match `index` (0-based) into the next round
    fn advance(&mut self, round: u32, index: usize, winner: ParticipantId) {
        let feeders = self.round(round).map_or(0, <[Match]>::len);
        let next_index = index / 2;
        let Some(next) = self.match_mut(round + 1, next_index) else {
            return;
        };

        next.assign(Slot::for_feeder(index), winner);

        let single_feeder = index % 2 == 0 && index + 1 >= feeders;
        if single_feeder && !next.completed {
            next.winner = Some(winner);
            next.completed = true;
            log::debug!(
                "Participant {} advances through a bye in round {}",
                winner,
                round + 1
            );
            self.advance(round + 1, next_index, winner);
        }
    }
}
