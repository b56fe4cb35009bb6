//! Round-by-round bracket view.

use super::bracket::Match;
use super::models::{ParticipantId, Slot, Tournament};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown for a slot still waiting for an earlier result
pub const PENDING_MARKER: &str = "???";
/// Shown for the missing opponent of a bye
pub const BYE_MARKER: &str = "BYE";
/// Placed after a decided winner
pub const WINNER_MARKER: &str = "👑";

/// Content of one player slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotView {
    Player(String),
    Pending,
    Bye,
}

impl fmt::Display for SlotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotView::Player(name) => write!(f, "{}", name),
            SlotView::Pending => write!(f, "{}", PENDING_MARKER),
            SlotView::Bye => write!(f, "{}", BYE_MARKER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    /// Match number within the round (1-indexed)
    pub number: usize,
    pub player1: SlotView,
    pub player2: SlotView,
    pub winner: Option<Slot>,
}

impl fmt::Display for MatchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = |slot| {
            if self.winner == Some(slot) {
                format!(" {}", WINNER_MARKER)
            } else {
                String::new()
            }
        };
        write!(
            f,
            "Match {}: {}{} vs {}{}",
            self.number,
            self.player1,
            marker(Slot::First),
            self.player2,
            marker(Slot::Second)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    pub round: u32,
    pub matches: Vec<MatchView>,
}

/// Whole bracket ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketView {
    pub name: String,
    pub rounds: Vec<RoundView>,
}

impl BracketView {
    pub fn of(tournament: &Tournament) -> Self {
        let name_of = |id: Option<ParticipantId>| match id {
            Some(id) => SlotView::Player(
                tournament
                    .participant(id)
                    .map_or_else(|| format!("#{}", id), |p| p.name.clone()),
            ),
            None => SlotView::Pending,
        };

        let match_view = |number: usize, m: &Match| MatchView {
            number,
            player1: name_of(m.player1),
            player2: if m.is_bye() {
                SlotView::Bye
            } else {
                name_of(m.player2)
            },
            winner: m.winner_slot(),
        };

        let rounds = tournament
            .bracket()
            .rounds()
            .map(|(round, matches)| RoundView {
                round,
                matches: matches
                    .iter()
                    .enumerate()
                    .map(|(index, m)| match_view(index + 1, m))
                    .collect(),
            })
            .collect();

        Self {
            name: tournament.name().to_string(),
            rounds,
        }
    }
}

impl fmt::Display for BracketView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bracket: {}", self.name)?;
        if self.rounds.is_empty() {
            return write!(f, "No matches yet");
        }
        for (position, round) in self.rounds.iter().enumerate() {
            if position > 0 {
                writeln!(f)?;
            }
            write!(f, "Round {}", round.round)?;
            for m in &round.matches {
                write!(f, "\n  {}", m)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::models::{NewTournament, Participant};
    use crate::tournament::seeding::Seeder;

    fn started(names: &[&str]) -> Tournament {
        let mut tournament = Tournament::new(NewTournament::new("Cup", 8, 99)).unwrap();
        for (id, name) in names.iter().enumerate() {
            tournament
                .join(Participant::new(id as u64 + 1, *name))
                .unwrap();
        }
        tournament.start(99, &mut Seeder::from_seed(3)).unwrap();
        tournament
    }

    #[test]
    fn test_registration_has_no_rounds() {
        let tournament = Tournament::new(NewTournament::new("Cup", 4, 1)).unwrap();
        let view = BracketView::of(&tournament);

        assert!(view.rounds.is_empty());
        assert!(view.to_string().contains("No matches yet"));
    }

    #[test]
    fn test_pending_slots_render_as_question_marks() {
        let tournament = started(&["A", "B", "C", "D"]);
        let view = BracketView::of(&tournament);

        assert_eq!(view.rounds.len(), 2);
        let final_match = &view.rounds[1].matches[0];
        assert_eq!(final_match.player1, SlotView::Pending);
        assert_eq!(final_match.player2, SlotView::Pending);
        assert_eq!(final_match.to_string(), "Match 1: ??? vs ???");
    }

    #[test]
    fn test_bye_renders_marker_and_winner() {
        let tournament = started(&["A", "B", "C"]);
        let view = BracketView::of(&tournament);

        let bye = &view.rounds[0].matches[1];
        assert_eq!(bye.player2, SlotView::Bye);
        assert_eq!(bye.winner, Some(Slot::First));
        assert!(bye.to_string().ends_with("👑 vs BYE"));

        // The bye winner is already waiting in the final
        let final_match = &view.rounds[1].matches[0];
        assert_eq!(final_match.player1, SlotView::Pending);
        assert!(matches!(final_match.player2, SlotView::Player(_)));
    }

    #[test]
    fn test_text_lists_every_round() {
        let tournament = started(&["A", "B", "C", "D", "E"]);
        let text = BracketView::of(&tournament).to_string();

        assert!(text.starts_with("Bracket: Cup"));
        assert!(text.contains("Round 1"));
        assert!(text.contains("Round 2"));
        assert!(text.contains("Round 3"));
        assert_eq!(text.matches("Match ").count(), 3 + 2 + 1);
    }
}
