//! Tournament registry keyed by tournament name.

use super::bracket::Match;
use super::errors::{TournamentError, TournamentResult};
use super::models::{
    CloseOutcome, NewTournament, Participant, ParticipantId, ReportOutcome, Slot, Tournament,
    TournamentListing, TournamentSummary,
};
use super::render::BracketView;
use super::seeding::Seeder;
use super::store::RegistrySnapshot;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

struct RegistryState {
    tournaments: HashMap<String, Tournament>,
    seeder: Seeder,
    next_sequence: u64,
}

/// Tournament registry
///
/// Cheap to clone, every clone shares the same tournaments. Mutations run
/// under the write lock from validation to the last write, so two reports
/// racing for one match cannot both succeed.
#[derive(Clone)]
pub struct TournamentRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl TournamentRegistry {
    /// Create an empty registry seeding brackets from OS entropy
    pub fn new() -> Self {
        Self::with_seeder(Seeder::new())
    }

    /// Create an empty registry with a given seeder
    pub fn with_seeder(seeder: Seeder) -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState {
                tournaments: HashMap::new(),
                seeder,
                next_sequence: 0,
            })),
        }
    }

    /// Restore a registry from a snapshot
    ///
    /// Creation order follows the snapshot order. Every tournament is
    /// validated; the first broken record or repeated name rejects the whole
    /// snapshot.
    pub fn from_snapshot(snapshot: RegistrySnapshot, seeder: Seeder) -> TournamentResult<Self> {
        let mut tournaments = HashMap::with_capacity(snapshot.tournaments.len());
        let mut next_sequence = 0;

        for mut tournament in snapshot.tournaments {
            tournament.validate()?;
            if tournaments.contains_key(tournament.name()) {
                return Err(TournamentError::DuplicateName(tournament.name().to_string()));
            }

            tournament.sequence = next_sequence;
            next_sequence += 1;
            tournaments.insert(tournament.name().to_string(), tournament);
        }

        Ok(Self {
            state: Arc::new(RwLock::new(RegistryState {
                tournaments,
                seeder,
                next_sequence,
            })),
        })
    }

    /// Copy of every tournament, oldest first
    pub async fn snapshot(&self) -> RegistrySnapshot {
        let state = self.state.read().await;
        let mut tournaments: Vec<Tournament> = state.tournaments.values().cloned().collect();
        tournaments.sort_by_key(|t| t.sequence);
        RegistrySnapshot { tournaments }
    }

    /// Create a new tournament
    pub async fn create(&self, params: NewTournament) -> TournamentResult<TournamentSummary> {
        let mut state = self.state.write().await;

        if state.tournaments.contains_key(&params.name) {
            return Err(TournamentError::DuplicateName(params.name));
        }

        let mut tournament = Tournament::new(params)?;
        tournament.sequence = state.next_sequence;
        state.next_sequence += 1;

        let summary = tournament.summary();
        log::info!(
            "Created tournament '{}' for up to {} participants",
            summary.name,
            summary.max_participants
        );
        state
            .tournaments
            .insert(summary.name.clone(), tournament);

        Ok(summary)
    }

    /// Register a participant
    ///
    /// # Returns
    ///
    /// * `TournamentResult<TournamentListing>` - Updated participant count
    pub async fn join(
        &self,
        name: &str,
        participant: Participant,
    ) -> TournamentResult<TournamentListing> {
        let mut state = self.state.write().await;
        let tournament = find_mut(&mut state.tournaments, name)?;

        let participant_id = participant.id;
        tournament.join(participant)?;
        log::info!("User {} joined tournament '{}'", participant_id, name);

        Ok(tournament.listing())
    }

    /// Unregister a participant before the start
    pub async fn leave(
        &self,
        name: &str,
        participant_id: ParticipantId,
    ) -> TournamentResult<Participant> {
        let mut state = self.state.write().await;
        let tournament = find_mut(&mut state.tournaments, name)?;

        let participant = tournament.leave(participant_id)?;
        log::info!("User {} left tournament '{}'", participant_id, name);

        Ok(participant)
    }

    /// Seed participants and generate the bracket
    pub async fn start(
        &self,
        name: &str,
        requester_id: ParticipantId,
    ) -> TournamentResult<TournamentSummary> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let tournament = find_mut(&mut state.tournaments, name)?;

        tournament.start(requester_id, &mut state.seeder)?;
        log::info!(
            "Started tournament '{}' with {} participants over {} rounds",
            name,
            tournament.participants().len(),
            tournament.bracket().round_count()
        );

        Ok(tournament.summary())
    }

    /// Record the winner of a match
    pub async fn report_result(
        &self,
        name: &str,
        caller_id: ParticipantId,
        round: u32,
        match_number: usize,
        winner: Slot,
    ) -> TournamentResult<Match> {
        let mut state = self.state.write().await;
        let tournament = find_mut(&mut state.tournaments, name)?;

        tournament.report_result(caller_id, round, match_number, winner)
    }

    /// Record the winner of a match and render the resulting bracket
    ///
    /// Both happen under one write lock, so the view shows exactly this
    /// report and nothing that landed after it.
    pub async fn report_and_render(
        &self,
        name: &str,
        caller_id: ParticipantId,
        round: u32,
        match_number: usize,
        winner: Slot,
    ) -> TournamentResult<ReportOutcome> {
        let mut state = self.state.write().await;
        let tournament = find_mut(&mut state.tournaments, name)?;

        let completed = tournament.report_result(caller_id, round, match_number, winner)?;
        let winner = completed
            .winner
            .and_then(|id| tournament.participant(id))
            .cloned();

        Ok(ReportOutcome {
            completed,
            winner,
            bracket: BracketView::of(tournament),
        })
    }

    /// Finish a tournament
    pub async fn close(
        &self,
        name: &str,
        requester_id: ParticipantId,
    ) -> TournamentResult<CloseOutcome> {
        let mut state = self.state.write().await;
        let tournament = find_mut(&mut state.tournaments, name)?;

        let outcome = tournament.close(requester_id)?;
        match &outcome.champion {
            Some(champion) => log::info!("Closed tournament '{}', champion {}", name, champion.id),
            None => log::info!("Closed tournament '{}' without a champion", name),
        }

        Ok(outcome)
    }

    pub async fn summary(&self, name: &str) -> TournamentResult<TournamentSummary> {
        let state = self.state.read().await;
        find(&state.tournaments, name).map(Tournament::summary)
    }

    /// All tournaments, oldest first
    pub async fn list_all(&self) -> Vec<TournamentListing> {
        self.snapshot()
            .await
            .tournaments
            .iter()
            .map(Tournament::listing)
            .collect()
    }

    pub async fn render_bracket(&self, name: &str) -> TournamentResult<BracketView> {
        let state = self.state.read().await;
        find(&state.tournaments, name).map(BracketView::of)
    }

    /// Full copy of one tournament
    pub async fn get(&self, name: &str) -> TournamentResult<Tournament> {
        let state = self.state.read().await;
        find(&state.tournaments, name).cloned()
    }
}

impl Default for TournamentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn find<'a>(
    tournaments: &'a HashMap<String, Tournament>,
    name: &str,
) -> TournamentResult<&'a Tournament> {
    tournaments
        .get(name)
        .ok_or_else(|| TournamentError::TournamentNotFound(name.to_string()))
}

fn find_mut<'a>(
    tournaments: &'a mut HashMap<String, Tournament>,
    name: &str,
) -> TournamentResult<&'a mut Tournament> {
    tournaments
        .get_mut(name)
        .ok_or_else(|| TournamentError::TournamentNotFound(name.to_string()))
}
