//! # Tourney
//!
//! Single-elimination tournament engine for a community chat bot.
//!
//! The engine is platform agnostic: a messaging gateway hands it parsed
//! commands together with the calling user, and renders the replies it gets
//! back. Tournaments live in memory inside a [`TournamentRegistry`] and can
//! be written to a JSON snapshot between commands.
//!
//! ## Lifecycle
//!
//! - **Registration**: users join and leave freely up to the participant cap
//! - **Active**: the creator started the tournament, participants were
//!   shuffled and the whole bracket was generated; match results are
//!   reported one at a time and winners move on to the next round
//! - **Finished**: the creator closed the tournament, the winner of the final
//!   (if decided) is the champion
//!
//! ## Core Modules
//!
//! - [`tournament`]: Registry, bracket engine, match reporting, rendering
//! - [`commands`]: Chat command parsing
//! - [`handler`]: Command dispatch and user-facing replies
//!
//! ## Example
//!
//! ```
//! use tourney::{Caller, CommandHandler, TournamentRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let handler = CommandHandler::new(TournamentRegistry::new());
//!     let reply = handler
//!         .handle_text(&Caller::new(1, "Organizer"), "ct 8 Cup Weekly cup")
//!         .await;
//!     assert!(reply.ok);
//! }
//! ```

/// Chat command parsing.
pub mod commands;

/// Command dispatch to the registry.
pub mod handler;
pub use handler::{Caller, CommandHandler, Reply};

/// Tournament registry, bracket engine and match reporting.
pub mod tournament;
pub use tournament::{
    Bracket, BracketView, Match, NewTournament, Participant, ParticipantId, Slot, Tournament,
    TournamentError, TournamentRegistry, TournamentResult, TournamentStatus,
};
