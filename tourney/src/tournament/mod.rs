//! Tournament module for single-elimination tournaments.
//!
//! This module provides tournament management functionality including:
//! - Tournament creation and participant registration
//! - Randomized seeding and bracket generation
//! - Match result reporting with winner propagation
//! - Win/loss tracking and champion determination
//! - Bracket rendering and JSON snapshots
//!
//! ## Example
//!
//! ```
//! use tourney::tournament::{NewTournament, Participant, Slot, TournamentRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = TournamentRegistry::new();
//!
//!     registry.create(NewTournament::new("Cup", 4, 1)).await?;
//!     registry.join("Cup", Participant::new(10, "Alice")).await?;
//!     registry.join("Cup", Participant::new(20, "Bob")).await?;
//!     registry.start("Cup", 1).await?;
//!
//!     let finished = registry.report_result("Cup", 1, 1, 1, Slot::First).await?;
//!     assert!(finished.completed);
//!     println!("{}", registry.render_bracket("Cup").await?);
//!
//!     Ok(())
//! }
//! ```

pub mod bracket;
pub mod errors;
pub mod lifecycle;
pub mod manager;
pub mod models;
pub mod render;
pub mod seeding;
pub mod store;

pub use bracket::{Bracket, Match};
pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentRegistry;
pub use models::{
    CloseOutcome, MIN_PARTICIPANTS, NewTournament, Participant, ParticipantId, ReportOutcome, Slot,
    Tournament, TournamentListing, TournamentStatus, TournamentSummary,
};
pub use render::{BracketView, MatchView, RoundView, SlotView};
pub use seeding::Seeder;
pub use store::{RegistrySnapshot, StoreError, StoreResult};
