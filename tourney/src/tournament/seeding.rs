//! Random seeding of participants into the bracket.

use super::models::Participant;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Seeder shuffling participants before bracket generation
#[derive(Debug, Clone)]
pub struct Seeder {
    /// Random number generator
    rng: StdRng,
}

impl Seeder {
    /// Create a seeder backed by OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible seeder
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed value, equal seeds give equal seedings
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffle participants uniformly at random
    ///
    /// # Arguments
    ///
    /// * `participants` - Participants in join order, reordered in place
    pub fn shuffle(&mut self, participants: &mut [Participant]) {
        participants.shuffle(&mut self.rng);
    }
}

impl Default for Seeder {
    fn default() -> Self {
        Self::new()
    }
}
