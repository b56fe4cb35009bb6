//! JSON snapshots of the tournament registry.

use super::models::Tournament;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Snapshot errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Every tournament of a registry, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub tournaments: Vec<Tournament>,
}

impl RegistrySnapshot {
    /// Write the snapshot as pretty JSON
    ///
    /// The file is written next to the target and renamed over it, so a
    /// crash mid-write leaves the previous snapshot in place.
    pub async fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_vec_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;

        log::debug!(
            "Saved {} tournaments to {}",
            self.tournaments.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a snapshot; a missing file gives an empty one
    pub async fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No snapshot at {}, starting empty", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Self = serde_json::from_slice(&bytes)?;
        log::info!(
            "Loaded {} tournaments from {}",
            snapshot.tournaments.len(),
            path.display()
        );
        Ok(snapshot)
    }
}
