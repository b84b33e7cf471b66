//! Seed snapshot files
//!
//! A snapshot is a JSON document `{ "tickets": [...], "agents": [...] }`
//! in the same shape the API returns, used to seed the in-memory stores.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::aggregates::{Agent, Ticket};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub agents: Vec<Agent>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Snapshot {
    /// Load from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
