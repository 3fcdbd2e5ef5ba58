//! Locally saved model snapshots

use serde::{Deserialize, Serialize};
use shared::{MassingModel, Snapshot};

use crate::error::StudioError;

/// Maximum number of snapshots kept; the oldest fall off
pub const MAX_SNAPSHOTS: usize = 20;

/// Snapshot list, most recent first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotLibrary {
    entries: Vec<Snapshot>,
}

impl SnapshotLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a copy of `model` and return its key.
    ///
    /// The key is `created_at`, bumped past the newest existing key so two
    /// saves within the same millisecond stay distinct.
    pub fn push(&mut self, name: impl Into<String>, model: &MassingModel, created_at: u64) -> u64 {
        let key = match self.entries.first() {
            Some(latest) if latest.created_at >= created_at => latest.created_at + 1,
            _ => created_at,
        };
        self.entries.insert(
            0,
            Snapshot {
                created_at: key,
                name: name.into(),
                model: model.clone(),
            },
        );
        self.entries.truncate(MAX_SNAPSHOTS);
        key
    }

    pub fn get(&self, key: u64) -> Option<&Snapshot> {
        self.entries.iter().find(|s| s.created_at == key)
    }

    /// Copy of the saved model for `key`
    pub fn restore(&self, key: u64) -> Result<MassingModel, StudioError> {
        self.get(key)
            .map(|s| s.model.clone())
            .ok_or(StudioError::UnknownSnapshot(key))
    }

    /// Remove one snapshot. Returns `true` if it existed.
    pub fn remove(&mut self, key: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.created_at != key);
        self.entries.len() < before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshots, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}
