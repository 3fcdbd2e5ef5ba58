//! On-disk settings, snapshot library and autosaved model

#![cfg(not(target_arch = "wasm32"))]

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::MassingModel;

use super::{StudioSettings, StudioState};
use crate::error::StudioError;

const SETTINGS_FILE: &str = "settings.json";
const SNAPSHOTS_FILE: &str = "snapshots.json";
const AUTOSAVE_FILE: &str = "autosave.json";

/// Where the studio keeps its JSON files
#[derive(Debug, Clone, PartialEq)]
pub struct StudioStore {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl StudioStore {
    /// Platform config dir for settings, data dir for snapshots and autosave
    pub fn platform() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("com", "massing", "massing-studio")?;
        Some(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Every file under a single directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            config_dir: dir.clone(),
            data_dir: dir,
        }
    }

    fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    fn snapshots_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOTS_FILE)
    }

    fn autosave_path(&self) -> PathBuf {
        self.data_dir.join(AUTOSAVE_FILE)
    }

    /// Rebuild the studio from disk. Missing or unreadable files fall back to defaults.
    pub fn load_state(&self) -> StudioState {
        let settings: StudioSettings = read_json(&self.settings_path()).unwrap_or_default();
        let mut state = StudioState::new(settings);
        state.snapshots = read_json(&self.snapshots_path()).unwrap_or_default();
        if let Some(model) = read_json::<MassingModel>(&self.autosave_path()) {
            tracing::info!("Restored autosave ({} masses)", model.masses.len());
            state.load_model(model);
        }
        state
    }

    /// Write settings, snapshots and the current model
    pub fn save_state(&self, state: &StudioState) -> Result<(), StudioError> {
        write_json(&self.settings_path(), &state.settings)?;
        write_json(&self.snapshots_path(), &state.snapshots)?;
        write_json(&self.autosave_path(), state.model())?;
        tracing::info!(
            "Saved {} masses and {} snapshots to {}",
            state.model().masses.len(),
            state.snapshots.len(),
            self.data_dir.display()
        );
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let json = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring unreadable {}: {e}", path.display());
            None
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StudioError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
