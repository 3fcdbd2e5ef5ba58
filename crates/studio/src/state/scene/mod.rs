//! Scene state management
//!
//! Holds the current model value and a version counter the renderer uses to
//! decide when to rebuild.

mod display;
mod model_ops;

pub use display::{mass_display_name, opening_display_name, short_id};

use shared::{Mass, MassingModel};

/// Current model plus mutation counter
#[derive(Debug, Default)]
pub struct SceneState {
    /// Current model
    pub model: MassingModel,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl SceneState {
    pub fn new(model: MassingModel) -> Self {
        Self { model, version: 0 }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get a mass by ID
    pub fn get_mass(&self, id: &str) -> Option<&Mass> {
        self.model.get_mass(id)
    }

    /// Move the model out for a transition. Must be followed by [`Self::commit`].
    pub(crate) fn take_model(&mut self) -> MassingModel {
        std::mem::take(&mut self.model)
    }

    /// Put back the model returned by a transition
    pub(crate) fn commit(&mut self, model: MassingModel, changed: bool) {
        self.model = model;
        if changed {
            self.version += 1;
        }
    }
}
