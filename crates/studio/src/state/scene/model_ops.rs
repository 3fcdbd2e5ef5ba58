//! Discrete model edits outside of gestures

use shared::{MassingModel, Tree, TreeId};

use super::SceneState;
use crate::error::StudioError;

impl SceneState {
    /// Replace the whole model (load, restore)
    pub fn set_model(&mut self, model: MassingModel) {
        self.model = model;
        self.version += 1;
    }

    /// Remove every mass and tree. The grid module is kept.
    pub fn clear(&mut self) {
        let grid_module = self.model.grid_module;
        self.set_model(MassingModel::default().with_grid_module(grid_module));
    }

    /// Delete a mass together with its openings
    pub fn delete_mass(&mut self, id: &str) -> Result<(), StudioError> {
        if self.get_mass(id).is_none() {
            return Err(StudioError::UnknownMass(id.to_string()));
        }
        let model = self.take_model().without_mass(id);
        self.commit(model, true);
        tracing::info!("Deleted mass {id}");
        Ok(())
    }

    /// Change the snapping quantum. Existing masses are not re-snapped.
    pub fn set_grid_module(&mut self, module: f64) -> Result<(), StudioError> {
        if !(module.is_finite() && module > 0.0) {
            return Err(StudioError::InvalidGridModule(module));
        }
        let model = self.take_model().with_grid_module(module);
        self.commit(model, true);
        Ok(())
    }

    /// Append a tree and return its ID
    pub fn add_tree(&mut self, tree: Tree) -> TreeId {
        let id = tree.id.clone();
        let model = self.take_model().with_tree(tree);
        self.commit(model, true);
        id
    }

    pub fn mass_count(&self) -> usize {
        self.model.masses.len()
    }

    pub fn tree_count(&self) -> usize {
        self.model.trees.len()
    }
}
