pub mod scene;
pub mod settings;
pub mod snapshots;
pub mod store;

use shared::materials::find_material;
use shared::{ExportRecord, MassingModel, TreeId};

use crate::error::StudioError;
use crate::export::{now_ms, Clock};
use crate::interaction::{new_tree, GestureOutcome, PointerHit, Tool, ToolContext, ToolState, Transition};
use crate::proxy::PerformanceReport;
use crate::solar::SunReport;

pub use scene::{mass_display_name, opening_display_name, short_id, SceneState};
pub use settings::{ClimateSettings, StudioSettings, Units};
pub use snapshots::{SnapshotLibrary, MAX_SNAPSHOTS};
#[cfg(not(target_arch = "wasm32"))]
pub use store::StudioStore;

/// Name given to models until the user picks one
pub const DEFAULT_MODEL_NAME: &str = "Untitled massing";

/// Combined studio state
pub struct StudioState {
    pub scene: SceneState,
    pub tool: ToolState,
    pub settings: StudioSettings,
    pub snapshots: SnapshotLibrary,
    /// Model name used for export and snapshots
    pub name: String,
    clock: Clock,
}

impl Default for StudioState {
    fn default() -> Self {
        Self::new(StudioSettings::default())
    }
}

impl StudioState {
    /// Empty model on the settings' grid, nothing read from disk
    pub fn new(settings: StudioSettings) -> Self {
        let model = MassingModel::default().with_grid_module(settings.grid.module);
        Self {
            scene: SceneState::new(model),
            tool: ToolState::default(),
            settings,
            snapshots: SnapshotLibrary::new(),
            name: DEFAULT_MODEL_NAME.to_string(),
            clock: now_ms,
        }
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn model(&self) -> &MassingModel {
        &self.scene.model
    }

    // ── Tools and gestures ────────────────────────────────────

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool.set_tool(tool);
    }

    pub fn gesture_start(&mut self, hit: &PointerHit) -> GestureOutcome {
        self.transition(|tool, model, ctx| tool.gesture_start(model, hit, ctx))
    }

    pub fn gesture_move(&mut self, hit: &PointerHit) -> GestureOutcome {
        self.transition(|tool, model, ctx| tool.gesture_move(model, hit, ctx))
    }

    pub fn gesture_end(&mut self) -> GestureOutcome {
        self.transition(|tool, model, ctx| tool.gesture_end(model, ctx))
    }

    fn transition(&mut self, step: impl FnOnce(&mut ToolState, MassingModel, &ToolContext) -> Transition) -> GestureOutcome {
        let ctx = self.settings.tool_context();
        let model = self.scene.take_model();
        let Transition { model, outcome } = step(&mut self.tool, model, &ctx);
        self.scene.commit(model, outcome.mutates_model());
        outcome
    }

    // ── Discrete commands ─────────────────────────────────────

    /// Materials for the next drawn masses. `None` keeps the current one.
    pub fn set_active_materials(&mut self, wall: Option<&str>, roof: Option<&str>) -> Result<(), StudioError> {
        for id in [wall, roof].into_iter().flatten() {
            if find_material(id).is_none() {
                return Err(StudioError::UnknownMaterial(id.to_string()));
            }
        }
        if let Some(wall) = wall {
            self.settings.materials.wall = wall.to_string();
        }
        if let Some(roof) = roof {
            self.settings.materials.roof = roof.to_string();
        }
        Ok(())
    }

    pub fn set_grid_module(&mut self, module: f64) -> Result<(), StudioError> {
        self.scene.set_grid_module(module)?;
        self.settings.grid.module = module;
        Ok(())
    }

    /// Height of the next drawn masses. Existing masses are unchanged.
    pub fn set_default_height(&mut self, h: f64) -> Result<(), StudioError> {
        if !(h.is_finite() && h > 0.0) {
            return Err(StudioError::InvalidHeight(h));
        }
        self.settings.massing.default_height = h;
        Ok(())
    }

    /// Tree at the given spot, or at the default one
    pub fn add_tree(&mut self, x: Option<f64>, y: Option<f64>, h: Option<f64>) -> Result<TreeId, StudioError> {
        if let Some(h) = h.filter(|h| !(h.is_finite() && *h > 0.0)) {
            return Err(StudioError::InvalidHeight(h));
        }
        Ok(self.scene.add_tree(new_tree(x, y, h)))
    }

    pub fn delete_mass(&mut self, id: &str) -> Result<(), StudioError> {
        self.scene.delete_mass(id)
    }

    /// Empty the model and drop any session in flight
    pub fn clear(&mut self) {
        self.tool.set_tool(self.tool.tool());
        self.scene.clear();
    }

    /// Site location, and optionally the clock time as `HH:MM`
    pub fn set_site(&mut self, latitude: f64, longitude: f64, clock: Option<&str>) {
        self.settings.site.latitude = latitude.clamp(-90.0, 90.0);
        self.settings.site.longitude = longitude;
        if let Some(clock) = clock {
            self.settings.site.time = self.settings.site.time.with_clock(clock);
        }
    }

    // ── Derived data ──────────────────────────────────────────

    pub fn report(&self) -> PerformanceReport {
        PerformanceReport::compute(&self.scene.model, &self.settings.climate, self.settings.site.latitude)
    }

    pub fn sun(&self) -> SunReport {
        let site = &self.settings.site;
        SunReport::at(site.latitude, site.longitude, &site.time)
    }

    // ── Export and snapshots ──────────────────────────────────

    pub fn export(&self) -> ExportRecord {
        ExportRecord::from_model(self.name.clone(), &self.scene.model, (self.clock)())
    }

    /// Replace the model, e.g. from an imported file
    pub fn load_model(&mut self, model: MassingModel) {
        self.tool.set_tool(self.tool.tool());
        self.settings.grid.module = model.grid_module;
        self.scene.set_model(model);
    }

    /// Save the current model and return the snapshot key
    pub fn save_snapshot(&mut self, name: Option<String>) -> u64 {
        let name = name.unwrap_or_else(|| self.name.clone());
        let key = self.snapshots.push(name, &self.scene.model, (self.clock)());
        tracing::info!("Saved snapshot {key}");
        key
    }

    pub fn restore_snapshot(&mut self, key: u64) -> Result<(), StudioError> {
        let model = self.snapshots.restore(key)?;
        if let Some(snapshot) = self.snapshots.get(key) {
            self.name = snapshot.name.clone();
        }
        self.load_model(model);
        Ok(())
    }
}
