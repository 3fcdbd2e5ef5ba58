//! Headless test harness for programmatic studio manipulation.
//!
//! Wraps a `StudioState` with a fixed clock and a stand-in renderer (a
//! `RenderIndex` of sequential handles) so gestures, proxies and render
//! invalidation can be exercised without a browser.

use shared::{Mass, MassId, MassingModel, WallKey};

use crate::command::{execute_json, execute_json_batch, CommandResponse};
use crate::geometry::{roof_center, wall_frame};
use crate::interaction::{GestureOutcome, PointerHit, Tool};
use crate::proxy::PerformanceReport;
use crate::render_index::RenderIndex;
use crate::state::{StudioSettings, StudioState};
use crate::validation::ModelValidator;

/// Timestamp used for every export and snapshot made through the harness
pub const HARNESS_CLOCK_MS: u64 = 1_700_000_000_000;

fn harness_clock() -> u64 {
    HARNESS_CLOCK_MS
}

/// Headless harness over studio state and a render index
pub struct TestHarness {
    pub state: StudioState,
    render: RenderIndex<u64>,
    next_handle: u64,
}

impl TestHarness {
    /// Create a new empty harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(StudioSettings::default())
    }

    pub fn with_settings(settings: StudioSettings) -> Self {
        Self {
            state: StudioState::new(settings).with_clock(harness_clock),
            render: RenderIndex::new(),
            next_handle: 0,
        }
    }

    /// Create a harness preloaded with `model`.
    pub fn with_model(model: MassingModel) -> Self {
        let mut h = Self::new();
        h.state.load_model(model);
        h
    }

    // ── Gestures ──────────────────────────────────────────────

    /// Drag on the ground with the draw tool. Returns the new mass ID if committed.
    pub fn draw(&mut self, from: [f64; 2], to: [f64; 2]) -> Option<MassId> {
        self.state.set_tool(Tool::Draw);
        self.state.gesture_start(&PointerHit::ground(from[0], from[1]));
        self.state.gesture_move(&PointerHit::ground(to[0], to[1]));
        match self.state.gesture_end() {
            GestureOutcome::MassCommitted { mass_id } => Some(mass_id),
            _ => None,
        }
    }

    /// Grab the roof of `mass_id` and drag vertically by `dy`. Returns the final height.
    pub fn push_pull(&mut self, mass_id: &str, dy: f64) -> Option<f64> {
        let grab = roof_center(self.mass(mass_id)?).to_array();
        let drop = [grab[0], grab[1] + dy, grab[2]];
        self.state.set_tool(Tool::SelectPushPull);
        self.state.gesture_start(&PointerHit::roof(mass_id, grab));
        self.state.gesture_move(&PointerHit::roof(mass_id, drop));
        self.state.gesture_end();
        self.mass(mass_id).map(|m| m.h)
    }

    /// Click a wall `along` metres from its start edge with the window tool.
    pub fn place_window(&mut self, mass_id: &str, wall: WallKey, along: f64) -> GestureOutcome {
        self.place_opening(Tool::Window, mass_id, wall, along)
    }

    /// Click a wall `along` metres from its start edge with the door tool.
    pub fn place_door(&mut self, mass_id: &str, wall: WallKey, along: f64) -> GestureOutcome {
        self.place_opening(Tool::Door, mass_id, wall, along)
    }

    fn place_opening(&mut self, tool: Tool, mass_id: &str, wall: WallKey, along: f64) -> GestureOutcome {
        let Some(mass) = self.mass(mass_id) else {
            return GestureOutcome::NoTarget;
        };
        let point = wall_hit_point(mass, wall, along);
        self.state.set_tool(tool);
        self.state.gesture_start(&PointerHit::wall(mass_id, wall, point))
    }

    // ── Commands ──────────────────────────────────────────────

    /// Run one JSON command
    pub fn command(&mut self, json: &str) -> Result<CommandResponse, String> {
        execute_json(&mut self.state, json)
    }

    /// Run a JSON array of commands
    pub fn commands(&mut self, json: &str) -> Result<Vec<CommandResponse>, String> {
        execute_json_batch(&mut self.state, json)
    }

    // ── Render index ──────────────────────────────────────────

    /// Bring the render index up to date. Returns `true` if it rebuilt.
    pub fn sync_render(&mut self) -> bool {
        let next = &mut self.next_handle;
        self.render.sync(&self.state.scene.model, self.state.scene.version(), |_| {
            *next += 1;
            *next
        })
    }

    pub fn render_index(&self) -> &RenderIndex<u64> {
        &self.render
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn model(&self) -> &MassingModel {
        self.state.model()
    }

    pub fn mass(&self, id: &str) -> Option<&Mass> {
        self.state.model().get_mass(id)
    }

    pub fn mass_count(&self) -> usize {
        self.state.scene.mass_count()
    }

    pub fn report(&self) -> PerformanceReport {
        self.state.report()
    }

    /// Validator errors for the current model
    pub fn validation_errors(&self) -> Vec<String> {
        ModelValidator::new(self.state.model()).validate_all()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// World point at mid-height on `wall`, `along` metres from its start edge
fn wall_hit_point(mass: &Mass, wall: WallKey, along: f64) -> [f64; 3] {
    let frame = wall_frame(mass, wall);
    if wall.runs_along_x() {
        [mass.x + along, frame.center.y, frame.center.z]
    } else {
        [frame.center.x, frame.center.y, mass.y + along]
    }
}
