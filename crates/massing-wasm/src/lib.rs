use wasm_bindgen::prelude::*;

use massing_studio_lib::command::{execute_json, execute_json_batch};
use massing_studio_lib::geometry::wall_frames;
use massing_studio_lib::interaction::{PointerHit, Tool};
use massing_studio_lib::proxy;
use massing_studio_lib::solar::{SiteTime, SunReport};
use massing_studio_lib::state::{StudioSettings, StudioState};
use massing_studio_lib::StudioError;
use shared::ExportRecord;

/// Initialize WASM module with panic hook and logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("Massing studio WASM initialized");
}

fn js_now() -> u64 {
    js_sys::Date::now() as u64
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| js_err(StudioError::from(e)))
}

/// Studio session driven by the browser renderer
#[wasm_bindgen]
pub struct MassingStudio {
    state: StudioState,
}

impl Default for MassingStudio {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MassingStudio {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: StudioState::new(StudioSettings::default()).with_clock(js_now),
        }
    }

    /// Session with settings from JSON (e.g. restored from localStorage)
    pub fn with_settings(settings_json: &str) -> Result<MassingStudio, JsValue> {
        let settings: StudioSettings = parse(settings_json)?;
        Ok(Self {
            state: StudioState::new(settings).with_clock(js_now),
        })
    }

    /// Scene version; rebuild the render graph when it changes
    #[wasm_bindgen(getter)]
    pub fn version(&self) -> f64 {
        self.state.scene.version() as f64
    }

    /// Execute one JSON command, returning the response as JSON
    pub fn command(&mut self, json: &str) -> Result<String, JsValue> {
        let resp = execute_json(&mut self.state, json).map_err(js_err)?;
        serde_json::to_string(&resp).map_err(js_err)
    }

    /// Execute a JSON array of commands, returning the responses as JSON
    pub fn commands(&mut self, json: &str) -> Result<String, JsValue> {
        let resp = execute_json_batch(&mut self.state, json).map_err(js_err)?;
        serde_json::to_string(&resp).map_err(js_err)
    }

    pub fn set_tool(&mut self, tool: &str) -> Result<(), JsValue> {
        let tool: Tool = parse(&format!("\"{tool}\""))?;
        self.state.set_tool(tool);
        Ok(())
    }

    /// Pointer down; `hit_json` is a `PointerHit`
    pub fn gesture_start(&mut self, hit_json: &str) -> Result<JsValue, JsValue> {
        let hit: PointerHit = parse(hit_json)?;
        to_js(&self.state.gesture_start(&hit))
    }

    pub fn gesture_move(&mut self, hit_json: &str) -> Result<JsValue, JsValue> {
        let hit: PointerHit = parse(hit_json)?;
        to_js(&self.state.gesture_move(&hit))
    }

    pub fn gesture_end(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.state.gesture_end())
    }

    /// Draw preview rect, or `undefined`
    pub fn temporary_rect(&self) -> Result<JsValue, JsValue> {
        match self.state.tool.temporary_rect() {
            Some(rect) => to_js(&rect),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Current model
    pub fn model(&self) -> Result<JsValue, JsValue> {
        to_js(self.state.model())
    }

    /// Wall placements of one mass, for mesh construction
    pub fn wall_frames(&self, mass_id: &str) -> Result<JsValue, JsValue> {
        let mass = self
            .state
            .model()
            .get_mass(mass_id)
            .ok_or_else(|| js_err(StudioError::UnknownMass(mass_id.to_string())))?;
        to_js(&wall_frames(mass))
    }

    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.report())
    }

    pub fn sun(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.sun())
    }

    /// Export document as pretty JSON, ready for download
    pub fn export_json(&self) -> Result<String, JsValue> {
        serde_json::to_string_pretty(&self.state.export()).map_err(js_err)
    }

    /// Download file name for the current model
    pub fn export_file_name(&self) -> String {
        self.state.export().file_name()
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.settings).map_err(js_err)
    }

    /// Snapshot list as JSON, for localStorage
    pub fn snapshots_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.snapshots).map_err(js_err)
    }

    /// Replace the snapshot list from localStorage JSON
    pub fn load_snapshots(&mut self, json: &str) -> Result<(), JsValue> {
        self.state.snapshots = parse(json)?;
        Ok(())
    }
}

/// Sun direction for a site at `Date.now()` and `getTimezoneOffset()`, as `[x, y, z]`
#[wasm_bindgen]
pub fn sun_direction(latitude: f64, longitude: f64, epoch_ms: f64, tz_offset_minutes: i32) -> Vec<f64> {
    let time = SiteTime::from_local_millis(epoch_ms as i64, tz_offset_minutes);
    SunReport::at(latitude, longitude, &time).direction.to_array().to_vec()
}

#[wasm_bindgen]
pub fn solar_index(latitude: f64, orientation_deg: f64) -> f64 {
    proxy::solar_index(latitude, orientation_deg)
}

#[wasm_bindgen]
pub fn recommended_wwr(latitude: f64, orientation_deg: f64) -> f64 {
    proxy::recommended_wwr(latitude, orientation_deg)
}

/// Grid demo readout
#[wasm_bindgen]
pub fn operational_proxy(u_value: f64, area_per_floor: f64, storeys: u32, hdd: f64, cdd: f64) -> f64 {
    proxy::operational_proxy(u_value, area_per_floor, storeys, hdd, cdd)
}

/// Validate an export document and return its download name
#[wasm_bindgen]
pub fn export_file_name(record_json: &str) -> Result<String, JsValue> {
    let record: ExportRecord = parse(record_json)?;
    Ok(record.file_name())
}

/// Version info
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
