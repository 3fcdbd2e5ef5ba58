//! JSON command protocol.
//!
//! Every UI action and gesture can be expressed as a tagged JSON object,
//! e.g. `{"command": "set_tool", "tool": "window"}`, so the browser binding,
//! the CLI and the tests all drive the studio the same way.

use serde::{Deserialize, Serialize};
use shared::MassingModel;

use crate::export::import_json;
use crate::interaction::{HitTarget, PointerHit, Tool};
use crate::state::{mass_display_name, opening_display_name, StudioState};
use crate::validation::ModelValidator;

/// A command the studio can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum StudioCommand {
    /// Switch the active tool, discarding any drag in flight.
    SetTool { tool: Tool },
    /// Materials for masses drawn from now on.
    SetActiveMaterials {
        #[serde(default)]
        wall: Option<String>,
        #[serde(default)]
        roof: Option<String>,
    },
    /// Snapping quantum in metres.
    SetGridModule { module: f64 },
    /// Height of masses drawn from now on, in metres.
    SetDefaultHeight { height: f64 },
    /// Place a tree; omitted fields take the defaults.
    AddTree {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        h: Option<f64>,
    },
    /// Pointer down.
    GestureStart {
        #[serde(default)]
        point: [f64; 3],
        target: HitTarget,
    },
    /// Pointer drag.
    GestureMove {
        #[serde(default)]
        point: [f64; 3],
        target: HitTarget,
    },
    /// Pointer up.
    GestureEnd,
    /// Delete a mass and its openings.
    DeleteMass { id: String },
    /// Site location and optional `HH:MM` clock time.
    SetSite {
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        time: Option<String>,
    },
    /// Remove all masses and trees.
    Clear,
    /// List masses and trees.
    Inspect,
    /// Performance proxies for the current model.
    Report,
    /// Sun direction and light position for the current site.
    Sun,
    /// Export the model as an export document.
    Export {
        #[serde(default)]
        name: Option<String>,
    },
    /// Replace the model with the given one.
    Load { model: MassingModel },
    /// Replace the model from an export document or bare model JSON string.
    Import { json: String },
    /// Save the current model to the snapshot list.
    SaveSnapshot {
        #[serde(default)]
        name: Option<String>,
    },
    /// Restore a snapshot by key.
    RestoreSnapshot { key: u64 },
    /// List saved snapshots, most recent first.
    ListSnapshots,
    /// Run the model validator.
    Validate,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    fn from_result<T: Serialize, E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(serde_json::Value::Null) => Self::ok(),
                Ok(data) => Self::ok_with_data(data),
                Err(e) => Self::err(e.to_string()),
            },
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Execute a single command on the studio.
pub fn execute_command(state: &mut StudioState, cmd: StudioCommand) -> CommandResponse {
    match cmd {
        StudioCommand::SetTool { tool } => {
            state.set_tool(tool);
            CommandResponse::ok_with_data(serde_json::json!({ "tool": tool }))
        }

        StudioCommand::SetActiveMaterials { wall, roof } => {
            CommandResponse::from_result(state.set_active_materials(wall.as_deref(), roof.as_deref()))
        }

        StudioCommand::SetGridModule { module } => CommandResponse::from_result(state.set_grid_module(module)),

        StudioCommand::SetDefaultHeight { height } => CommandResponse::from_result(state.set_default_height(height)),

        StudioCommand::AddTree { x, y, h } => match state.add_tree(x, y, h) {
            Ok(id) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        StudioCommand::GestureStart { point, target } => {
            let outcome = state.gesture_start(&PointerHit { point, target });
            CommandResponse::from_result(Ok::<_, String>(outcome))
        }

        StudioCommand::GestureMove { point, target } => {
            let outcome = state.gesture_move(&PointerHit { point, target });
            CommandResponse::from_result(Ok::<_, String>(outcome))
        }

        StudioCommand::GestureEnd => CommandResponse::from_result(Ok::<_, String>(state.gesture_end())),

        StudioCommand::DeleteMass { id } => match state.delete_mass(&id) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({ "removed": id })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        StudioCommand::SetSite {
            latitude,
            longitude,
            time,
        } => {
            state.set_site(latitude, longitude, time.as_deref());
            CommandResponse::ok_with_data(serde_json::json!({ "site": state.settings.site }))
        }

        StudioCommand::Clear => {
            state.clear();
            CommandResponse::ok()
        }

        StudioCommand::Inspect => {
            let model = state.model();
            let units = state.settings.units;
            let masses: Vec<serde_json::Value> = model
                .masses
                .iter()
                .map(|mass| {
                    serde_json::json!({
                        "id": mass.id,
                        "name": mass_display_name(mass, units),
                        "x": mass.x,
                        "y": mass.y,
                        "w": mass.w,
                        "d": mass.d,
                        "h": mass.h,
                        "wall_material": mass.wall_material,
                        "roof_material": mass.roof_material,
                        "openings": mass.openings.iter().map(|o| opening_display_name(o, units)).collect::<Vec<_>>(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "tool": state.tool.tool(),
                "version": state.scene.version(),
                "grid_module": model.grid_module,
                "mass_count": masses.len(),
                "masses": masses,
                "tree_count": model.trees.len(),
            }))
        }

        StudioCommand::Report => CommandResponse::from_result(Ok::<_, String>(state.report())),

        StudioCommand::Sun => CommandResponse::from_result(Ok::<_, String>(state.sun())),

        StudioCommand::Export { name } => {
            if let Some(name) = name {
                state.name = name;
            }
            let record = state.export();
            let file_name = record.file_name();
            match serde_json::to_value(&record) {
                Ok(record) => CommandResponse::ok_with_data(serde_json::json!({
                    "file_name": file_name,
                    "record": record,
                })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        StudioCommand::Load { model } => {
            state.load_model(model);
            CommandResponse::ok_with_data(serde_json::json!({ "mass_count": state.model().masses.len() }))
        }

        StudioCommand::Import { json } => match import_json(&json) {
            Ok(model) => {
                state.load_model(model);
                CommandResponse::ok_with_data(serde_json::json!({ "mass_count": state.model().masses.len() }))
            }
            Err(e) => CommandResponse::err(e.to_string()),
        },

        StudioCommand::SaveSnapshot { name } => {
            let key = state.save_snapshot(name);
            CommandResponse::ok_with_data(serde_json::json!({ "key": key }))
        }

        StudioCommand::RestoreSnapshot { key } => CommandResponse::from_result(state.restore_snapshot(key)),

        StudioCommand::ListSnapshots => {
            let list: Vec<serde_json::Value> = state
                .snapshots
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "key": s.created_at,
                        "name": s.name,
                        "mass_count": s.model.masses.len(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({ "snapshots": list }))
        }

        StudioCommand::Validate => {
            let errors = ModelValidator::new(state.model()).validate_all();
            CommandResponse::ok_with_data(serde_json::json!({
                "valid": errors.is_empty(),
                "errors": errors,
            }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(state: &mut StudioState, json: &str) -> Result<CommandResponse, String> {
    let cmd: StudioCommand = serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(state, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(state: &mut StudioState, json: &str) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<StudioCommand> = serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds.into_iter().map(|cmd| execute_command(state, cmd)).collect())
}
