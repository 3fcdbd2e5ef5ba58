//! JSON export and import of models.

use shared::{ExportRecord, MassingModel};

use crate::error::StudioError;

/// Millisecond wall clock used for export and snapshot timestamps
pub type Clock = fn() -> u64;

/// Current unix time in milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// No system clock on wasm; the binding installs a JS clock instead
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
    0
}

/// Pretty-printed export document for `model`
pub fn export_json(name: &str, model: &MassingModel, generated_at: u64) -> Result<String, StudioError> {
    let record = ExportRecord::from_model(name, model, generated_at);
    Ok(serde_json::to_string_pretty(&record)?)
}

/// Read either an export document or a bare model
pub fn import_json(json: &str) -> Result<MassingModel, StudioError> {
    match serde_json::from_str::<ExportRecord>(json) {
        Ok(record) => Ok(record.into_model()),
        Err(_) => Ok(serde_json::from_str::<MassingModel>(json)?),
    }
}
