//! Integration tests for the StudioCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use massing_studio_lib::harness::{TestHarness, HARNESS_CLOCK_MS};

#[test]
fn test_command_full_workflow_via_json_batch() {
    let mut h = TestHarness::new();

    let json = r#"[
        {"command": "set_grid_module", "module": 4.0},
        {"command": "set_active_materials", "wall": "cross-lam"},
        {"command": "gesture_start", "point": [0, 0, 0], "target": {"type": "ground"}},
        {"command": "gesture_move", "point": [8, 0, 4], "target": {"type": "ground"}},
        {"command": "gesture_end"},
        {"command": "add_tree"},
        {"command": "inspect"}
    ]"#;

    let responses = h.commands(json).unwrap();
    assert_eq!(responses.len(), 7);
    for resp in &responses {
        assert!(resp.success, "Failed: {:?}", resp.error);
    }

    let inspect = responses[6].data.as_ref().unwrap();
    assert_eq!(inspect["mass_count"], 1);
    assert_eq!(inspect["tree_count"], 1);
    assert_eq!(inspect["masses"][0]["wall_material"], "cross-lam");
    assert_eq!(inspect["masses"][0]["w"], 8.0);
}

#[test]
fn test_command_window_placement_reports_clamp() {
    let mut h = TestHarness::new();
    h.commands(
        r#"[
        {"command": "set_grid_module", "module": 1.0},
        {"command": "gesture_start", "point": [0, 0, 0], "target": {"type": "ground"}},
        {"command": "gesture_move", "point": [6, 0, 4], "target": {"type": "ground"}},
        {"command": "gesture_end"},
        {"command": "set_tool", "tool": "window"}
    ]"#,
    )
    .unwrap();
    let id = h.model().masses[0].id.clone();

    let cmd = format!(
        r#"{{"command": "gesture_start", "point": [5.9, 1.5, 0], "target": {{"type": "wall", "mass_id": "{id}", "wall": "N"}}}}"#
    );
    let resp = h.command(&cmd).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["outcome"], "opening_placed");
    assert_eq!(data["clamped"], true);
    assert_eq!(data["opening"]["wall"], "N");
}

#[test]
fn test_command_report_and_sun() {
    let mut h = TestHarness::with_model(massing_studio_lib::fixtures::single_mass_model());
    let resp = h.command(r#"{"command": "report"}"#).unwrap();
    let report = resp.data.unwrap();
    assert_eq!(report["floor_area"], 24.0);
    assert_eq!(report["ua_total"], 27.0);
    assert_eq!(report["heating"], 1944.0);
    assert_eq!(report["cooling"], 259.0);

    h.command(r#"{"command": "set_site", "latitude": 0, "longitude": 0, "time": "12:00"}"#)
        .unwrap();
    let sun = h.command(r#"{"command": "sun"}"#).unwrap().data.unwrap();
    assert_eq!(sun["above_horizon"], true);
    assert_eq!(sun["direction"].as_array().unwrap().len(), 3);
}

#[test]
fn test_command_export_and_import() {
    let mut h = TestHarness::with_model(massing_studio_lib::fixtures::glazed_model());
    let resp = h.command(r#"{"command": "export", "name": "Corner  shop"}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["file_name"], "Corner_shop.json");
    assert_eq!(data["record"]["generated_at"], HARNESS_CLOCK_MS);
    let materials: Vec<&str> = data["record"]["materials"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(materials, vec!["wood-insul", "glass-loE", "roof-insul"]);

    let exported = data["record"].to_string();
    h.command(r#"{"command": "set_grid_module", "module": 0.5}"#).unwrap();
    h.command(r#"{"command": "clear"}"#).unwrap();
    let import = serde_json::json!({ "command": "import", "json": exported }).to_string();
    assert!(h.command(&import).unwrap().success);
    assert_eq!(*h.model(), massing_studio_lib::fixtures::glazed_model());
}

#[test]
fn test_command_snapshots() {
    let mut h = TestHarness::with_model(massing_studio_lib::fixtures::two_mass_model());
    let key = h.command(r#"{"command": "save_snapshot", "name": "two"}"#).unwrap().data.unwrap()["key"]
        .as_u64()
        .unwrap();
    assert_eq!(key, HARNESS_CLOCK_MS);

    h.command(r#"{"command": "clear"}"#).unwrap();
    let list = h.command(r#"{"command": "list_snapshots"}"#).unwrap().data.unwrap();
    assert_eq!(list["snapshots"][0]["name"], "two");
    assert_eq!(list["snapshots"][0]["mass_count"], 2);

    let restore = format!(r#"{{"command": "restore_snapshot", "key": {key}}}"#);
    assert!(h.command(&restore).unwrap().success);
    assert_eq!(h.mass_count(), 2);

    let resp = h.command(r#"{"command": "restore_snapshot", "key": 1}"#).unwrap();
    assert!(!resp.success);
}

#[test]
fn test_command_validate() {
    let mut h = TestHarness::with_model(massing_studio_lib::fixtures::glazed_model());
    let data = h.command(r#"{"command": "validate"}"#).unwrap().data.unwrap();
    assert_eq!(data["valid"], true);
}

#[test]
fn test_command_errors_do_not_abort_batch() {
    let mut h = TestHarness::new();
    let responses = h
        .commands(
            r#"[
        {"command": "set_grid_module", "module": -1},
        {"command": "set_active_materials", "roof": "thatch"},
        {"command": "add_tree", "x": 2, "y": 3}
    ]"#,
        )
        .unwrap();
    assert!(!responses[0].success);
    assert!(!responses[1].success);
    assert!(responses[2].success);
    assert_eq!(h.model().trees.len(), 1);
}

#[test]
fn test_command_invalid_batch() {
    let mut h = TestHarness::new();
    assert!(h.commands(r#"[{"command": "nope"}]"#).is_err());
}
