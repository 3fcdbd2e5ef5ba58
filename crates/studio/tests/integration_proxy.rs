//! Integration tests for the proxy engine on models built through gestures.

use massing_studio_lib::fixtures;
use massing_studio_lib::harness::TestHarness;
use massing_studio_lib::proxy::{daylight_factor, recommended_wwr, solar_index, ua_total, PerformanceReport};
use massing_studio_lib::state::ClimateSettings;
use shared::WallKey;

#[test]
fn test_reference_mass_envelope() {
    let model = fixtures::single_mass_model();
    assert!((ua_total(&model) - 27.0).abs() < 1e-9);
}

#[test]
fn test_glazing_adds_to_ua_without_subtracting_wall() {
    let mut h = TestHarness::with_model(fixtures::single_mass_model());
    let before = h.report();
    h.place_window("a", WallKey::South, 1.0);
    let after = h.report();
    let window_area = 1.2192 * 1.2192;
    assert!((after.glazing_area - window_area).abs() < 1e-9);
    assert!((after.ua_total - (before.ua_total + 1.7 * window_area)).abs() < 1e-9);
    assert!(after.daylight_factor > before.daylight_factor);
    assert!(after.lighting.annual_kwh < before.lighting.annual_kwh);
}

#[test]
fn test_daylight_monotonic_as_windows_added() {
    let mut h = TestHarness::with_model(fixtures::single_mass_model());
    let mut last = h.report().daylight_factor;
    assert_eq!(last, 0.0);
    for wall in WallKey::ALL {
        h.place_window("a", wall, 0.5);
        let df = h.report().daylight_factor;
        assert!(df >= last);
        last = df;
    }
    assert!(last <= 3.0);
}

#[test]
fn test_embodied_carbon_ignores_height() {
    let mut h = TestHarness::with_model(fixtures::single_mass_model());
    let before = h.report().embodied_carbon;
    h.push_pull("a", 6.0);
    assert_eq!(h.report().embodied_carbon, before);
    assert_eq!(before, 35.0 * 24.0);
}

#[test]
fn test_climate_settings_drive_hvac() {
    let model = fixtures::single_mass_model();
    let mild = PerformanceReport::compute(&model, &ClimateSettings::default(), 40.0);
    let cold = PerformanceReport::compute(
        &model,
        &ClimateSettings {
            hdd: 6000.0,
            ..ClimateSettings::default()
        },
        40.0,
    );
    assert_eq!(cold.heating, 2.0 * mild.heating);
    assert_eq!(cold.cooling, mild.cooling);
}

#[test]
fn test_trees_do_not_affect_proxies() {
    let mut h = TestHarness::with_model(fixtures::two_mass_model());
    let before = h.report();
    h.state.add_tree(Some(3.0), Some(3.0), Some(8.0)).unwrap();
    assert_eq!(h.report(), before);
}

#[test]
fn test_orientation_heuristics() {
    assert_eq!(solar_index(0.0, 180.0), 1.0);
    assert!(solar_index(60.0, 180.0) < solar_index(20.0, 180.0));
    for orient in [0.0, 45.0, 90.0, 180.0, 270.0, 359.0] {
        let wwr = recommended_wwr(45.0, orient);
        assert!((0.15..=0.45).contains(&wwr));
    }
    assert_eq!(daylight_factor(0.0, 10.0), 0.0);
}
