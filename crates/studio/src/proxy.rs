//! Environmental proxy engine.
//!
//! Coarse, deterministic estimates derived from the current model. Nothing
//! here is cached on the model; callers recompute after every mutation.
//!
//! Two simplifications are deliberate and must be preserved to match
//! reference outputs: glazing UA is added on top of gross wall UA (the wall
//! area behind an opening is not subtracted), and embodied carbon uses the
//! wall material intensity times the footprint area only.

use serde::{Deserialize, Serialize};
use shared::{material_by_id, Mass, MassingModel, Opening};

use crate::state::settings::ClimateSettings;

pub const DEFAULT_HDD: f64 = 3000.0;
pub const DEFAULT_CDD: f64 = 800.0;
/// Lighting power density, W/m²
pub const DEFAULT_LPD: f64 = 8.0;
pub const OPERATING_HOURS_PER_DAY: f64 = 12.0;
pub const OPERATING_DAYS_PER_YEAR: f64 = 300.0;
/// Upper bound on the daylight share of lighting savings
pub const MAX_DAYLIGHT_SAVINGS: f64 = 0.6;

/// Round half away from zero to `decimals` places
pub fn round_to(v: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (v * factor).round() / factor
}

pub fn round2(v: f64) -> f64 {
    round_to(v, 2)
}

// ── Envelope ─────────────────────────────────────────────────

/// Wall + roof conductance of one mass, W/K
pub fn ua_for_mass(mass: &Mass) -> f64 {
    let wall = material_by_id(&mass.wall_material);
    let roof = material_by_id(&mass.roof_material);
    wall.u_value * mass.wall_area() + roof.u_value * mass.roof_area()
}

/// Total glazing area and conductance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlazingSummary {
    pub area: f64,
    pub ua: f64,
}

pub fn glazing_summary<'a>(openings: impl IntoIterator<Item = &'a Opening>) -> GlazingSummary {
    openings.into_iter().fold(GlazingSummary::default(), |acc, o| {
        let area = o.area();
        GlazingSummary {
            area: acc.area + area,
            ua: acc.ua + material_by_id(&o.material).u_value * area,
        }
    })
}

/// Envelope conductance of the whole model, W/K
pub fn ua_total(model: &MassingModel) -> f64 {
    let masses: f64 = model.masses.iter().map(ua_for_mass).sum();
    masses + glazing_summary(model.openings()).ua
}

/// Annual heating and cooling proxies, kWh/yr
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HvacProxy {
    pub heating: f64,
    pub cooling: f64,
}

pub fn hvac_proxy(ua_total: f64, hdd: f64, cdd: f64) -> HvacProxy {
    HvacProxy {
        heating: (ua_total * hdd * 24.0 / 1000.0).round(),
        cooling: (ua_total * cdd * 12.0 / 1000.0).round(),
    }
}

/// Operational energy proxy for the grid demo: one U value over
/// `area_per_floor * storeys`, rounded to one decimal.
pub fn operational_proxy(u_value: f64, area_per_floor: f64, storeys: u32, hdd: f64, cdd: f64) -> f64 {
    let area = area_per_floor * storeys as f64;
    let heating = u_value * area * hdd * 0.024;
    let cooling = u_value * area * cdd * 0.012;
    round_to(heating + cooling, 1)
}

// ── Carbon and areas ─────────────────────────────────────────

/// kgCO₂e, wall material over the footprint
pub fn embodied_carbon_for_mass(mass: &Mass) -> f64 {
    material_by_id(&mass.wall_material).embodied_carbon * mass.footprint_area()
}

pub fn embodied_carbon(model: &MassingModel) -> f64 {
    model.masses.iter().map(embodied_carbon_for_mass).sum()
}

pub fn floor_area(model: &MassingModel) -> f64 {
    model.masses.iter().map(Mass::footprint_area).sum()
}

pub fn glazing_area(model: &MassingModel) -> f64 {
    model.openings().map(Opening::area).sum()
}

// ── Daylight and lighting ────────────────────────────────────

/// Daylight factor proxy in percent, saturating at 3
pub fn daylight_factor(glazing_area: f64, floor_area: f64) -> f64 {
    if floor_area <= 0.0 {
        return 0.0;
    }
    round2(3.0 * (1.0 - (-4.0 * (glazing_area / floor_area)).exp()))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingLoad {
    /// Average installed power after daylight savings, W
    pub avg_power_w: f64,
    pub annual_kwh: f64,
}

pub fn lighting_load(floor_area: f64, lpd: f64, daylight_factor: f64) -> LightingLoad {
    let base = floor_area * lpd;
    let savings = MAX_DAYLIGHT_SAVINGS.min(daylight_factor / 10.0);
    let avg_w = base * (1.0 - savings);
    LightingLoad {
        avg_power_w: avg_w.round(),
        annual_kwh: (avg_w * OPERATING_HOURS_PER_DAY * OPERATING_DAYS_PER_YEAR / 1000.0).round(),
    }
}

// ── Orientation heuristics ───────────────────────────────────

/// 1 when facing due south (180°), 0 when facing due north
fn orientation_factor(orientation_deg: f64) -> f64 {
    let normalized = orientation_deg.rem_euclid(360.0);
    let diff = (180.0 - normalized).abs().min(180.0);
    1.0 - diff / 180.0
}

/// Relative solar exposure score in [0, 1]
pub fn solar_index(latitude: f64, orientation_deg: f64) -> f64 {
    let lat_factor = (1.0 - latitude.abs() / 90.0).max(0.0);
    let score = (lat_factor * (0.5 + 0.5 * orientation_factor(orientation_deg))).max(0.0);
    round2(score)
}

/// Advisory window-to-wall ratio. Not enforced on openings.
pub fn recommended_wwr(_latitude: f64, orientation_deg: f64) -> f64 {
    let wwr = 0.25 + 0.2 * (1.0 - orientation_factor(orientation_deg));
    round2(wwr).clamp(0.15, 0.45)
}

// ── Report ───────────────────────────────────────────────────

/// Everything the performance panel shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub floor_area: f64,
    pub glazing_area: f64,
    pub daylight_factor: f64,
    pub lighting: LightingLoad,
    pub ua_total: f64,
    pub heating: f64,
    pub cooling: f64,
    pub embodied_carbon: f64,
    /// Solar index of a south-facing facade at the site latitude
    pub solar_index_south: f64,
    /// Advisory WWR for the south facade
    pub recommended_wwr_south: f64,
}

impl PerformanceReport {
    pub fn compute(model: &MassingModel, climate: &ClimateSettings, latitude: f64) -> Self {
        let floor_area = floor_area(model);
        let glazing = glazing_summary(model.openings());
        let ua_total = model.masses.iter().map(ua_for_mass).sum::<f64>() + glazing.ua;
        let hvac = hvac_proxy(ua_total, climate.hdd, climate.cdd);
        let daylight_factor = daylight_factor(glazing.area, floor_area);

        Self {
            floor_area,
            glazing_area: glazing.area,
            daylight_factor,
            lighting: lighting_load(floor_area, climate.lighting_power_density, daylight_factor),
            ua_total,
            heating: hvac.heating,
            cooling: hvac.cooling,
            embodied_carbon: embodied_carbon(model),
            solar_index_south: solar_index(latitude, 180.0),
            recommended_wwr_south: recommended_wwr(latitude, 180.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::WallKey;

    fn mass(w: f64, d: f64, h: f64, wall: &str, roof: &str) -> Mass {
        Mass {
            id: format!("m-{w}-{d}"),
            x: 0.0,
            y: 0.0,
            w,
            d,
            h,
            wall_material: wall.to_string(),
            roof_material: roof.to_string(),
            openings: vec![],
        }
    }

    fn window(w: f64, h: f64) -> Opening {
        Opening {
            wall: WallKey::South,
            x: 0.0,
            z: 0.0,
            w,
            h,
            material: "glass-loE".to_string(),
        }
    }

    #[test]
    fn test_ua_for_mass_reference() {
        // 0.35 * 60 + 0.25 * 24 = 21 + 6
        let m = mass(6.0, 4.0, 3.0, "wood-insul", "roof-insul");
        assert!((ua_for_mass(&m) - 27.0).abs() < 1e-9);
    }

    #[test]
    fn test_ua_total_adds_glazing() {
        let m = mass(6.0, 4.0, 3.0, "wood-insul", "roof-insul").with_opening(window(1.0, 2.0));
        let model = MassingModel::default().with_mass(m);
        // 27 + 1.7 * 2
        assert!((ua_total(&model) - 30.4).abs() < 1e-9);
    }

    #[test]
    fn test_hvac_defaults() {
        let hvac = hvac_proxy(27.0, DEFAULT_HDD, DEFAULT_CDD);
        assert_eq!(hvac.heating, 1944.0);
        assert_eq!(hvac.cooling, 259.0);
    }

    #[test]
    fn test_embodied_carbon_uses_footprint_and_wall() {
        let m = mass(6.0, 4.0, 3.0, "concrete", "roof-insul");
        assert_eq!(embodied_carbon_for_mass(&m), 180.0 * 24.0);
        let model = MassingModel::default()
            .with_mass(m)
            .with_mass(mass(2.0, 2.0, 10.0, "wood-insul", "concrete"));
        assert_eq!(embodied_carbon(&model), 180.0 * 24.0 + 35.0 * 4.0);
    }

    #[test]
    fn test_daylight_zero_glazing() {
        assert_eq!(daylight_factor(0.0, 24.0), 0.0);
        assert_eq!(daylight_factor(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_daylight_monotonic() {
        let mut prev = daylight_factor(0.0, 24.0);
        for i in 1..50 {
            let df = daylight_factor(i as f64 * 0.5, 24.0);
            assert!(df >= prev, "daylight factor decreased at {i}");
            prev = df;
        }
        assert!(prev <= 3.0);
    }

    #[test]
    fn test_daylight_value() {
        // 3 * (1 - e^-1) = 1.896...
        assert_eq!(daylight_factor(6.0, 24.0), 1.9);
    }

    #[test]
    fn test_lighting_load() {
        let l = lighting_load(24.0, DEFAULT_LPD, 2.0);
        assert_eq!(l.avg_power_w, 154.0);
        assert_eq!(l.annual_kwh, 553.0);
    }

    #[test]
    fn test_lighting_savings_capped() {
        let l = lighting_load(100.0, 10.0, 9.0);
        assert_eq!(l.avg_power_w, 400.0);
    }

    #[test]
    fn test_solar_index_equator_south_is_max() {
        assert_eq!(solar_index(0.0, 180.0), 1.0);
        assert_eq!(solar_index(0.0, 0.0), 0.5);
        assert_eq!(solar_index(40.0, 180.0), 0.56);
        assert_eq!(solar_index(90.0, 180.0), 0.0);
    }

    #[test]
    fn test_solar_index_normalizes_orientation() {
        assert_eq!(solar_index(10.0, -180.0), solar_index(10.0, 180.0));
        assert_eq!(solar_index(10.0, 540.0), solar_index(10.0, 180.0));
    }

    #[test]
    fn test_recommended_wwr() {
        assert_eq!(recommended_wwr(40.0, 180.0), 0.25);
        assert_eq!(recommended_wwr(40.0, 0.0), 0.45);
        assert_eq!(recommended_wwr(40.0, 90.0), 0.35);
    }

    #[test]
    fn test_operational_proxy() {
        // 0.25 * 72 * (3000 * 0.024 + 800 * 0.012) = 18 * 81.6
        assert_eq!(operational_proxy(0.25, 36.0, 2, DEFAULT_HDD, DEFAULT_CDD), 1468.8);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn test_report() {
        let m = mass(6.0, 4.0, 3.0, "wood-insul", "roof-insul").with_opening(window(2.0, 3.0));
        let model = MassingModel::default().with_mass(m);
        let report = PerformanceReport::compute(&model, &ClimateSettings::default(), 0.0);
        assert_eq!(report.floor_area, 24.0);
        assert_eq!(report.glazing_area, 6.0);
        assert_eq!(report.daylight_factor, 1.9);
        assert!((report.ua_total - (27.0 + 1.7 * 6.0)).abs() < 1e-9);
        assert_eq!(report.solar_index_south, 1.0);
        assert_eq!(report.recommended_wwr_south, 0.25);
    }

    #[test]
    fn test_empty_model_report() {
        let report = PerformanceReport::compute(&MassingModel::default(), &ClimateSettings::default(), 40.7);
        assert_eq!(report.floor_area, 0.0);
        assert_eq!(report.daylight_factor, 0.0);
        assert_eq!(report.heating, 0.0);
        assert_eq!(report.lighting.annual_kwh, 0.0);
    }
}
