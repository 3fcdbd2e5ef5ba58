//! Studio settings

use serde::{Deserialize, Serialize};
use shared::units::{format_ft_in, to_meters};
use shared::{materials, MaterialId};

use crate::interaction::ToolContext;
use crate::proxy::{DEFAULT_CDD, DEFAULT_HDD, DEFAULT_LPD};
use crate::solar::SiteTime;

/// Unit system for display. The model itself is always in metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    /// Format a length given in metres
    pub fn format_length(&self, meters: f64) -> String {
        match self {
            Units::Imperial => format_ft_in(meters),
            Units::Metric => format!("{meters:.2} m"),
        }
    }
}

/// Snapping grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Grid module in metres
    pub module: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            module: to_meters(4.0, 0.0),
        }
    }
}

/// Heights used by the draw and push/pull tools, metres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassingSettings {
    pub default_height: f64,
    pub min_height: f64,
}

impl Default for MassingSettings {
    fn default() -> Self {
        Self {
            default_height: to_meters(12.0, 0.0),
            min_height: to_meters(8.0, 0.0),
        }
    }
}

/// Climate inputs of the proxy engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateSettings {
    /// Heating degree days
    pub hdd: f64,
    /// Cooling degree days
    pub cdd: f64,
    /// Lighting power density, W/m²
    pub lighting_power_density: f64,
}

impl Default for ClimateSettings {
    fn default() -> Self {
        Self {
            hdd: DEFAULT_HDD,
            cdd: DEFAULT_CDD,
            lighting_power_density: DEFAULT_LPD,
        }
    }
}

/// Site location and the time used for the sun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub latitude: f64,
    pub longitude: f64,
    pub time: SiteTime,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            latitude: 40.7,
            longitude: -74.0,
            time: SiteTime::default(),
        }
    }
}

/// Materials applied to freshly drawn masses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSettings {
    pub wall: MaterialId,
    pub roof: MaterialId,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            wall: materials::WOOD_INSUL.to_string(),
            roof: materials::ROOF_INSUL.to_string(),
        }
    }
}

/// All studio settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudioSettings {
    /// Display units
    #[serde(default)]
    pub units: Units,
    /// Grid settings
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub massing: MassingSettings,
    #[serde(default)]
    pub climate: ClimateSettings,
    #[serde(default)]
    pub site: SiteSettings,
    /// Active materials
    #[serde(default)]
    pub materials: MaterialSettings,
}

impl StudioSettings {
    /// Defaults handed to gesture transitions
    pub fn tool_context(&self) -> ToolContext {
        ToolContext {
            default_height: self.massing.default_height,
            min_height: self.massing.min_height,
            wall_material: self.materials.wall.clone(),
            roof_material: self.materials.roof.clone(),
        }
    }
}
