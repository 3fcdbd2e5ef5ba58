//! Static material catalog (thermal transmittance and embodied carbon).

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

pub const WOOD_INSUL: &str = "wood-insul";
pub const CONCRETE: &str = "concrete";
pub const GLASS_LOE: &str = "glass-loE";
pub const ROOF_INSUL: &str = "roof-insul";
pub const STRAW_BALE: &str = "straw-bale";
pub const CROSS_LAM: &str = "cross-lam";
pub const GLASS_CURTAIN: &str = "glass-curtain";

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: Cow<'static, str>,
    pub name: Cow<'static, str>,
    /// Thermal transmittance, W/m²K
    pub u_value: f64,
    /// Embodied carbon intensity, kgCO₂e/m²
    pub embodied_carbon: f64,
}

impl Material {
    const fn new(id: &'static str, name: &'static str, u_value: f64, embodied_carbon: f64) -> Self {
        Self {
            id: Cow::Borrowed(id),
            name: Cow::Borrowed(name),
            u_value,
            embodied_carbon,
        }
    }

    /// Thermal resistance R = 1/U, m²K/W
    pub fn r_value(&self) -> f64 {
        1.0 / self.u_value
    }
}

/// The catalog. The first entry doubles as the fallback for unknown IDs.
pub static MATERIALS: [Material; 7] = [
    Material::new(WOOD_INSUL, "Timber stud + insulation", 0.35, 35.0),
    Material::new(CONCRETE, "Concrete wall", 1.80, 180.0),
    Material::new(GLASS_LOE, "LoE Double Glazing", 1.70, 120.0),
    Material::new(ROOF_INSUL, "Insulated roof panel", 0.25, 40.0),
    Material::new(STRAW_BALE, "Straw Bale", 0.15, 25.0),
    Material::new(CROSS_LAM, "Cross-Laminated Timber", 0.35, 60.0),
    Material::new(GLASS_CURTAIN, "Glass Curtain Wall", 5.80, 200.0),
];

/// Look up a material, falling back to the first catalog entry
pub fn material_by_id(id: &str) -> &'static Material {
    find_material(id).unwrap_or(&MATERIALS[0])
}

/// Strict lookup
pub fn find_material(id: &str) -> Option<&'static Material> {
    MATERIALS.iter().find(|m| m.id == id)
}

/// Position of a material in the catalog, used to order export listings
pub fn catalog_index(id: &str) -> Option<usize> {
    MATERIALS.iter().position(|m| m.id == id)
}
