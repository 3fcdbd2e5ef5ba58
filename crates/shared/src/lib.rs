use serde::{Deserialize, Serialize};

pub mod export;
pub mod materials;
pub mod units;

pub use export::{ExportRecord, Snapshot};
pub use materials::{material_by_id, Material, MATERIALS};

/// Unique identifier of a mass in the model
pub type MassId = String;

/// Unique identifier of a site tree
pub type TreeId = String;

/// Key into the static material catalog
pub type MaterialId = String;

fn default_glazing() -> MaterialId {
    materials::GLASS_LOE.to_string()
}

fn default_grid_module() -> f64 {
    units::to_meters(4.0, 0.0)
}

/// Wall of a rectangular mass.
///
/// North lies at the footprint origin edge (`y`), south at `y + d`,
/// west at `x`, east at `x + w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKey {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl WallKey {
    pub const ALL: [WallKey; 4] = [WallKey::North, WallKey::South, WallKey::West, WallKey::East];

    /// North and south walls run along world X, east and west along world Z
    pub fn runs_along_x(self) -> bool {
        matches!(self, WallKey::North | WallKey::South)
    }

    /// Single-letter label used in hit metadata and serialized models
    pub fn abbrev(self) -> &'static str {
        match self {
            WallKey::North => "N",
            WallKey::South => "S",
            WallKey::East => "E",
            WallKey::West => "W",
        }
    }
}

/// Window or door cut into one wall of a mass, in wall-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub wall: WallKey,
    /// Offset along the wall from its start edge
    pub x: f64,
    /// Offset from the wall base
    pub z: f64,
    pub w: f64,
    pub h: f64,
    /// Glazing material
    #[serde(default = "default_glazing")]
    pub material: MaterialId,
}

impl Opening {
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Whether the opening lies fully inside its wall on `mass`
    pub fn fits_within(&self, mass: &Mass) -> bool {
        let width = mass.wall_width(self.wall);
        self.x >= 0.0 && self.x + self.w <= width + 1e-9 && self.z >= 0.0 && self.z + self.h <= mass.h + 1e-9
    }
}

/// Rectangular-footprint building volume with uniform height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mass {
    pub id: MassId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub d: f64,
    pub h: f64,
    pub wall_material: MaterialId,
    pub roof_material: MaterialId,
    #[serde(default)]
    pub openings: Vec<Opening>,
}

impl Mass {
    /// Length of the given wall: footprint width for N/S, depth for E/W
    pub fn wall_width(&self, wall: WallKey) -> f64 {
        if wall.runs_along_x() {
            self.w
        } else {
            self.d
        }
    }

    pub fn footprint_area(&self) -> f64 {
        self.w * self.d
    }

    /// Gross area of all four walls (openings not subtracted)
    pub fn wall_area(&self) -> f64 {
        2.0 * (self.w + self.d) * self.h
    }

    pub fn roof_area(&self) -> f64 {
        self.w * self.d
    }

    /// Copy of this mass with a new height
    pub fn with_height(&self, h: f64) -> Mass {
        Mass { h, ..self.clone() }
    }

    /// Copy of this mass with one more opening
    pub fn with_opening(&self, opening: Opening) -> Mass {
        let mut next = self.clone();
        next.openings.push(opening);
        next
    }

    /// Highest opening head above the wall base, 0 without openings
    pub fn openings_top(&self) -> f64 {
        self.openings.iter().map(|o| o.z + o.h).fold(0.0, f64::max)
    }
}

/// Site context object, decorative only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub id: TreeId,
    pub x: f64,
    pub y: f64,
    pub h: f64,
}

/// Root aggregate: grid module plus all masses and trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassingModel {
    #[serde(default = "default_grid_module")]
    pub grid_module: f64,
    #[serde(default)]
    pub masses: Vec<Mass>,
    #[serde(default)]
    pub trees: Vec<Tree>,
}

impl Default for MassingModel {
    fn default() -> Self {
        Self {
            grid_module: default_grid_module(),
            masses: Vec::new(),
            trees: Vec::new(),
        }
    }
}

impl MassingModel {
    /// Get a mass by ID
    pub fn get_mass(&self, id: &str) -> Option<&Mass> {
        self.masses.iter().find(|m| m.id == id)
    }

    /// Append a mass
    pub fn with_mass(mut self, mass: Mass) -> Self {
        self.masses.push(mass);
        self
    }

    /// Swap the mass carrying `mass.id` for the given copy.
    /// Unknown IDs leave the model untouched.
    pub fn replace_mass(mut self, mass: Mass) -> Self {
        if let Some(slot) = self.masses.iter_mut().find(|m| m.id == mass.id) {
            *slot = mass;
        }
        self
    }

    /// Remove a mass together with its openings
    pub fn without_mass(mut self, id: &str) -> Self {
        self.masses.retain(|m| m.id != id);
        self
    }

    /// Append a tree
    pub fn with_tree(mut self, tree: Tree) -> Self {
        self.trees.push(tree);
        self
    }

    /// Change the snapping quantum. Existing masses keep their coordinates.
    pub fn with_grid_module(mut self, grid_module: f64) -> Self {
        self.grid_module = grid_module;
        self
    }

    /// Every opening of every mass
    pub fn openings(&self) -> impl Iterator<Item = &Opening> {
        self.masses.iter().flat_map(|m| m.openings.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty() && self.trees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    fn sample_mass() -> Mass {
        Mass {
            id: "m1".to_string(),
            x: 0.0,
            y: 0.0,
            w: 6.0,
            d: 4.0,
            h: 3.0,
            wall_material: "wood-insul".to_string(),
            roof_material: "roof-insul".to_string(),
            openings: vec![],
        }
    }

    #[test]
    fn test_wall_key_serde() {
        assert_eq!(serde_json::to_string(&WallKey::North).unwrap(), r#""N""#);
        assert_eq!(serde_json::to_string(&WallKey::East).unwrap(), r#""E""#);
        let w: WallKey = serde_json::from_str(r#""W""#).unwrap();
        assert_eq!(w, WallKey::West);
        for key in WallKey::ALL {
            roundtrip(&key);
        }
    }

    #[test]
    fn test_wall_width() {
        let m = sample_mass();
        assert_eq!(m.wall_width(WallKey::North), 6.0);
        assert_eq!(m.wall_width(WallKey::South), 6.0);
        assert_eq!(m.wall_width(WallKey::East), 4.0);
        assert_eq!(m.wall_width(WallKey::West), 4.0);
    }

    #[test]
    fn test_areas() {
        let m = sample_mass();
        assert_eq!(m.wall_area(), 60.0);
        assert_eq!(m.roof_area(), 24.0);
        assert_eq!(m.footprint_area(), 24.0);
    }

    #[test]
    fn test_with_height_leaves_original() {
        let m = sample_mass();
        let taller = m.with_height(9.0);
        assert_eq!(m.h, 3.0);
        assert_eq!(taller.h, 9.0);
        assert_eq!(taller.id, m.id);
    }

    #[test]
    fn test_opening_fits_within() {
        let m = sample_mass();
        let inside = Opening {
            wall: WallKey::East,
            x: 2.8,
            z: 0.0,
            w: 1.2,
            h: 2.1,
            material: "glass-loE".to_string(),
        };
        assert!(inside.fits_within(&m));

        let outside = Opening { x: 3.0, ..inside.clone() };
        assert!(!outside.fits_within(&m));
    }

    #[test]
    fn test_openings_top() {
        let bare = sample_mass();
        assert_eq!(bare.openings_top(), 0.0);
        let door = Opening {
            wall: WallKey::South,
            x: 0.0,
            z: 0.0,
            w: 0.9,
            h: 2.1,
            material: "glass-loE".to_string(),
        };
        let window = Opening { z: 1.0, h: 1.25, ..door.clone() };
        assert_eq!(bare.with_opening(door).with_opening(window).openings_top(), 2.25);
    }

    #[test]
    fn test_opening_material_defaults_to_glazing() {
        let json = r#"{"wall":"S","x":1,"z":0,"w":1,"h":2}"#;
        let o: Opening = serde_json::from_str(json).unwrap();
        assert_eq!(o.material, "glass-loE");
        assert_eq!(o.wall, WallKey::South);
    }

    #[test]
    fn test_replace_mass() {
        let model = MassingModel::default().with_mass(sample_mass());
        let updated = model.get_mass("m1").unwrap().with_height(5.0);
        let model = model.replace_mass(updated);
        assert_eq!(model.get_mass("m1").unwrap().h, 5.0);
        assert_eq!(model.masses.len(), 1);
    }

    #[test]
    fn test_replace_unknown_mass_is_noop() {
        let model = MassingModel::default().with_mass(sample_mass());
        let mut stray = sample_mass();
        stray.id = "other".to_string();
        let next = model.clone().replace_mass(stray);
        assert_eq!(next, model);
    }

    #[test]
    fn test_without_mass_drops_openings() {
        let mass = sample_mass().with_opening(Opening {
            wall: WallKey::North,
            x: 0.0,
            z: 0.0,
            w: 1.0,
            h: 1.0,
            material: "glass-loE".to_string(),
        });
        let model = MassingModel::default().with_mass(mass).without_mass("m1");
        assert!(model.masses.is_empty());
        assert_eq!(model.openings().count(), 0);
    }

    #[test]
    fn test_default_grid_module_is_four_feet() {
        let model = MassingModel::default();
        assert!((model.grid_module - 1.2192).abs() < 1e-12);
        assert!(model.is_empty());
    }

    #[test]
    fn test_model_serde() {
        let model = MassingModel::default()
            .with_mass(sample_mass())
            .with_tree(Tree {
                id: "t1".to_string(),
                x: 0.0,
                y: 3.048,
                h: 2.4,
            });
        roundtrip(&model);
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains(r#""grid_module""#));
        assert!(json.contains(r#""wall_material":"wood-insul""#));
    }

    #[test]
    fn test_deserialize_minimal_model() {
        let json = r#"{"masses":[{"id":"a","x":0,"y":0,"w":2,"d":2,"h":3,"wall_material":"concrete","roof_material":"roof-insul"}]}"#;
        let model: MassingModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.masses.len(), 1);
        assert!(model.masses[0].openings.is_empty());
        assert!(model.trees.is_empty());
    }
}
