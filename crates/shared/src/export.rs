//! Export and snapshot records consumed by file export and local storage.

use serde::{Deserialize, Serialize};

use crate::materials::{catalog_index, Material, MATERIALS};
use crate::{Mass, MassingModel, Tree};

/// Serialized export of a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub name: String,
    pub grid_module: f64,
    pub masses: Vec<Mass>,
    pub trees: Vec<Tree>,
    /// Catalog entries referenced by masses or openings, in catalog order
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Unix time in milliseconds
    pub generated_at: u64,
}

impl ExportRecord {
    pub fn from_model(name: impl Into<String>, model: &MassingModel, generated_at: u64) -> Self {
        Self {
            name: name.into(),
            grid_module: model.grid_module,
            masses: model.masses.clone(),
            trees: model.trees.clone(),
            materials: used_materials(model),
            generated_at,
        }
    }

    /// Rebuild the model exactly as it was exported
    pub fn into_model(self) -> MassingModel {
        MassingModel {
            grid_module: self.grid_module,
            masses: self.masses,
            trees: self.trees,
        }
    }

    /// Download file name: whitespace runs become `_`
    pub fn file_name(&self) -> String {
        let stem = self.name.split_whitespace().collect::<Vec<_>>().join("_");
        format!("{stem}.json")
    }
}

/// Materials referenced anywhere in the model. Unknown IDs are skipped.
pub fn used_materials(model: &MassingModel) -> Vec<Material> {
    let mut ids: Vec<&str> = Vec::new();
    for mass in &model.masses {
        ids.push(&mass.wall_material);
        ids.push(&mass.roof_material);
        ids.extend(mass.openings.iter().map(|o| o.material.as_str()));
    }
    let mut indices: Vec<usize> = ids.into_iter().filter_map(catalog_index).collect();
    indices.sort_unstable();
    indices.dedup();
    indices.into_iter().map(|i| MATERIALS[i].clone()).collect()
}

/// Saved copy of a model in the local snapshot list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Creation time in unix milliseconds, also the snapshot key
    pub created_at: u64,
    pub name: String,
    pub model: MassingModel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Opening, WallKey};

    fn model() -> MassingModel {
        let mass = Mass {
            id: "m1".to_string(),
            x: 1.2192,
            y: 0.0,
            w: 4.8768,
            d: 3.6576,
            h: 3.6576,
            wall_material: "concrete".to_string(),
            roof_material: "roof-insul".to_string(),
            openings: vec![Opening {
                wall: WallKey::South,
                x: 1.0,
                z: 0.0,
                w: 0.9144,
                h: 2.1336,
                material: "glass-loE".to_string(),
            }],
        };
        MassingModel::default().with_mass(mass)
    }

    #[test]
    fn test_used_materials_in_catalog_order() {
        let ids: Vec<String> = used_materials(&model()).into_iter().map(|m| m.id.into_owned()).collect();
        assert_eq!(ids, vec!["concrete", "glass-loE", "roof-insul"]);
    }

    #[test]
    fn test_used_materials_dedup() {
        let m = model();
        let mut second = m.masses[0].clone();
        second.id = "m2".to_string();
        let m = m.with_mass(second);
        assert_eq!(used_materials(&m).len(), 3);
    }

    #[test]
    fn test_export_roundtrip() {
        let original = model();
        let record = ExportRecord::from_model("My Model", &original, 1_700_000_000_000);
        let json = serde_json::to_string_pretty(&record).unwrap();
        let back: ExportRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_model(), original);
    }

    #[test]
    fn test_file_name() {
        let record = ExportRecord::from_model("My  corner\tshop", &model(), 0);
        assert_eq!(record.file_name(), "My_corner_shop.json");
    }
}
