//! Lookup from model entities to renderer-owned handles.
//!
//! The renderer owns its scene graph. The studio only keeps a one-way
//! `RenderKey → H` table, rebuilt wholesale whenever the scene version moves.

use std::collections::HashMap;

use serde::Serialize;
use shared::{MassId, MassingModel, TreeId, WallKey};

/// Renderable entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderKey {
    Mass { mass_id: MassId },
    Wall { mass_id: MassId, wall: WallKey },
    Roof { mass_id: MassId },
    Tree { tree_id: TreeId },
}

impl RenderKey {
    /// Every key the model needs, in model order
    pub fn all_for(model: &MassingModel) -> Vec<RenderKey> {
        let mut keys = Vec::with_capacity(model.masses.len() * 6 + model.trees.len());
        for mass in &model.masses {
            keys.push(RenderKey::Mass {
                mass_id: mass.id.clone(),
            });
            keys.extend(WallKey::ALL.iter().map(|&wall| RenderKey::Wall {
                mass_id: mass.id.clone(),
                wall,
            }));
            keys.push(RenderKey::Roof {
                mass_id: mass.id.clone(),
            });
        }
        keys.extend(model.trees.iter().map(|t| RenderKey::Tree { tree_id: t.id.clone() }));
        keys
    }

    /// Mass this key belongs to, if any
    pub fn mass_id(&self) -> Option<&str> {
        match self {
            RenderKey::Mass { mass_id } | RenderKey::Wall { mass_id, .. } | RenderKey::Roof { mass_id } => {
                Some(mass_id.as_str())
            }
            RenderKey::Tree { .. } => None,
        }
    }
}

/// Handle table, rebuilt when the scene version changes
pub struct RenderIndex<H> {
    handles: HashMap<RenderKey, H>,
    version: u64,
    rebuild_count: u64,
}

impl<H> Default for RenderIndex<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RenderIndex<H> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
            version: u64::MAX, // force first rebuild
            rebuild_count: 0,
        }
    }

    /// Check if the index still matches the scene
    pub fn is_valid(&self, scene_version: u64) -> bool {
        self.version == scene_version
    }

    /// Drop all handles and create one per key via `make`
    pub fn rebuild(&mut self, model: &MassingModel, version: u64, mut make: impl FnMut(&RenderKey) -> H) {
        self.handles = RenderKey::all_for(model)
            .into_iter()
            .map(|key| {
                let handle = make(&key);
                (key, handle)
            })
            .collect();
        self.version = version;
        self.rebuild_count += 1;
        tracing::debug!(version, entries = self.handles.len(), "Rebuilt render index");
    }

    /// Rebuild only when `version` differs. Returns `true` if it rebuilt.
    pub fn sync(&mut self, model: &MassingModel, version: u64, make: impl FnMut(&RenderKey) -> H) -> bool {
        if self.is_valid(version) {
            return false;
        }
        self.rebuild(model, version, make);
        true
    }

    pub fn get(&self, key: &RenderKey) -> Option<&H> {
        self.handles.get(key)
    }

    /// Reverse lookup, for resolving a picked handle
    pub fn key_of(&self, handle: &H) -> Option<&RenderKey>
    where
        H: PartialEq,
    {
        self.handles.iter().find(|(_, h)| *h == handle).map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Rebuild counter
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_keys_per_mass() {
        let keys = RenderKey::all_for(&fixtures::glazed_model());
        // mass + 4 walls + roof, plus one tree
        assert_eq!(keys.len(), 7);
        assert!(keys.contains(&RenderKey::Wall {
            mass_id: "a".to_string(),
            wall: WallKey::West
        }));
    }

    #[test]
    fn test_sync_only_on_version_change() {
        let model = fixtures::two_mass_model();
        let mut index: RenderIndex<u32> = RenderIndex::new();
        let mut next = 0u32;
        assert!(index.sync(&model, 0, |_| {
            next += 1;
            next
        }));
        assert_eq!(index.len(), 12);
        assert!(!index.sync(&model, 0, |_| 0));
        assert_eq!(index.rebuild_count(), 1);
        assert!(index.sync(&model, 1, |_| 0));
        assert_eq!(index.rebuild_count(), 2);
    }

    #[test]
    fn test_reverse_lookup() {
        let model = fixtures::single_mass_model();
        let mut index: RenderIndex<String> = RenderIndex::new();
        index.rebuild(&model, 3, |k| format!("{k:?}"));
        let roof = RenderKey::Roof { mass_id: "a".to_string() };
        let handle = index.get(&roof).unwrap().clone();
        assert_eq!(index.key_of(&handle), Some(&roof));
        assert_eq!(roof.mass_id(), Some("a"));
    }
}
