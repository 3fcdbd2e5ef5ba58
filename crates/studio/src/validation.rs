//! Model validation utilities.
//!
//! `ModelValidator` checks a `MassingModel` against the invariants the
//! interaction layer maintains: positive sizes, unique IDs, known materials
//! and openings contained in their walls. Restored data is not validated on
//! load; callers run this when they want a report.

use std::collections::HashSet;

use shared::{materials::find_material, MassingModel};

/// Validator for `MassingModel` integrity checks.
pub struct ModelValidator<'a> {
    model: &'a MassingModel,
}

impl<'a> ModelValidator<'a> {
    /// Create a new validator for the given model.
    pub fn new(model: &'a MassingModel) -> Self {
        Self { model }
    }

    pub fn mass_count(&self) -> usize {
        self.model.masses.len()
    }

    pub fn opening_count(&self) -> usize {
        self.model.openings().count()
    }

    /// Grid module is positive and finite.
    pub fn is_grid_valid(&self) -> bool {
        self.model.grid_module.is_finite() && self.model.grid_module > 0.0
    }

    /// Every mass has positive width, depth and height.
    pub fn are_sizes_positive(&self) -> bool {
        self.model.masses.iter().all(|m| m.w > 0.0 && m.d > 0.0 && m.h > 0.0)
            && self.model.trees.iter().all(|t| t.h > 0.0)
    }

    /// IDs that occur more than once across masses and trees.
    pub fn duplicate_ids(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        let ids = self
            .model
            .masses
            .iter()
            .map(|m| m.id.as_str())
            .chain(self.model.trees.iter().map(|t| t.id.as_str()));
        for id in ids {
            if !seen.insert(id) {
                dups.push(id);
            }
        }
        dups
    }

    /// Material IDs not found in the catalog.
    pub fn unknown_materials(&self) -> Vec<&'a str> {
        let mut unknown: Vec<&str> = Vec::new();
        for mass in &self.model.masses {
            let ids = [mass.wall_material.as_str(), mass.roof_material.as_str()]
                .into_iter()
                .chain(mass.openings.iter().map(|o| o.material.as_str()));
            for id in ids {
                if find_material(id).is_none() && !unknown.contains(&id) {
                    unknown.push(id);
                }
            }
        }
        unknown
    }

    /// `(mass_id, opening index)` of every opening outside its wall.
    pub fn misplaced_openings(&self) -> Vec<(&'a str, usize)> {
        self.model
            .masses
            .iter()
            .flat_map(|m| {
                m.openings
                    .iter()
                    .enumerate()
                    .filter(move |(_, o)| !o.fits_within(m))
                    .map(move |(i, _)| (m.id.as_str(), i))
            })
            .collect()
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the model is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_grid_valid() {
            errors.push(format!("Grid module {} is not a positive length", self.model.grid_module));
        }

        if !self.are_sizes_positive() {
            errors.push("Some masses or trees have non-positive dimensions".to_string());
        }

        let dups = self.duplicate_ids();
        if !dups.is_empty() {
            errors.push(format!("Duplicate IDs: {:?}", dups));
        }

        let unknown = self.unknown_materials();
        if !unknown.is_empty() {
            errors.push(format!("Unknown materials: {:?}", unknown));
        }

        let misplaced = self.misplaced_openings();
        if !misplaced.is_empty() {
            errors.push(format!("Openings outside their wall: {:?}", misplaced));
        }

        errors
    }
}
