//! Factory functions for creating test data.
//!
//! Provides convenient helpers to construct `Mass`, `Opening`, `Tree` and
//! `MassingModel` values used in tests and by the command protocol examples.

use shared::*;

// ── Mass factories ──────────────────────────────────────────────

/// Create a timber mass with an insulated roof.
pub fn mass(id: &str, x: f64, y: f64, w: f64, d: f64, h: f64) -> Mass {
    mass_with(id, x, y, w, d, h, materials::WOOD_INSUL, materials::ROOF_INSUL)
}

/// Create a mass with explicit materials.
#[allow(clippy::too_many_arguments)]
pub fn mass_with(id: &str, x: f64, y: f64, w: f64, d: f64, h: f64, wall: &str, roof: &str) -> Mass {
    Mass {
        id: id.to_string(),
        x,
        y,
        w,
        d,
        h,
        wall_material: wall.to_string(),
        roof_material: roof.to_string(),
        openings: vec![],
    }
}

/// 6 × 4 × 3 m timber box at the origin: UA = 27 W/K.
pub fn reference_mass(id: &str) -> Mass {
    mass(id, 0.0, 0.0, 6.0, 4.0, 3.0)
}

// ── Opening / tree factories ────────────────────────────────────

/// Create a glazed opening.
pub fn opening(wall: WallKey, x: f64, z: f64, w: f64, h: f64) -> Opening {
    Opening {
        wall,
        x,
        z,
        w,
        h,
        material: materials::GLASS_LOE.to_string(),
    }
}

/// Create a tree.
pub fn tree(id: &str, x: f64, y: f64) -> Tree {
    Tree {
        id: id.to_string(),
        x,
        y,
        h: 2.4,
    }
}

// ── Model factories ─────────────────────────────────────────────

/// Wrap masses into a model on the default grid.
pub fn model(masses: Vec<Mass>) -> MassingModel {
    MassingModel {
        masses,
        ..MassingModel::default()
    }
}

/// Model with the reference mass only.
pub fn single_mass_model() -> MassingModel {
    model(vec![reference_mass("a")])
}

/// Two masses `a` and `b` side by side, `b` in concrete.
pub fn two_mass_model() -> MassingModel {
    model(vec![
        reference_mass("a"),
        mass_with("b", 8.0, 0.0, 4.0, 4.0, 6.0, materials::CONCRETE, materials::ROOF_INSUL),
    ])
}

/// Reference mass with a south window and a door on the east wall.
pub fn glazed_model() -> MassingModel {
    let a = reference_mass("a")
        .with_opening(opening(WallKey::South, 1.0, 0.9, 1.2192, 1.2192))
        .with_opening(opening(WallKey::East, 0.5, 0.0, 0.9144, 2.1336));
    model(vec![a]).with_tree(tree("t1", 0.0, 3.048))
}
