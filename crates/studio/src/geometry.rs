//! Wall frames and wall-local projection.
//!
//! World axes: X east, Y up, Z south. A mass footprint origin `(x, y)` maps to
//! world `(x, 0, y)`.

use glam::DVec3;
use serde::Serialize;
use shared::{Mass, WallKey};

/// Placement of one wall plane, for mesh construction by the renderer.
///
/// The plane is centred on `center`, spans `width` along its local x-axis and
/// `height` up, and is rotated `rot_y` radians around world Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WallFrame {
    pub wall: WallKey,
    pub center: DVec3,
    pub rot_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Frame of a single wall
pub fn wall_frame(mass: &Mass, wall: WallKey) -> WallFrame {
    use std::f64::consts::{FRAC_PI_2, PI};

    let mid_h = mass.h / 2.0;
    let (center, rot_y) = match wall {
        WallKey::North => (DVec3::new(mass.x + mass.w / 2.0, mid_h, mass.y), 0.0),
        WallKey::South => (DVec3::new(mass.x + mass.w / 2.0, mid_h, mass.y + mass.d), PI),
        WallKey::West => (DVec3::new(mass.x, mid_h, mass.y + mass.d / 2.0), FRAC_PI_2),
        WallKey::East => (DVec3::new(mass.x + mass.w, mid_h, mass.y + mass.d / 2.0), -FRAC_PI_2),
    };
    WallFrame {
        wall,
        center,
        rot_y,
        width: mass.wall_width(wall),
        height: mass.h,
    }
}

/// Frames of all four walls
pub fn wall_frames(mass: &Mass) -> [WallFrame; 4] {
    WallKey::ALL.map(|key| wall_frame(mass, key))
}

/// Centre of the flat roof
pub fn roof_center(mass: &Mass) -> DVec3 {
    DVec3::new(mass.x + mass.w / 2.0, mass.h, mass.y + mass.d / 2.0)
}

/// Project a world hit point onto the wall's local x-axis.
///
/// North/south walls measure along world X from `mass.x`; east/west walls
/// measure along world Z from `mass.y`. The result is not clamped.
pub fn wall_local_offset(mass: &Mass, wall: WallKey, point: DVec3) -> f64 {
    if wall.runs_along_x() {
        point.x - mass.x
    } else {
        point.z - mass.y
    }
}
