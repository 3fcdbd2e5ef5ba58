//! Display helper functions for masses and openings

use shared::{material_by_id, Mass, Opening};

use crate::state::settings::Units;

/// Get display name for a mass, e.g. `Mass 1a2b3c4d (20'-0" × 16'-0" × 12'-0")`
pub fn mass_display_name(mass: &Mass, units: Units) -> String {
    format!(
        "Mass {} ({} × {} × {})",
        short_id(&mass.id),
        units.format_length(mass.w),
        units.format_length(mass.d),
        units.format_length(mass.h)
    )
}

/// Get display name for an opening
pub fn opening_display_name(opening: &Opening, units: Units) -> String {
    format!(
        "{} {} × {} on {}",
        material_by_id(&opening.material).name,
        units.format_length(opening.w),
        units.format_length(opening.h),
        opening.wall.abbrev()
    )
}

/// Get shortened ID (first 8 characters)
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
