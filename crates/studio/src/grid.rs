//! Grid snapping for drawn footprint coordinates.

/// Quantize `v` to the nearest multiple of `module`.
///
/// Halfway values round away from zero. A non-positive or non-finite module
/// leaves the value untouched.
pub fn snap(v: f64, module: f64) -> f64 {
    if !(module.is_finite() && module > 0.0) {
        return v;
    }
    (v / module).round() * module
}

/// Snap both ground-plane coordinates
pub fn snap_point(p: [f64; 2], module: f64) -> [f64; 2] {
    [snap(p[0], module), snap(p[1], module)]
}
