//! Imperial UI units. The model itself is stored in meters.

pub const FT_TO_M: f64 = 0.3048;
pub const IN_TO_M: f64 = 0.0254;

/// Feet and whole inches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeetInches {
    pub ft: i64,
    pub inch: i64,
}

/// Convert feet + inches to meters
pub fn to_meters(ft: f64, inch: f64) -> f64 {
    ft * FT_TO_M + inch * IN_TO_M
}

/// Split a length in meters into whole feet and rounded inches.
/// Rounding up to 12 inches carries into the feet.
pub fn from_meters(m: f64) -> FeetInches {
    let total_in = m / IN_TO_M;
    let mut ft = (total_in / 12.0).floor() as i64;
    let mut inch = (total_in - ft as f64 * 12.0).round() as i64;
    if inch >= 12 {
        ft += 1;
        inch -= 12;
    }
    FeetInches { ft, inch }
}

/// Format as `12'-6"`
pub fn format_ft_in(m: f64) -> String {
    let FeetInches { ft, inch } = from_meters(m);
    format!("{ft}'-{inch}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_meters() {
        assert!((to_meters(4.0, 0.0) - 1.2192).abs() < 1e-12);
        assert!((to_meters(0.0, 6.0) - 0.1524).abs() < 1e-12);
    }

    #[test]
    fn test_from_meters_exact_feet() {
        assert_eq!(from_meters(to_meters(12.0, 0.0)), FeetInches { ft: 12, inch: 0 });
    }

    #[test]
    fn test_from_meters_with_inches() {
        assert_eq!(from_meters(to_meters(7.0, 5.0)), FeetInches { ft: 7, inch: 5 });
    }

    #[test]
    fn test_inch_carry() {
        // 11.8 inches rounds to 12 and carries
        assert_eq!(from_meters(11.8 * IN_TO_M), FeetInches { ft: 1, inch: 0 });
    }

    #[test]
    fn test_format() {
        assert_eq!(format_ft_in(to_meters(12.0, 6.0)), "12'-6\"");
        assert_eq!(format_ft_in(0.0), "0'-0\"");
    }
}
