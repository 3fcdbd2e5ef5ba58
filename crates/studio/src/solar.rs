//! Approximate sun position for orienting the scene's directional light.
//!
//! Declination uses the Cooper approximation and the hour angle is taken from
//! local clock time. Longitude is accepted but no solar-time correction is
//! applied, so results drift from true solar position away from the zone
//! meridian.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Distance at which the renderer places the sun light along the direction
pub const SUN_LIGHT_DISTANCE: f64 = 60.0;

/// Local civil date and clock time at the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Default for SiteTime {
    fn default() -> Self {
        // Summer solstice, early afternoon
        Self {
            year: 2024,
            month: 6,
            day: 21,
            hour: 13,
            minute: 0,
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl SiteTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
            day: day.clamp(1, 31),
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }

    /// UTC civil time from unix milliseconds
    pub fn from_unix_millis(ms: i64) -> Self {
        let days = ms.div_euclid(86_400_000);
        let secs_of_day = ms.rem_euclid(86_400_000) / 1000;

        // Civil-from-days (proleptic Gregorian, era-based)
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
        let year = (yoe + era * 400 + if month <= 2 { 1 } else { 0 }) as i32;

        Self {
            year,
            month,
            day,
            hour: (secs_of_day / 3600) as u32,
            minute: ((secs_of_day % 3600) / 60) as u32,
        }
    }

    /// Site clock from unix milliseconds and a JS-style timezone offset
    /// (`Date.getTimezoneOffset()`, minutes to add to local time to reach UTC)
    pub fn from_local_millis(ms: i64, tz_offset_minutes: i32) -> Self {
        Self::from_unix_millis(ms - i64::from(tz_offset_minutes) * 60_000)
    }

    /// Replace the clock part from an `HH:MM` string. Missing or malformed
    /// fields read as zero. Hours wrap at 24 (`24:00` is midnight of the same date).
    pub fn with_clock(self, clock: &str) -> Self {
        let mut parts = clock.split(':').map(|p| p.trim().parse::<u32>().unwrap_or(0));
        let hour = parts.next().unwrap_or(0) % 24;
        let minute = parts.next().unwrap_or(0);
        Self::new(self.year, self.month, self.day, hour, minute)
    }

    /// 1-based day index within the calendar year
    pub fn day_of_year(&self) -> u32 {
        const CUMULATIVE: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
        let month_idx = (self.month.clamp(1, 12) - 1) as usize;
        let leap = if self.month > 2 && is_leap_year(self.year) { 1 } else { 0 };
        CUMULATIVE[month_idx] + self.day + leap
    }

    /// Clock time in decimal hours
    pub fn hour_decimal(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }
}

/// Solar altitude and azimuth in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    pub altitude: f64,
    pub azimuth: f64,
}

impl SunPosition {
    pub fn calculate(latitude: f64, _longitude: f64, time: &SiteTime) -> Self {
        let lat = latitude.to_radians();
        let doy = time.day_of_year() as f64;

        let declination = (23.45 * (360.0 * (284.0 + doy) / 365.0).to_radians().sin()).to_radians();
        let hour_angle = (15.0 * (time.hour_decimal() - 12.0)).to_radians();

        let altitude = (lat.sin() * declination.sin()
            + lat.cos() * declination.cos() * hour_angle.cos())
        .asin();
        let azimuth = (-hour_angle.sin())
            .atan2(declination.tan() * lat.cos() - lat.sin() * hour_angle.cos());

        Self { altitude, azimuth }
    }

    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }

    /// Unit vector pointing from the scene toward the sun (Y up)
    pub fn direction(&self) -> DVec3 {
        DVec3::new(
            self.azimuth.sin() * self.altitude.cos(),
            self.altitude.sin(),
            self.azimuth.cos() * self.altitude.cos(),
        )
        .normalize_or_zero()
    }
}

/// Sun direction for a site and local time
pub fn sun_direction(latitude: f64, longitude: f64, time: &SiteTime) -> DVec3 {
    SunPosition::calculate(latitude, longitude, time).direction()
}

/// Position of the directional light, `distance` along the sun direction
pub fn sun_light_position(direction: DVec3, distance: f64) -> DVec3 {
    direction * distance
}

/// Everything the renderer needs to place the sun light
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunReport {
    pub direction: DVec3,
    pub light_position: DVec3,
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    pub above_horizon: bool,
}

impl SunReport {
    pub fn at(latitude: f64, longitude: f64, time: &SiteTime) -> Self {
        let pos = SunPosition::calculate(latitude, longitude, time);
        let direction = pos.direction();
        Self {
            direction,
            light_position: sun_light_position(direction, SUN_LIGHT_DISTANCE),
            altitude_deg: pos.altitude.to_degrees(),
            azimuth_deg: pos.azimuth.to_degrees(),
            above_horizon: pos.is_above_horizon(),
        }
    }
}
