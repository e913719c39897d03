//! Low-precision solar ephemeris: Unix milliseconds to hour angle and
//! declination.
//!
//! Standard short-series solar position: mean anomaly plus equation of
//! center gives the ecliptic longitude, the fixed obliquity converts it to
//! equatorial coordinates, and Greenwich sidereal time turns right
//! ascension into an hour angle. All intermediate math is f64; the angles
//! only drop to f32 when they enter GPU-facing transforms.

use std::f64::consts::{PI, TAU};

const MS_PER_DAY: f64 = 86_400_000.0;
/// Julian day of the Unix epoch.
const J1970: f64 = 2_440_588.0;
/// Julian day of the J2000 reference epoch.
const J2000: f64 = 2_451_545.0;

/// The sun's apparent position in Earth's equatorial frame.
///
/// `hour_angle` is measured from the Greenwich meridian; `declination`
/// from the equatorial plane. Both in radians, hour angle normalized to
/// `(-PI, PI]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunCoordinates {
    /// Greenwich hour angle in radians.
    pub hour_angle: f64,
    /// Declination in radians.
    pub declination: f64,
}

/// Days since J2000 (fractional) for a Unix millisecond timestamp.
fn to_days(unix_ms: i64) -> f64 {
    unix_ms as f64 / MS_PER_DAY - 0.5 + J1970 - J2000
}

/// Solar mean anomaly in radians.
fn solar_mean_anomaly(d: f64) -> f64 {
    (357.5291 + 0.985_600_28 * d).to_radians()
}

/// Ecliptic longitude in radians: mean anomaly corrected by the equation
/// of center, plus the perihelion angle, plus half a turn.
fn ecliptic_longitude(m: f64) -> f64 {
    let center =
        (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin()).to_radians();
    let perihelion = 102.9372_f64.to_radians();
    m + center + perihelion + PI
}

/// Obliquity of the ecliptic in radians.
fn obliquity() -> f64 {
    23.4397_f64.to_radians()
}

/// Greenwich sidereal angle in radians.
fn sidereal_angle(d: f64) -> f64 {
    (280.16 + 360.985_623_5 * d).to_radians()
}

/// Wrap an angle to `(-PI, PI]`.
fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Compute the sun's hour angle and declination for a Unix millisecond
/// timestamp. Pure: same input, same output.
pub fn solar_coordinates(unix_ms: i64) -> SunCoordinates {
    let d = to_days(unix_ms);
    let m = solar_mean_anomaly(d);
    let l = ecliptic_longitude(m);
    let e = obliquity();

    let declination = (l.sin() * e.sin()).asin();
    let right_ascension = (l.sin() * e.cos()).atan2(l.cos());
    let hour_angle = normalize_angle(sidereal_angle(d) - right_ascension);

    SunCoordinates {
        hour_angle,
        declination,
    }
}
