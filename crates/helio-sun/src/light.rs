//! Light-direction transform derived from the sun's equatorial angles.

use glam::{Mat4, Vec3};

use crate::SunCoordinates;

/// The fixed seed vector the light transform is applied to.
///
/// Under the viewer's globe mapping, (-1, 0, 0) is the surface point at
/// latitude 0, longitude 0, so rotating it by the hour angle and
/// declination lands on the subsolar point.
pub const LIGHT_SEED: Vec3 = Vec3::new(-1.0, 0.0, 0.0);

/// Build the light transform: rotate about the vertical axis by the
/// negated hour angle, then about the depth axis by the negated
/// declination. The order is load-bearing; the two rotations do not
/// commute.
pub fn light_transform(sun: SunCoordinates) -> Mat4 {
    Mat4::from_rotation_y(-sun.hour_angle as f32) * Mat4::from_rotation_z(-sun.declination as f32)
}

/// World-space direction from the globe's center toward the sun.
pub fn light_direction(sun: SunCoordinates) -> Vec3 {
    light_transform(sun).transform_point3(LIGHT_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar_coordinates;

    fn sun(hour_angle: f64, declination: f64) -> SunCoordinates {
        SunCoordinates {
            hour_angle,
            declination,
        }
    }

    #[test]
    fn test_zero_angles_leave_seed_unrotated() {
        let dir = light_direction(sun(0.0, 0.0));
        assert!((dir - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_light_direction_is_unit_length() {
        for i in 0..16 {
            let s = sun(i as f64 * 0.41 - 3.0, (i as f64 * 0.07 - 0.4).sin() * 0.4);
            let len = light_direction(s).length();
            assert!(
                (len - 1.0).abs() < 1e-5,
                "rotations must preserve length, got {len}"
            );
        }
    }

    #[test]
    fn test_rotation_order_is_not_commutative() {
        let s = sun(1.2, 0.35);
        let fixed = light_direction(s);
        let swapped = (Mat4::from_rotation_z(-s.declination as f32)
            * Mat4::from_rotation_y(-s.hour_angle as f32))
        .transform_point3(LIGHT_SEED);
        assert!(
            (fixed - swapped).length() > 1e-3,
            "swapping the Y/Z rotation order must change the light direction"
        );
    }

    #[test]
    fn test_light_direction_is_subsolar_point() {
        // The globe mapping puts latitude phi, longitude lambda at
        // (-cos(phi)cos(lambda), sin(phi), -cos(phi)sin(lambda)). The
        // light direction must land on that point for phi = declination,
        // lambda = hour angle.
        for (h, d) in [(0.7_f64, 0.2_f64), (-2.1, -0.35), (3.0, 0.4)] {
            let dir = light_direction(sun(h, d));
            let (h, d) = (h as f32, d as f32);
            let expected = Vec3::new(-d.cos() * h.cos(), d.sin(), -d.cos() * h.sin());
            assert!(
                (dir - expected).length() < 1e-5,
                "light {dir:?} should equal subsolar point {expected:?}"
            );
        }
    }

    #[test]
    fn test_light_tracks_real_timestamps() {
        // Over six hours the sun sweeps ~90° of hour angle, so the light
        // direction must move substantially.
        let a = light_direction(solar_coordinates(1_718_000_000_000));
        let b = light_direction(solar_coordinates(1_718_000_000_000 + 6 * 3_600_000));
        assert!(
            a.dot(b) < 0.5,
            "light directions six hours apart should diverge, dot = {}",
            a.dot(b)
        );
    }
}
