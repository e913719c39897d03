//! The two camera rigs: globe orbit and map pan.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::CameraControls;

/// Eye, target, and up vectors ready for look-at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Orbit rig for the globe: the eye starts on the depth axis at distance
/// `4.5 - zoom * 3` and is swung around the origin by an orientation built
/// from longitude (about Y, offset a quarter turn) then latitude (about X).
/// The up vector rides the same orientation; the target stays at the
/// globe's center.
pub fn sphere_rig(controls: &CameraControls) -> CameraRig {
    let orientation = Mat4::from_rotation_y(-controls.longitude_deg().to_radians() + FRAC_PI_2)
        * Mat4::from_rotation_x(controls.latitude_deg().to_radians());

    CameraRig {
        eye: orientation.transform_point3(Vec3::new(0.0, 0.0, -(4.5 - controls.zoom() * 3.0))),
        target: Vec3::ZERO,
        up: orientation.transform_point3(Vec3::Y),
    }
}

/// Pan rig for the map plane: the eye hovers at height `2.2 - zoom * 2`
/// and slides with the target by `(longitude/180, 0, latitude/180)`. Up is
/// the fixed +Z axis (north stays up-screen), untransformed.
pub fn plane_rig(controls: &CameraControls) -> CameraRig {
    let position = Mat4::from_translation(Vec3::new(
        controls.longitude_deg() / 180.0,
        0.0,
        controls.latitude_deg() / 180.0,
    ));

    CameraRig {
        eye: position.transform_point3(Vec3::new(0.0, 2.2 - controls.zoom() * 2.0, 0.0)),
        target: position.transform_point3(Vec3::ZERO),
        up: Vec3::Z,
    }
}
