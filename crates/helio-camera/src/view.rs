//! Look-at, view, and projection matrix assembly.

use glam::{Mat4, Vec3};

/// Vertical field of view in radians (30 degrees).
pub const FOV_Y: f32 = 30.0 * std::f32::consts::PI / 180.0;
/// Near clip plane distance.
pub const Z_NEAR: f32 = 0.01;
/// Far clip plane distance.
pub const Z_FAR: f32 = 10.0;

/// Build the camera-to-world matrix for an eye looking at a target.
///
/// Columns are the camera's right/up/backward axes plus the eye position;
/// the view matrix is the inverse of this. Requires eye != target and up
/// not parallel to eye - target.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let z_axis = (eye - target).normalize();
    let x_axis = up.cross(z_axis).normalize();
    let y_axis = z_axis.cross(x_axis);

    Mat4::from_cols(
        x_axis.extend(0.0),
        y_axis.extend(0.0),
        z_axis.extend(0.0),
        eye.extend(1.0),
    )
}

/// World-to-camera view matrix: the inverse of [`look_at`].
pub fn view_matrix(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    look_at(eye, target, up).inverse()
}

/// Fixed-parameter perspective projection for the given aspect ratio
/// (width / height), in wgpu's 0..1 clip depth convention.
pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_Y, aspect, Z_NEAR, Z_FAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn assert_mat4_eq(a: Mat4, b: Mat4, eps: f32) {
        for col in 0..4 {
            for row in 0..4 {
                let (x, y) = (a.col(col)[row], b.col(col)[row]);
                assert!(
                    (x - y).abs() < eps,
                    "matrix mismatch at col={col}, row={row}: {x} vs {y}"
                );
            }
        }
    }

    #[test]
    fn test_look_at_columns_are_orthonormal() {
        let m = look_at(
            Vec3::new(2.0, 1.5, -3.0),
            Vec3::new(0.2, -0.1, 0.4),
            Vec3::Y,
        );
        let x = m.col(0).truncate();
        let y = m.col(1).truncate();
        let z = m.col(2).truncate();
        for (name, v) in [("x", x), ("y", y), ("z", z)] {
            assert!((v.length() - 1.0).abs() < 1e-5, "{name} axis not unit");
        }
        assert!(x.dot(y).abs() < 1e-5);
        assert!(x.dot(z).abs() < 1e-5);
        assert!(y.dot(z).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_translation_is_eye() {
        let eye = Vec3::new(-4.5, 0.0, 0.0);
        let m = look_at(eye, Vec3::ZERO, Vec3::Y);
        assert!((m.col(3).truncate() - eye).length() < 1e-6);
    }

    #[test]
    fn test_view_is_inverse_of_look_at() {
        let triples = [
            (Vec3::new(0.0, 0.0, -4.5), Vec3::ZERO, Vec3::Y),
            (Vec3::new(0.5, 2.2, -0.25), Vec3::new(0.5, 0.0, -0.25), Vec3::Z),
            (Vec3::new(1.0, 3.0, 2.0), Vec3::new(-1.0, 0.5, 0.0), Vec3::Y),
        ];
        for (eye, target, up) in triples {
            let product = view_matrix(eye, target, up) * look_at(eye, target, up);
            assert_mat4_eq(product, Mat4::IDENTITY, 1e-4);
        }
    }

    #[test]
    fn test_view_matches_glam_look_at_rh() {
        // inverse(camera-to-world) is exactly the right-handed view matrix
        // glam builds directly.
        let triples = [
            (Vec3::new(0.0, 0.0, -4.5), Vec3::ZERO, Vec3::Y),
            (Vec3::new(-4.5, 0.0, 0.0), Vec3::ZERO, Vec3::Y),
            (Vec3::new(0.3, 1.4, 0.1), Vec3::new(0.3, 0.0, 0.1), Vec3::Z),
        ];
        for (eye, target, up) in triples {
            assert_mat4_eq(
                view_matrix(eye, target, up),
                Mat4::look_at_rh(eye, target, up),
                1e-4,
            );
        }
    }

    #[test]
    fn test_view_moves_eye_to_origin() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let view = view_matrix(eye, Vec3::ZERO, Vec3::Y);
        let at_origin = view.transform_point3(eye);
        assert!(at_origin.length() < 1e-4);
    }

    #[test]
    fn test_view_looks_down_negative_z() {
        // The target must land on the camera's -Z axis.
        let eye = Vec3::new(0.0, 0.0, -4.5);
        let view = view_matrix(eye, Vec3::ZERO, Vec3::Y);
        let target_in_view = view.transform_point3(Vec3::ZERO);
        assert!(target_in_view.x.abs() < 1e-4);
        assert!(target_in_view.y.abs() < 1e-4);
        assert!(
            target_in_view.z < 0.0,
            "target should be in front of the camera (-Z), got {target_in_view:?}"
        );
    }

    #[test]
    fn test_projection_parameters() {
        let proj = projection_matrix(16.0 / 9.0);
        // A point on the near plane maps to depth 0, far plane to depth 1
        // (wgpu convention).
        let near = proj * Vec4::new(0.0, 0.0, -Z_NEAR, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -Z_FAR, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_projection_aspect_scales_x() {
        let wide = projection_matrix(2.0);
        let square = projection_matrix(1.0);
        assert!(
            wide.col(0)[0] < square.col(0)[0],
            "wider aspect must compress x"
        );
        assert!((wide.col(1)[1] - square.col(1)[1]).abs() < 1e-6);
    }
}
