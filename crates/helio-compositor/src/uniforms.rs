//! Per-frame uniform assembly as a pure function.
//!
//! Everything the shaders consume is derived here from three inputs: the
//! scene's moment, the camera controls, and the surface aspect ratio. The
//! result is an immutable value object rebuilt every frame, so stale
//! values from previous frames cannot survive.

use glam::{Mat4, Vec3};

use helio_camera::{CameraControls, plane_rig, projection_matrix, sphere_rig, view_matrix};
use helio_render::{DrawMode, FrameUniforms};
use helio_sun::{light_direction, solar_coordinates};

/// Everything the draw step needs for one frame: the uniform block and the
/// mode that selects the (pipeline, mesh) pair.
#[derive(Clone, Copy, Debug)]
pub struct FrameState {
    pub uniforms: FrameUniforms,
    pub mode: DrawMode,
}

/// Assemble the complete uniform set for one frame.
///
/// Both rigs are always computed; the non-active eye is still present in
/// the uniforms. Only the view matrix follows the active mode.
pub fn assemble_frame(moment_ms: i64, controls: &CameraControls, aspect: f32) -> FrameState {
    let sun = solar_coordinates(moment_ms);
    let light = light_direction(sun);

    let sphere = sphere_rig(controls);
    let plane = plane_rig(controls);

    let mode = DrawMode::from_sphere_mode(controls.sphere_mode);
    let active = match mode {
        DrawMode::Sphere => &sphere,
        DrawMode::Plane => &plane,
    };

    let view = view_matrix(active.eye, active.target, active.up);
    let projection = projection_matrix(aspect);

    FrameState {
        uniforms: FrameUniforms {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            sphere_eye: point_uniform(sphere.eye),
            plane_eye: point_uniform(plane.eye),
            light_direction: point_uniform(light),
            time: (moment_ms as f64 / 1000.0) as f32,
            _padding: [0.0; 3],
        },
        mode,
    }
}

fn point_uniform(v: Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}
