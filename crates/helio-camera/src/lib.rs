//! Camera controls, the two navigation rigs, and view/projection assembly.
//!
//! The viewer has two navigation metaphors sharing one shading pipeline:
//! orbiting a globe and panning a flat map. Both rigs are derived fresh
//! every frame from the same [`CameraControls`]; the active one is chosen
//! by `sphere_mode` alone.

mod controls;
mod rig;
mod view;

pub use controls::CameraControls;
pub use rig::{CameraRig, plane_rig, sphere_rig};
pub use view::{FOV_Y, Z_FAR, Z_NEAR, look_at, projection_matrix, view_matrix};
