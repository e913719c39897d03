//! Scene assembly: the two static meshes, the day/night map textures, and
//! the moment source.
//!
//! The scene is built once at startup and is immutable afterwards except
//! for the moment accessor, which the UI layer may scrub or pause.

mod mesh;
mod moment;
mod scene;
mod textures;

pub use mesh::{MeshData, generate_globe_sphere, generate_map_plane, globe_point};
pub use moment::MomentSource;
pub use scene::{Scene, SceneError};
pub use textures::{
    DAY_MAP, FALLBACK_MAP_HEIGHT, FALLBACK_MAP_WIDTH, MapPixels, NIGHT_MAP, SceneAssets,
    fallback_day_pixels, fallback_night_pixels, load_map_pixels,
};
