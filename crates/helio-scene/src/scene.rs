//! The scene: two static mesh buffers, the texture set, and the moment
//! source.

use helio_render::{BufferAllocator, MeshBuffer, RenderContext, TextureError, TextureManager};

use crate::mesh::{generate_globe_sphere, generate_map_plane};
use crate::moment::MomentSource;
use crate::textures::{
    DAY_MAP, FALLBACK_MAP_HEIGHT, FALLBACK_MAP_WIDTH, MapPixels, NIGHT_MAP, SceneAssets,
    fallback_day_pixels, fallback_night_pixels, load_map_pixels,
};

/// Sphere tessellation: pole-to-pole stacks and full-circle slices.
const SPHERE_STACKS: u32 = 48;
const SPHERE_SLICES: u32 = 96;
/// Plane grid resolution.
const PLANE_COLS: u32 = 64;
const PLANE_ROWS: u32 = 32;

/// Errors raised while assembling the scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A configured map image could not be read or decoded.
    #[error("failed to decode map image: {0}")]
    Decode(#[from] image::ImageError),

    /// Texture upload was rejected.
    #[error("failed to create texture: {0}")]
    Texture(#[from] TextureError),
}

/// The scene: immutable GPU resources plus the moment source.
pub struct Scene {
    /// Globe mesh, drawn in sphere mode.
    pub sphere_buffer: MeshBuffer,
    /// Map plane mesh, drawn in plane mode.
    pub plane_buffer: MeshBuffer,
    /// Named textures ("day", "night") and the shared map sampler.
    pub textures: TextureManager,
    moment: MomentSource,
}

impl Scene {
    /// Build the scene: generate and upload both meshes, load or
    /// synthesize both maps, and install the moment source.
    pub fn new(
        ctx: &RenderContext,
        assets: &SceneAssets,
        moment: MomentSource,
    ) -> Result<Self, SceneError> {
        let allocator = BufferAllocator::new(&ctx.device);

        let sphere = generate_globe_sphere(SPHERE_STACKS, SPHERE_SLICES);
        let sphere_buffer = allocator.create_mesh("globe", sphere.vertex_bytes(), &sphere.indices);
        log::info!(
            "Globe mesh: {} vertices, {} indices",
            sphere.vertices.len(),
            sphere.indices.len()
        );

        let plane = generate_map_plane(PLANE_COLS, PLANE_ROWS);
        let plane_buffer = allocator.create_mesh("map", plane.vertex_bytes(), &plane.indices);

        let mut textures = TextureManager::new(&ctx.device);
        for (name, path) in [(DAY_MAP, &assets.day_map), (NIGHT_MAP, &assets.night_map)] {
            let pixels = match path {
                Some(path) => load_map_pixels(path)?,
                None => {
                    log::warn!("No {name} map configured, using procedural placeholder");
                    fallback_pixels(name)
                }
            };
            textures.create_texture(
                &ctx.device,
                &ctx.queue,
                name,
                &pixels.data,
                pixels.width,
                pixels.height,
                wgpu::TextureFormat::Rgba8UnormSrgb,
            )?;
        }

        Ok(Self {
            sphere_buffer,
            plane_buffer,
            textures,
            moment,
        })
    }

    /// The scene's current moment in Unix milliseconds.
    pub fn calculated_moment(&self) -> i64 {
        self.moment.calculated_moment()
    }

    /// Mutable access to the moment source for UI scrubbing.
    pub fn moment_mut(&mut self) -> &mut MomentSource {
        &mut self.moment
    }
}

fn fallback_pixels(name: &str) -> MapPixels {
    if name == NIGHT_MAP {
        fallback_night_pixels(FALLBACK_MAP_WIDTH, FALLBACK_MAP_HEIGHT)
    } else {
        fallback_day_pixels(FALLBACK_MAP_WIDTH, FALLBACK_MAP_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_resolutions_fit_u16_indices() {
        assert!((SPHERE_STACKS + 1) * (SPHERE_SLICES + 1) <= u16::MAX as u32 + 1);
        assert!((PLANE_ROWS + 1) * (PLANE_COLS + 1) <= u16::MAX as u32 + 1);
    }

    #[test]
    fn test_fallback_pixels_by_name() {
        let day = fallback_pixels(DAY_MAP);
        let night = fallback_pixels(NIGHT_MAP);
        assert_eq!(day.width, FALLBACK_MAP_WIDTH);
        assert_eq!(night.height, FALLBACK_MAP_HEIGHT);
        // Day placeholder is brighter than the night one on average.
        let sum = |m: &MapPixels| -> u64 { m.data.iter().map(|&b| b as u64).sum() };
        assert!(sum(&day) > sum(&night));
    }
}
