//! Day and night map pixels: decoded from image files when configured,
//! generated procedurally otherwise.

use std::path::{Path, PathBuf};

/// Uniform name of the daylight map.
pub const DAY_MAP: &str = "day";
/// Uniform name of the night-lights map.
pub const NIGHT_MAP: &str = "night";

/// Dimensions of the procedural fallback maps.
pub const FALLBACK_MAP_WIDTH: u32 = 512;
pub const FALLBACK_MAP_HEIGHT: u32 = 256;

/// Optional paths to equirectangular map images.
#[derive(Clone, Debug, Default)]
pub struct SceneAssets {
    pub day_map: Option<PathBuf>,
    pub night_map: Option<PathBuf>,
}

/// RGBA8 pixels with dimensions, ready for texture upload.
pub struct MapPixels {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode an image file into RGBA8 pixels.
pub fn load_map_pixels(path: &Path) -> Result<MapPixels, image::ImageError> {
    let decoded = image::open(path)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    log::info!("Loaded map {} ({width}x{height})", path.display());
    Ok(MapPixels {
        data: decoded.into_raw(),
        width,
        height,
    })
}

/// Procedural daylight placeholder: ocean blue with lighter polar bands
/// and a faint meridian grid, enough to read orientation without assets.
pub fn fallback_day_pixels(width: u32, height: u32) -> MapPixels {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        // 1.0 at the equator, 0.0 at the poles.
        let equatorness = 1.0 - ((y as f32 / height as f32) * 2.0 - 1.0).abs();
        for x in 0..width {
            let grid = x % (width / 8).max(1) == 0 || y % (height / 4).max(1) == 0;
            let (r, g, b) = if grid {
                (90, 120, 150)
            } else {
                let warm = (70.0 + 60.0 * equatorness) as u8;
                (30, warm, 160)
            };
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    MapPixels {
        data,
        width,
        height,
    }
}

/// Procedural night placeholder: near-black with scattered dim lights.
pub fn fallback_night_pixels(width: u32, height: u32) -> MapPixels {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let lit = pixel_hash(x, y) % 97 == 0;
            if lit {
                data.extend_from_slice(&[200, 180, 120, 255]);
            } else {
                data.extend_from_slice(&[4, 5, 12, 255]);
            }
        }
    }
    MapPixels {
        data,
        width,
        height,
    }
}

/// Deterministic per-pixel hash for the fallback light scatter.
fn pixel_hash(x: u32, y: u32) -> u32 {
    let mut h = x.wrapping_mul(374_761_393) ^ y.wrapping_mul(668_265_263);
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^ (h >> 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_day_dimensions_and_stride() {
        let map = fallback_day_pixels(64, 32);
        assert_eq!(map.width, 64);
        assert_eq!(map.height, 32);
        assert_eq!(map.data.len(), 64 * 32 * 4);
    }

    #[test]
    fn test_fallback_night_is_mostly_dark() {
        let map = fallback_night_pixels(64, 32);
        let lit = map
            .data
            .chunks(4)
            .filter(|px| px[0] > 100)
            .count();
        let total = (map.width * map.height) as usize;
        assert!(lit > 0, "some lights should exist");
        assert!(lit < total / 10, "most pixels should be dark, {lit} lit");
    }

    #[test]
    fn test_fallback_maps_are_opaque() {
        for map in [fallback_day_pixels(16, 8), fallback_night_pixels(16, 8)] {
            assert!(map.data.chunks(4).all(|px| px[3] == 255));
        }
    }

    #[test]
    fn test_pixel_hash_is_deterministic() {
        assert_eq!(pixel_hash(10, 20), pixel_hash(10, 20));
        assert_ne!(pixel_hash(10, 20), pixel_hash(20, 10));
    }

    #[test]
    fn test_load_map_pixels_missing_file_errors() {
        let result = load_map_pixels(Path::new("/nonexistent/helio-test-map.png"));
        assert!(result.is_err());
    }
}
