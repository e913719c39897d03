//! Globe sphere and map plane mesh generation.
//!
//! Both meshes use one fixed mapping: the surface point for latitude phi,
//! longitude lambda is `(-cos(phi)cos(lambda), sin(phi), -cos(phi)sin(lambda))`
//! on the unit sphere, and `(lambda_deg/180, 0, phi_deg/180)` on the plane.
//! The camera rigs and the light transform assume exactly this mapping, so
//! a rig parameterized by (lat, lon) faces the mesh point for (lat, lon)
//! and the light direction lands on the subsolar point.

use glam::Vec3;
use helio_render::VertexPositionNormalUv;

/// CPU-side mesh data ready for upload through a `BufferAllocator`.
pub struct MeshData {
    pub vertices: Vec<VertexPositionNormalUv>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Vertex data as raw bytes for buffer creation.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Unit-sphere surface point for a latitude/longitude pair in radians.
pub fn globe_point(lat_rad: f32, lon_rad: f32) -> Vec3 {
    Vec3::new(
        -lat_rad.cos() * lon_rad.cos(),
        lat_rad.sin(),
        -lat_rad.cos() * lon_rad.sin(),
    )
}

/// Generate the globe as a UV sphere with equirectangular texture
/// coordinates. `stacks` spans pole to pole, `slices` spans the full
/// longitude range; the seam column is duplicated so UVs stay monotonic.
/// Vertex count must stay within 16-bit index range.
pub fn generate_globe_sphere(stacks: u32, slices: u32) -> MeshData {
    let vertex_count = ((stacks + 1) * (slices + 1)) as usize;
    debug_assert!(vertex_count <= u16::MAX as usize + 1);

    let mut vertices = Vec::with_capacity(vertex_count);
    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        let lat_deg = 90.0 - 180.0 * v;
        for j in 0..=slices {
            let u = j as f32 / slices as f32;
            let lon_deg = -180.0 + 360.0 * u;
            let position = globe_point(lat_deg.to_radians(), lon_deg.to_radians());
            vertices.push(VertexPositionNormalUv {
                position: position.into(),
                normal: position.into(),
                uv: [u, v],
            });
        }
    }

    let indices = grid_indices(stacks, slices);
    MeshData { vertices, indices }
}

/// Generate the flat map plane: a grid spanning x in [-1, 1] (longitude)
/// and z in [-0.5, 0.5] (latitude) at y = 0, facing +Y.
pub fn generate_map_plane(cols: u32, rows: u32) -> MeshData {
    let vertex_count = ((rows + 1) * (cols + 1)) as usize;
    debug_assert!(vertex_count <= u16::MAX as usize + 1);

    let mut vertices = Vec::with_capacity(vertex_count);
    for i in 0..=rows {
        let v = i as f32 / rows as f32;
        let z = 0.5 - v;
        for j in 0..=cols {
            let u = j as f32 / cols as f32;
            let x = 2.0 * u - 1.0;
            vertices.push(VertexPositionNormalUv {
                position: [x, 0.0, z],
                normal: [0.0, 1.0, 0.0],
                uv: [u, v],
            });
        }
    }

    let indices = grid_indices(rows, cols);
    MeshData { vertices, indices }
}

/// Triangle indices for an (rows x cols) quad grid laid out row-major
/// with cols + 1 vertices per row. Winding is counter-clockwise seen from
/// outside the sphere / above the plane.
fn grid_indices(rows: u32, cols: u32) -> Vec<u16> {
    let stride = cols + 1;
    let mut indices = Vec::with_capacity((rows * cols * 6) as usize);
    for i in 0..rows {
        for j in 0..cols {
            let a = (i * stride + j) as u16;
            let b = (i * stride + j + 1) as u16;
            let c = ((i + 1) * stride + j + 1) as u16;
            let d = ((i + 1) * stride + j) as u16;
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_winding_normal(mesh: &MeshData, tri: usize) -> Vec3 {
        let i = tri * 3;
        let p0 = Vec3::from(mesh.vertices[mesh.indices[i] as usize].position);
        let p1 = Vec3::from(mesh.vertices[mesh.indices[i + 1] as usize].position);
        let p2 = Vec3::from(mesh.vertices[mesh.indices[i + 2] as usize].position);
        (p1 - p0).cross(p2 - p0)
    }

    #[test]
    fn test_globe_point_mapping() {
        assert!((globe_point(0.0, 0.0) - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-6);
        assert!(
            (globe_point(std::f32::consts::FRAC_PI_2, 0.0) - Vec3::Y).length() < 1e-6,
            "north pole should be +Y"
        );
        assert!(
            (globe_point(0.0, std::f32::consts::FRAC_PI_2) - Vec3::new(0.0, 0.0, -1.0)).length()
                < 1e-6
        );
    }

    #[test]
    fn test_sphere_vertices_on_unit_sphere() {
        let mesh = generate_globe_sphere(16, 32);
        for vertex in &mesh.vertices {
            let len = Vec3::from(vertex.position).length();
            assert!(
                (len - 1.0).abs() < 1e-5,
                "vertex not on unit sphere: length = {len}"
            );
        }
    }

    #[test]
    fn test_sphere_normals_equal_positions() {
        let mesh = generate_globe_sphere(8, 16);
        for vertex in &mesh.vertices {
            let diff = (Vec3::from(vertex.position) - Vec3::from(vertex.normal)).length();
            assert!(diff < 1e-6, "unit sphere normal should equal position");
        }
    }

    #[test]
    fn test_sphere_winding_faces_outward() {
        let mesh = generate_globe_sphere(16, 32);
        let triangle_count = mesh.indices.len() / 3;
        for tri in 0..triangle_count {
            let winding = triangle_winding_normal(&mesh, tri);
            if winding.length() < 1e-10 {
                continue; // degenerate triangle at a pole
            }
            let i = tri * 3;
            let centroid = (Vec3::from(mesh.vertices[mesh.indices[i] as usize].position)
                + Vec3::from(mesh.vertices[mesh.indices[i + 1] as usize].position)
                + Vec3::from(mesh.vertices[mesh.indices[i + 2] as usize].position))
                / 3.0;
            assert!(
                winding.dot(centroid) > 0.0,
                "triangle {tri} winds inward (back-face culling would hide it)"
            );
        }
    }

    #[test]
    fn test_sphere_indices_fit_u16_and_are_valid() {
        let mesh = generate_globe_sphere(48, 96);
        let n = mesh.vertices.len();
        assert!(n <= u16::MAX as usize + 1, "vertex count {n} exceeds u16");
        for &idx in &mesh.indices {
            assert!((idx as usize) < n, "index {idx} out of bounds");
        }
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_sphere_uvs_cover_unit_square() {
        let mesh = generate_globe_sphere(8, 16);
        for vertex in &mesh.vertices {
            assert!(vertex.uv[0] >= 0.0 && vertex.uv[0] <= 1.0);
            assert!(vertex.uv[1] >= 0.0 && vertex.uv[1] <= 1.0);
        }
        // The seam column duplicates u=0 as u=1 so UVs stay monotonic.
        assert!(mesh.vertices.iter().any(|v| v.uv[0] == 0.0));
        assert!(mesh.vertices.iter().any(|v| v.uv[0] == 1.0));
    }

    #[test]
    fn test_plane_spans_map_extents() {
        let mesh = generate_map_plane(8, 4);
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for vertex in &mesh.vertices {
            min = min.min(Vec3::from(vertex.position));
            max = max.max(Vec3::from(vertex.position));
        }
        assert!((min.x + 1.0).abs() < 1e-6 && (max.x - 1.0).abs() < 1e-6);
        assert!((min.z + 0.5).abs() < 1e-6 && (max.z - 0.5).abs() < 1e-6);
        assert!(min.y.abs() < 1e-6 && max.y.abs() < 1e-6, "plane sits at y = 0");
    }

    #[test]
    fn test_plane_winding_faces_up() {
        let mesh = generate_map_plane(8, 4);
        let triangle_count = mesh.indices.len() / 3;
        for tri in 0..triangle_count {
            let winding = triangle_winding_normal(&mesh, tri);
            assert!(
                winding.y > 0.0,
                "plane triangle {tri} must wind counter-clockwise seen from above"
            );
        }
    }

    #[test]
    fn test_plane_north_is_top_of_texture() {
        // v = 0 (texture top) must map to z = 0.5 (latitude +90 side).
        let mesh = generate_map_plane(4, 2);
        for vertex in &mesh.vertices {
            if vertex.uv[1] == 0.0 {
                assert!((vertex.position[2] - 0.5).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_grid_index_count() {
        let mesh = generate_map_plane(8, 4);
        assert_eq!(mesh.indices.len(), (8 * 4 * 6) as usize);
        let sphere = generate_globe_sphere(16, 32);
        assert_eq!(sphere.indices.len(), (16 * 32 * 6) as usize);
    }
}
