//! # Primitive Shape Generation
//!
//! Shapes generated with normals and texture coordinates.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a UV sphere with specified resolution and radius
///
/// # Arguments
/// * `slices` - Number of vertical segments (longitude lines)
/// * `stacks` - Number of horizontal segments (latitude lines)
/// * `radius` - Sphere radius
///
/// Returns a sphere centered at the origin. Texture coordinates follow an
/// equirectangular mapping, so a panorama image wraps the whole sphere.
pub fn generate_sphere(slices: u32, stacks: u32, radius: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = slices.max(3);
    let lat_segs = stacks.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);

            let u = long as f32 / long_segs as f32;
            let v = lat as f32 / lat_segs as f32;
            data.tex_coords.push([u, v]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(36, 18, 50.0);
        assert_eq!(sphere.vertex_count(), 37 * 19);
        assert_eq!(sphere.triangle_count(), 36 * 18 * 2);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());

        let max_index = *sphere.indices.iter().max().unwrap();
        assert!((max_index as usize) < sphere.vertex_count());
    }

    #[test]
    fn test_sphere_radius() {
        let sphere = generate_sphere(8, 6, 2.5);
        for v in &sphere.vertices {
            let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((len - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_minimum_resolution() {
        let sphere = generate_sphere(1, 1, 1.0);
        assert_eq!(sphere.triangle_count(), 3 * 2 * 2);
    }
}
