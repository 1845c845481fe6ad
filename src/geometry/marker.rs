//! Per-residue marker spheres.
//!
//! One small sphere per backbone point, positioned exactly at that
//! point's coordinates. Markers are decorative augmentation — nothing
//! else consumes them. They render as one shared lat/long sphere mesh
//! drawn once per instance.

use glam::Vec3;

use super::tube::MeshVertex;

/// Per-instance data for one marker sphere.
/// Must match the WGSL `MarkerInstance` struct layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerInstance {
    /// xyz = sphere center, w = radius.
    pub center: [f32; 4],
}

/// The marker spheres for one structure.
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    /// One instance per backbone point, in point order.
    pub instances: Vec<MarkerInstance>,
    /// Shared sphere radius.
    pub radius: f32,
}

impl MarkerSet {
    /// One marker per backbone point, at that exact coordinate.
    #[must_use]
    pub fn for_points(points: &[Vec3], radius: f32) -> Self {
        let instances = points
            .iter()
            .map(|p| MarkerInstance {
                center: [p.x, p.y, p.z, radius],
            })
            .collect();
        Self { instances, radius }
    }

    /// Number of marker spheres.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the set holds no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Translate every marker center by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for inst in &mut self.instances {
            inst.center[0] += offset.x;
            inst.center[1] += offset.y;
            inst.center[2] += offset.z;
        }
    }

    /// Marker center positions.
    #[must_use]
    pub fn centers(&self) -> Vec<Vec3> {
        self.instances
            .iter()
            .map(|i| Vec3::new(i.center[0], i.center[1], i.center[2]))
            .collect()
    }
}

/// Generate a unit lat/long sphere mesh with the given segment counts.
///
/// Vertex positions double as normals; instances scale and offset the
/// mesh in the vertex shader.
#[must_use]
pub fn sphere_mesh(
    lat_segments: u32,
    long_segments: u32,
) -> (Vec<MeshVertex>, Vec<u32>) {
    let lat_segments = lat_segments.max(2);
    let long_segments = long_segments.max(3);

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for lat in 0..=lat_segments {
        let theta = lat as f32 * std::f32::consts::PI / lat_segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=long_segments {
            let phi =
                lon as f32 * std::f32::consts::TAU / long_segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let p = [
                cos_phi * sin_theta,
                cos_theta,
                sin_phi * sin_theta,
            ];
            vertices.push(MeshVertex {
                position: p,
                normal: p,
            });
        }
    }

    let stride = long_segments + 1;
    for lat in 0..lat_segments {
        for lon in 0..long_segments {
            let a = lat * stride + lon;
            let b = a + stride;

            indices.extend_from_slice(&[a, b, a + 1]);
            indices.extend_from_slice(&[a + 1, b, b + 1]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_marker_per_point_at_input_coordinates() {
        let pts = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        let set = MarkerSet::for_points(&pts, 0.5);
        assert_eq!(set.len(), 3);
        for (inst, p) in set.instances.iter().zip(&pts) {
            assert_eq!(inst.center[0], p.x);
            assert_eq!(inst.center[1], p.y);
            assert_eq!(inst.center[2], p.z);
            assert_eq!(inst.center[3], 0.5);
        }
    }

    #[test]
    fn marker_count_is_independent_of_curve_density() {
        // 7 points → 7 markers, regardless of how finely the tube samples.
        let pts: Vec<Vec3> =
            (0..7).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let set = MarkerSet::for_points(&pts, 0.5);
        assert_eq!(set.len(), pts.len());
    }

    #[test]
    fn sphere_mesh_vertices_are_unit_length() {
        let (vertices, indices) = sphere_mesh(16, 16);
        assert_eq!(vertices.len(), 17 * 17);
        assert_eq!(indices.len() as u32, 16 * 16 * 6);
        for v in &vertices {
            let len = Vec3::from_array(v.position).length();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_indices_stay_in_bounds() {
        let (vertices, indices) = sphere_mesh(8, 12);
        let max = vertices.len() as u32;
        assert!(indices.iter().all(|&i| i < max));
    }
}
