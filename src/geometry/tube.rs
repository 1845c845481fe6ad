//! Tube surface swept along the backbone curve.
//!
//! A sequence of ring cross-sections placed along the curve, each ring
//! oriented by a rotation-minimizing frame so the tube never twists
//! through kinks, triangulated between consecutive rings. The tube is
//! open-ended: no caps.

use glam::Vec3;

use super::spline::BackboneCurve;
use crate::options::GeometryOptions;

/// Ring cross-sections per backbone point.
///
/// Axial resolution scales with chain length: short chains degrade
/// gracefully, long ones stay bounded. Fixed by design — heavily kinked
/// chains may show faceting.
pub const SEGMENTS_PER_POINT: usize = 4;

/// Vertex of the tube and marker surfaces.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Outward surface normal.
    pub normal: [f32; 3],
}

/// Triangulated tube surface data.
#[derive(Debug, Clone, Default)]
pub struct TubeMesh {
    /// Ring vertices, `ring_count × radial_segments` entries.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
    /// Number of ring cross-sections along the curve.
    pub ring_count: usize,
}

/// A sampled point on the curve with its moving frame.
#[derive(Clone, Copy)]
struct FramePoint {
    pos: Vec3,
    tangent: Vec3,
    normal: Vec3,
    binormal: Vec3,
}

impl TubeMesh {
    /// Sweep a constant-radius tube along `curve`.
    ///
    /// The ring count is `point_count × SEGMENTS_PER_POINT`, sampled
    /// uniformly over the full parameter range so the last ring lands on
    /// the final backbone point.
    #[must_use]
    pub fn sweep(curve: &BackboneCurve, geometry: &GeometryOptions) -> Self {
        let ring_count = curve.point_count() * SEGMENTS_PER_POINT;
        let radial = geometry.tube_radial_segments.max(3) as usize;
        let radius = geometry.tube_radius;

        let frames = sample_frames(curve, ring_count);

        let mut vertices = Vec::with_capacity(ring_count * radial);
        for frame in &frames {
            for k in 0..radial {
                let angle = (k as f32 / radial as f32) * std::f32::consts::TAU;
                let offset =
                    frame.normal * angle.cos() + frame.binormal * angle.sin();
                vertices.push(MeshVertex {
                    position: (frame.pos + offset * radius).into(),
                    normal: offset.to_array(),
                });
            }
        }

        let mut indices = Vec::with_capacity((ring_count - 1) * radial * 6);
        for i in 0..ring_count - 1 {
            let ring = (i * radial) as u32;
            let next_ring = ((i + 1) * radial) as u32;
            for k in 0..radial as u32 {
                let k_next = (k + 1) % radial as u32;

                let v0 = ring + k;
                let v1 = ring + k_next;
                let v2 = next_ring + k;
                let v3 = next_ring + k_next;

                indices.extend_from_slice(&[v0, v2, v1]);
                indices.extend_from_slice(&[v1, v2, v3]);
            }
        }

        Self {
            vertices,
            indices,
            ring_count,
        }
    }

    /// Translate every vertex by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position = (Vec3::from_array(v.position) + offset).into();
        }
    }
}

/// Sample `count` frame points uniformly over the curve's parameter range
/// and orient them with rotation-minimizing frames.
fn sample_frames(curve: &BackboneCurve, count: usize) -> Vec<FramePoint> {
    let denom = (count - 1).max(1) as f32;
    let mut frames: Vec<FramePoint> = (0..count)
        .map(|i| {
            let t = i as f32 / denom;
            FramePoint {
                pos: curve.position(t),
                tangent: curve.tangent(t),
                normal: Vec3::ZERO,
                binormal: Vec3::ZERO,
            }
        })
        .collect();
    compute_rmf(&mut frames);
    frames
}

/// Compute rotation-minimizing frames using the double reflection method
/// (Wang et al. 2008).
fn compute_rmf(points: &mut [FramePoint]) {
    if points.is_empty() {
        return;
    }

    let t0 = points[0].tangent;
    let arbitrary = if t0.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let n0 = t0.cross(arbitrary).normalize();
    let b0 = t0.cross(n0).normalize();

    points[0].normal = n0;
    points[0].binormal = b0;

    for i in 0..points.len() - 1 {
        let x_i = points[i].pos;
        let x_i1 = points[i + 1].pos;
        let t_i = points[i].tangent;
        let t_i1 = points[i + 1].tangent;
        let r_i = points[i].normal;

        let v1 = x_i1 - x_i;
        let c1 = v1.dot(v1);

        if c1 < 1e-10 {
            // Coincident samples: carry the previous frame forward.
            points[i + 1].normal = r_i;
            points[i + 1].binormal = points[i].binormal;
            continue;
        }

        // First reflection
        let r_i_l = r_i - (2.0 / c1) * v1.dot(r_i) * v1;
        let t_i_l = t_i - (2.0 / c1) * v1.dot(t_i) * v1;

        // Second reflection
        let v2 = t_i1 - t_i_l;
        let c2 = v2.dot(v2);

        let r_i1 = if c2 < 1e-10 {
            r_i_l
        } else {
            r_i_l - (2.0 / c2) * v2.dot(r_i_l) * v2
        };

        // Ensure orthonormality
        let r_i1 = (r_i1 - t_i1 * t_i1.dot(r_i1)).normalize();
        let s_i1 = t_i1.cross(r_i1).normalize();

        points[i + 1].normal = r_i1;
        points[i + 1].binormal = s_i1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_geometry() -> GeometryOptions {
        GeometryOptions::default()
    }

    #[test]
    fn ring_count_is_four_per_point() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let curve = BackboneCurve::new(&pts).unwrap();
        let mesh = TubeMesh::sweep(&curve, &default_geometry());
        assert_eq!(mesh.ring_count, 12);
    }

    #[test]
    fn vertex_and_index_counts_follow_ring_layout() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let curve = BackboneCurve::new(&pts).unwrap();
        let geo = default_geometry();
        let mesh = TubeMesh::sweep(&curve, &geo);

        let radial = geo.tube_radial_segments as usize;
        assert_eq!(mesh.vertices.len(), mesh.ring_count * radial);
        // Two triangles per quad between consecutive rings, open ends.
        assert_eq!(mesh.indices.len(), (mesh.ring_count - 1) * radial * 6);
    }

    #[test]
    fn rings_sit_at_tube_radius_from_the_axis() {
        let pts = [Vec3::ZERO, Vec3::X * 4.0];
        let curve = BackboneCurve::new(&pts).unwrap();
        let geo = default_geometry();
        let mesh = TubeMesh::sweep(&curve, &geo);

        // Straight chain along X: every vertex lies on a circle of the
        // configured radius in the YZ plane around the axis.
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let off_axis = (p.y * p.y + p.z * p.z).sqrt();
            assert!((off_axis - geo.tube_radius).abs() < 1e-4);
        }
    }

    #[test]
    fn normals_are_unit_and_perpendicular_to_a_straight_axis() {
        let pts = [Vec3::ZERO, Vec3::X * 4.0, Vec3::X * 8.0];
        let curve = BackboneCurve::new(&pts).unwrap();
        let mesh = TubeMesh::sweep(&curve, &default_geometry());

        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.x.abs() < 1e-4);
        }
    }

    #[test]
    fn translate_shifts_every_vertex() {
        let pts = [Vec3::ZERO, Vec3::X];
        let curve = BackboneCurve::new(&pts).unwrap();
        let mut mesh = TubeMesh::sweep(&curve, &default_geometry());
        let before = Vec3::from_array(mesh.vertices[0].position);
        mesh.translate(Vec3::new(0.0, 5.0, 0.0));
        let after = Vec3::from_array(mesh.vertices[0].position);
        assert!((after - before - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-6);
    }
}
