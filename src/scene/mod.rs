//! Scene composition: backbone points → renderable geometry.
//!
//! Composing runs the whole downstream pipeline — curve fit, tube sweep,
//! marker placement — then centers the combined geometry at the origin so
//! arbitrarily offset structure coordinates always appear centered in
//! view. Recomposing on new data fully replaces prior geometry; nothing
//! is diffed or mutated in place.

pub mod float;

use glam::{Mat4, Vec3};

pub use self::float::FloatAnimation;
use crate::geometry::{BackboneCurve, MarkerSet, TubeMesh};
use crate::options::Options;

/// A composed, renderable scene: centered tube + markers plus the idle
/// float animation that owns their motion.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Swept backbone tube, already centered.
    pub tube: TubeMesh,
    /// Marker spheres, already centered.
    pub markers: MarkerSet,
    /// Idle float animation; its clock started when this scene was
    /// composed.
    pub float: FloatAnimation,
    /// The translation that was baked into the geometry.
    center_offset: Vec3,
}

impl Scene {
    /// Compose a scene from parsed backbone points.
    ///
    /// With fewer than 2 points there is nothing to render: the result is
    /// an empty scene, not an error — the render loop draws background
    /// only.
    #[must_use]
    pub fn compose(points: &[Vec3], options: &Options) -> Self {
        let Some(curve) = BackboneCurve::new(points) else {
            if !points.is_empty() {
                log::info!(
                    "structure has {} backbone point(s); nothing to render",
                    points.len()
                );
            }
            return Self::empty(options);
        };

        let mut tube = TubeMesh::sweep(&curve, &options.geometry);
        let mut markers =
            MarkerSet::for_points(points, options.geometry.marker_radius);

        let offset = match combined_bounds(&tube, &markers) {
            Some((min, max)) => -((min + max) * 0.5),
            None => Vec3::ZERO,
        };
        tube.translate(offset);
        markers.translate(offset);

        log::debug!(
            "composed scene: {} rings, {} markers, centered by {offset}",
            tube.ring_count,
            markers.len()
        );

        Self {
            tube,
            markers,
            float: FloatAnimation::new(options.motion.clone()),
            center_offset: offset,
        }
    }

    /// A scene with nothing to draw.
    #[must_use]
    pub fn empty(options: &Options) -> Self {
        Self {
            tube: TubeMesh::default(),
            markers: MarkerSet::default(),
            float: FloatAnimation::new(options.motion.clone()),
            center_offset: Vec3::ZERO,
        }
    }

    /// Whether the scene holds any renderable geometry.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        !self.tube.indices.is_empty()
    }

    /// Model matrix for the current frame (idle float motion).
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        self.float.transform()
    }

    /// The translation baked into the geometry during centering.
    #[must_use]
    pub fn center_offset(&self) -> Vec3 {
        self.center_offset
    }

    /// Axis-aligned bounds of the composed geometry, if any.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        combined_bounds(&self.tube, &self.markers)
    }
}

/// AABB of the tube surface and the marker spheres (including their
/// radius).
fn combined_bounds(
    tube: &TubeMesh,
    markers: &MarkerSet,
) -> Option<(Vec3, Vec3)> {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    let mut any = false;

    for v in &tube.vertices {
        let p = Vec3::from_array(v.position);
        min = min.min(p);
        max = max.max(p);
        any = true;
    }
    for center in markers.centers() {
        min = min.min(center - Vec3::splat(markers.radius));
        max = max.max(center + Vec3::splat(markers.radius));
        any = true;
    }

    any.then_some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Options {
        Options::default()
    }

    #[test]
    fn composed_scene_is_centered_at_origin() {
        // Heavily offset coordinates, as PDB files commonly have.
        let points = [
            Vec3::new(100.0, -250.0, 40.0),
            Vec3::new(103.0, -248.0, 41.0),
            Vec3::new(106.0, -251.0, 44.0),
            Vec3::new(109.0, -247.0, 45.0),
        ];
        let scene = Scene::compose(&points, &options());
        let (min, max) = scene.bounds().unwrap();
        let center = (min + max) * 0.5;
        assert!(center.length() < 1e-3, "center was {center}");
    }

    #[test]
    fn centering_is_offset_invariant() {
        let base = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, 1.0, 3.0),
        ];
        let shift = Vec3::new(-500.0, 321.0, 77.0);
        let shifted: Vec<Vec3> = base.iter().map(|p| *p + shift).collect();

        let a = Scene::compose(&base, &options());
        let b = Scene::compose(&shifted, &options());

        let (amin, amax) = a.bounds().unwrap();
        let (bmin, bmax) = b.bounds().unwrap();
        assert!((amin - bmin).length() < 1e-2);
        assert!((amax - bmax).length() < 1e-2);
    }

    #[test]
    fn too_few_points_compose_an_empty_scene() {
        let scene = Scene::compose(&[], &options());
        assert!(!scene.is_renderable());
        assert!(scene.markers.is_empty());

        let scene = Scene::compose(&[Vec3::splat(5.0)], &options());
        assert!(!scene.is_renderable());
    }

    #[test]
    fn marker_count_matches_point_count() {
        let points: Vec<Vec3> =
            (0..9).map(|i| Vec3::new(i as f32 * 2.0, 0.0, 0.0)).collect();
        let scene = Scene::compose(&points, &options());
        assert_eq!(scene.markers.len(), 9);
        assert_eq!(scene.tube.ring_count, 9 * 4);
    }
}
