//! Catmull-Rom-style interpolating spline through backbone points.
//!
//! A cardinal spline with a fixed tension coefficient: it passes through
//! every control point, and the tension controls how tightly the curve
//! hugs versus overshoots each one. Evaluation is cubic Hermite over the
//! precomputed per-point tangents.

use glam::Vec3;

/// Fixed smoothness/tension coefficient of the backbone curve.
///
/// 0.5 reproduces the classic Catmull-Rom tangents
/// `(pᵢ₊₁ − pᵢ₋₁) / 2`.
pub const TENSION: f32 = 0.5;

/// A continuous parametric curve through an ordered backbone point
/// sequence, parameterized over `[0, 1]`.
#[derive(Debug, Clone)]
pub struct BackboneCurve {
    points: Vec<Vec3>,
    tangents: Vec<Vec3>,
}

impl BackboneCurve {
    /// Build a curve through `points` in sequence order.
    ///
    /// Returns `None` for fewer than 2 points — a structure with 0 or 1
    /// backbone atoms is non-renderable, not an error. Duplicate and
    /// collinear points are fine.
    #[must_use]
    pub fn new(points: &[Vec3]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let n = points.len();
        let tangents: Vec<Vec3> = (0..n)
            .map(|i| {
                if i == 0 {
                    (points[1] - points[0]) * (2.0 * TENSION)
                } else if i == n - 1 {
                    (points[n - 1] - points[n - 2]) * (2.0 * TENSION)
                } else {
                    (points[i + 1] - points[i - 1]) * TENSION
                }
            })
            .collect();

        Some(Self {
            points: points.to_vec(),
            tangents,
        })
    }

    /// Number of control points the curve interpolates.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of Hermite spans (`point_count − 1`).
    #[must_use]
    pub fn span_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Point on the curve at parameter `t ∈ [0, 1]` (clamped).
    #[must_use]
    pub fn position(&self, t: f32) -> Vec3 {
        let (i, local) = self.locate(t);
        hermite_point(
            self.points[i],
            self.tangents[i],
            self.points[i + 1],
            self.tangents[i + 1],
            local,
        )
    }

    /// Normalized tangent at parameter `t ∈ [0, 1]` (clamped).
    ///
    /// Falls back to the chord direction of the containing span when the
    /// analytic derivative degenerates (coincident control points).
    #[must_use]
    pub fn tangent(&self, t: f32) -> Vec3 {
        let (i, local) = self.locate(t);
        let d = hermite_tangent(
            self.points[i],
            self.tangents[i],
            self.points[i + 1],
            self.tangents[i + 1],
            local,
        );
        if d.length_squared() > 1e-12 {
            return d.normalize();
        }
        let chord = self.points[i + 1] - self.points[i];
        if chord.length_squared() > 1e-12 {
            chord.normalize()
        } else {
            Vec3::X
        }
    }

    /// Map `t` to a span index and local parameter within that span.
    fn locate(&self, t: f32) -> (usize, f32) {
        let spans = self.span_count() as f32;
        let u = t.clamp(0.0, 1.0) * spans;
        let i = (u.floor() as usize).min(self.span_count() - 1);
        (i, u - i as f32)
    }
}

/// Cubic Hermite interpolation for position.
fn hermite_point(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    p0 * h00 + m0 * h10 + p1 * h01 + m1 * h11
}

/// Cubic Hermite interpolation for the tangent (derivative of position).
fn hermite_tangent(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;

    let dh00 = 6.0 * t2 - 6.0 * t;
    let dh10 = 3.0 * t2 - 4.0 * t + 1.0;
    let dh01 = -6.0 * t2 + 6.0 * t;
    let dh11 = 3.0 * t2 - 2.0 * t;

    p0 * dh00 + m0 * dh10 + p1 * dh01 + m1 * dh11
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_fewer_than_two_points() {
        assert!(BackboneCurve::new(&[]).is_none());
        assert!(BackboneCurve::new(&[Vec3::ZERO]).is_none());
    }

    #[test]
    fn accepts_two_points_and_degenerate_geometry() {
        assert!(BackboneCurve::new(&[Vec3::ZERO, Vec3::X]).is_some());
        // Duplicates and collinear runs must not fail construction.
        assert!(BackboneCurve::new(&[Vec3::ZERO, Vec3::ZERO]).is_some());
        assert!(BackboneCurve::new(&[
            Vec3::ZERO,
            Vec3::X,
            Vec3::X * 2.0,
            Vec3::X * 3.0,
        ])
        .is_some());
    }

    #[test]
    fn interpolates_through_every_control_point() {
        let pts = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 1.0, -1.0),
            Vec3::new(4.0, 4.0, 2.0),
        ];
        let curve = BackboneCurve::new(&pts).unwrap();

        for (i, p) in pts.iter().enumerate() {
            let t = i as f32 / (pts.len() - 1) as f32;
            let q = curve.position(t);
            assert!((q - *p).length() < 1e-4, "point {i}: {q} vs {p}");
        }
    }

    #[test]
    fn straight_chain_stays_on_the_line() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let curve = BackboneCurve::new(&pts).unwrap();

        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let p = curve.position(t);
            assert!(p.y.abs() < 1e-5 && p.z.abs() < 1e-5);
            assert!((-1e-4..=2.0001).contains(&p.x));
        }
    }

    #[test]
    fn tangent_points_along_a_straight_chain() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let curve = BackboneCurve::new(&pts).unwrap();
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let tan = curve.tangent(t);
            assert!((tan - Vec3::X).length() < 1e-4);
        }
    }

    #[test]
    fn parameter_is_clamped() {
        let pts = [Vec3::ZERO, Vec3::X];
        let curve = BackboneCurve::new(&pts).unwrap();
        assert!((curve.position(-1.0) - Vec3::ZERO).length() < 1e-5);
        assert!((curve.position(2.0) - Vec3::X).length() < 1e-5);
    }
}
