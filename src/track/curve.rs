use crate::sim::Float3;

/// Tension of the uniform Catmull-Rom spline.
const TENSION: f32 = 0.5;

/// Step of the central difference used when the analytic derivative vanishes.
const DIFFERENCE_STEP: f32 = 1e-4;

/// Uniform Catmull-Rom spline through an ordered set of positions.
///
/// The parameter `t ∈ [0, 1]` is split evenly across segments: `n - 1` of them for
/// an open curve, `n` for a closed one. Open ends are extrapolated by reflecting the
/// neighbouring point; closed curves wrap.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom {
    points: Vec<Float3>,
    closed: bool,
}

/// Cubic Hermite coefficients of one segment (per component).
struct Segment {
    c0: Float3,
    c1: Float3,
    c2: Float3,
    c3: Float3,
}

impl Segment {
    fn new(p0: Float3, p1: Float3, p2: Float3, p3: Float3) -> Self {
        let t0 = (p2 - p0) * TENSION;
        let t1 = (p3 - p1) * TENSION;
        Self {
            c0: p1,
            c1: t0,
            c2: p1 * -3.0 + p2 * 3.0 - t0 * 2.0 - t1,
            c3: p1 * 2.0 - p2 * 2.0 + t0 + t1,
        }
    }

    fn point(&self, w: f32) -> Float3 {
        let w2 = w * w;
        self.c0 + self.c1 * w + self.c2 * w2 + self.c3 * (w2 * w)
    }

    fn derivative(&self, w: f32) -> Float3 {
        self.c1 + self.c2 * (2.0 * w) + self.c3 * (3.0 * w * w)
    }
}

impl CatmullRom {
    /// Returns `None` for fewer than 2 positions.
    pub fn new(points: Vec<Float3>, closed: bool) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self { points, closed })
    }

    pub fn points(&self) -> &[Float3] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn segment_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Segment index and local weight for parameter `t`.
    fn locate(&self, t: f32) -> (usize, f32) {
        let n = self.points.len();
        let t = if self.closed {
            t.rem_euclid(1.0)
        } else {
            t.clamp(0.0, 1.0)
        };
        let p = self.segment_count() as f32 * t;
        let mut index = p.floor() as usize;
        let mut weight = p - index as f32;

        if self.closed {
            index %= n;
        } else if index >= n - 1 {
            index = n - 2;
            weight = 1.0;
        }
        (index, weight)
    }

    fn segment(&self, index: usize) -> Segment {
        let pts = &self.points;
        let n = pts.len();

        let p0 = if self.closed || index > 0 {
            pts[(index + n - 1) % n]
        } else {
            pts[0] * 2.0 - pts[1]
        };
        let p1 = pts[index % n];
        let p2 = pts[(index + 1) % n];
        let p3 = if self.closed || index + 2 < n {
            pts[(index + 2) % n]
        } else {
            pts[n - 1] * 2.0 - pts[n - 2]
        };

        Segment::new(p0, p1, p2, p3)
    }

    pub fn point_at(&self, t: f32) -> Float3 {
        let (index, weight) = self.locate(t);
        self.segment(index).point(weight)
    }

    /// Derivative with respect to `t`.
    pub fn derivative_at(&self, t: f32) -> Float3 {
        let (index, weight) = self.locate(t);
        self.segment(index).derivative(weight) * self.segment_count() as f32
    }

    /// Unit tangent at `t`.
    ///
    /// Falls back to a central difference where the derivative vanishes (coincident
    /// control points), and to zero if the curve does not move there at all.
    pub fn tangent_at(&self, t: f32) -> Float3 {
        let tangent = self.derivative_at(t).normalize();
        if tangent != Float3::ZERO {
            return tangent;
        }
        let (t1, t2) = if self.closed {
            (t - DIFFERENCE_STEP, t + DIFFERENCE_STEP)
        } else {
            (
                (t - DIFFERENCE_STEP).max(0.0),
                (t + DIFFERENCE_STEP).min(1.0),
            )
        };
        (self.point_at(t2) - self.point_at(t1)).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-4;

    fn assert_vec_eq(a: Float3, b: Float3) {
        assert_relative_eq!(a.x, b.x, epsilon = TOLERANCE);
        assert_relative_eq!(a.y, b.y, epsilon = TOLERANCE);
        assert_relative_eq!(a.z, b.z, epsilon = TOLERANCE);
    }

    fn corner() -> CatmullRom {
        CatmullRom::new(
            vec![
                Float3::new(0.0, 0.0, 0.0),
                Float3::new(10.0, 0.0, 0.0),
                Float3::new(10.0, 0.0, 10.0),
            ],
            false,
        )
        .unwrap()
    }

    #[test]
    fn fewer_than_two_points_is_no_curve() {
        assert!(CatmullRom::new(vec![], false).is_none());
        assert!(CatmullRom::new(vec![Float3::ZERO], true).is_none());
    }

    #[test]
    fn open_curve_interpolates_control_points() {
        let curve = corner();
        assert_vec_eq(curve.point_at(0.0), Float3::new(0.0, 0.0, 0.0));
        assert_vec_eq(curve.point_at(0.5), Float3::new(10.0, 0.0, 0.0));
        assert_vec_eq(curve.point_at(1.0), Float3::new(10.0, 0.0, 10.0));
    }

    #[test]
    fn open_curve_clamps_parameter() {
        let curve = corner();
        assert_vec_eq(curve.point_at(-0.5), curve.point_at(0.0));
        assert_vec_eq(curve.point_at(1.5), curve.point_at(1.0));
    }

    #[test]
    fn closed_curve_wraps_to_start() {
        let curve = CatmullRom::new(
            vec![
                Float3::new(0.0, 0.0, 0.0),
                Float3::new(10.0, 0.0, 0.0),
                Float3::new(10.0, 0.0, 10.0),
                Float3::new(0.0, 0.0, 10.0),
            ],
            true,
        )
        .unwrap();
        assert_eq!(curve.segment_count(), 4);
        assert_vec_eq(curve.point_at(0.25), Float3::new(10.0, 0.0, 0.0));
        assert_vec_eq(curve.point_at(0.75), Float3::new(0.0, 0.0, 10.0));
        assert_vec_eq(curve.point_at(1.0), curve.point_at(0.0));
        assert_vec_eq(curve.tangent_at(1.0), curve.tangent_at(0.0));
    }

    #[test]
    fn straight_line_tangent_is_axis() {
        let curve = CatmullRom::new(
            vec![Float3::ZERO, Float3::new(4.0, 0.0, 0.0), Float3::new(20.0, 0.0, 0.0)],
            false,
        )
        .unwrap();
        for i in 0..=10 {
            let tangent = curve.tangent_at(i as f32 / 10.0);
            assert_vec_eq(tangent, Float3::RIGHT);
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let curve = corner();
        let t = 0.3;
        let h = 1e-3;
        let numeric = (curve.point_at(t + h) - curve.point_at(t - h)) * (1.0 / (2.0 * h));
        let analytic = curve.derivative_at(t);
        assert_relative_eq!(numeric.x, analytic.x, epsilon = 0.05);
        assert_relative_eq!(numeric.z, analytic.z, epsilon = 0.05);
    }

    #[test]
    fn coincident_points_still_give_a_tangent() {
        let curve = CatmullRom::new(
            vec![
                Float3::ZERO,
                Float3::new(5.0, 0.0, 0.0),
                Float3::new(5.0, 0.0, 0.0),
                Float3::new(10.0, 0.0, 0.0),
            ],
            false,
        )
        .unwrap();
        let tangent = curve.tangent_at(0.5);
        assert_relative_eq!(tangent.magnitude(), 1.0, epsilon = TOLERANCE);
    }
}
