use super::curve::CatmullRom;
use super::point::{LoopMeta, TrackPoint};
use super::tilt::TiltProfile;
use crate::sim::{Float3, Frame};

/// One entry of the sampled frame table.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameSample {
    /// Curve parameter in `[0, 1]`.
    pub t: f32,
    pub position: Float3,
    pub tangent: Float3,
    pub up: Float3,
    pub normal: Float3,
    /// Bank angle in degrees.
    pub tilt: f32,
    /// Whether the frame came from loop metadata rather than transport.
    pub in_loop: bool,
}

impl FrameSample {
    pub const fn new(t: f32, position: Float3, frame: Frame, tilt: f32, in_loop: bool) -> Self {
        Self {
            t,
            position,
            tangent: frame.tangent,
            up: frame.up,
            normal: frame.normal,
            tilt,
            in_loop,
        }
    }

    pub fn frame(&self) -> Frame {
        Frame::new(self.tangent, self.up, self.normal)
    }

    pub const DEFAULT: Self = Self::new(0.0, Float3::ZERO, Frame::DEFAULT, 0.0, false);
}

impl Default for FrameSample {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Loop metadata governing parameter `t`, if any.
///
/// Looks at the two control points bracketing `t`. When both belong to a loop the
/// angle is interpolated between them; when only one does, its own angle is used.
pub fn loop_meta_at(points: &[TrackPoint], t: f32, closed: bool) -> Option<LoopMeta> {
    let n = points.len();
    if n < 2 {
        return None;
    }

    let segments = if closed { n } else { n - 1 };
    let scaled = t.max(0.0) * segments as f32;
    let index = scaled.floor() as usize;
    let frac = scaled - index as f32;

    let (i0, i1) = if closed {
        (index % n, (index + 1) % n)
    } else {
        ((index).min(n - 1), (index + 1).min(n - 1))
    };

    match (points[i0].loop_meta(), points[i1].loop_meta()) {
        (Some(a), Some(b)) => Some(LoopMeta {
            basis: a.basis,
            theta: a.theta + frac * (b.theta - a.theta),
        }),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Samples `steps + 1` frames along `curve` at uniform parameter spacing.
///
/// Loop regions take the exact analytic frame from their metadata; everything else is
/// parallel-transported from the previous sample, so the fold is strictly sequential.
/// After a loop the transport resumes from the loop's last analytic frame.
pub fn build_samples(
    points: &[TrackPoint],
    curve: &CatmullRom,
    tilt: &TiltProfile,
    steps: usize,
) -> Vec<FrameSample> {
    let steps = steps.max(1);
    let closed = curve.is_closed();
    let mut samples = Vec::with_capacity(steps + 1);

    let first = curve.tangent_at(0.0);
    let mut prev = Frame::seed(if first == Float3::ZERO { Float3::RIGHT } else { first });

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let position = curve.point_at(t);

        let (frame, in_loop) = match loop_meta_at(points, t, closed) {
            Some(meta) => (Frame::on_loop(&meta.basis, meta.theta), true),
            None if i == 0 => (prev, false),
            None => {
                let tangent = curve.tangent_at(t);
                let tangent = if tangent == Float3::ZERO {
                    prev.tangent
                } else {
                    tangent
                };
                (prev.transported(tangent), false)
            }
        };

        prev = frame;
        samples.push(FrameSample::new(t, position, frame, tilt.at(t), in_loop));
    }

    samples
}

/// Interpolates a sample at progress `t` from a table sorted by `t`.
/// Uses binary search to find the bracketing samples, then linearly interpolates.
///
/// Frame vectors are lerped and renormalised; `in_loop` follows the nearer sample.
pub fn interpolate_at_progress(samples: &[FrameSample], t: f32) -> Option<FrameSample> {
    let first = samples.first()?;
    let last = samples.last()?;

    if t <= first.t {
        return Some(FrameSample { t, ..*first });
    }
    if t >= last.t {
        return Some(FrameSample { t, ..*last });
    }

    let hi = samples.partition_point(|s| s.t <= t);
    let a = &samples[hi - 1];
    let b = &samples[hi];

    let span = b.t - a.t;
    let w = if span > 0.0 { (t - a.t) / span } else { 0.0 };

    Some(FrameSample {
        t,
        position: a.position.lerp(b.position, w),
        tangent: a.tangent.lerp(b.tangent, w).normalize(),
        up: a.up.lerp(b.up, w).normalize(),
        normal: a.normal.lerp(b.normal, w).normalize(),
        tilt: a.tilt + (b.tilt - a.tilt) * w,
        in_loop: if w < 0.5 { a.in_loop } else { b.in_loop },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LoopBasis;
    use crate::track::PointId;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    const TOLERANCE: f32 = 1e-5;

    fn ordinary(id: u64, x: f32, y: f32, z: f32) -> TrackPoint {
        TrackPoint::ordinary(PointId(id), Float3::new(x, y, z), 0.0)
    }

    fn looped(id: u64, theta: f32) -> TrackPoint {
        let basis = LoopBasis::from_forward(Float3::RIGHT);
        TrackPoint::on_loop(PointId(id), Float3::ZERO, basis, theta)
    }

    fn make_sample(t: f32, x: f32) -> FrameSample {
        FrameSample::new(t, Float3::new(x, 0.0, 0.0), Frame::DEFAULT, 0.0, false)
    }

    #[test]
    fn loop_meta_absent_on_ordinary_track() {
        let points = [ordinary(1, 0.0, 0.0, 0.0), ordinary(2, 1.0, 0.0, 0.0)];
        assert!(loop_meta_at(&points, 0.5, false).is_none());
    }

    #[test]
    fn loop_meta_interpolates_theta_between_loop_points() {
        let points = [ordinary(1, 0.0, 0.0, 0.0), looped(2, 1.0), looped(3, 2.0)];
        // Second segment spans t in [0.5, 1].
        let meta = loop_meta_at(&points, 0.75, false).unwrap();
        assert_relative_eq!(meta.theta, 1.5, epsilon = TOLERANCE);
    }

    #[test]
    fn loop_meta_takes_single_side() {
        let points = [ordinary(1, 0.0, 0.0, 0.0), looped(2, 0.3), ordinary(3, 2.0, 0.0, 0.0)];
        let entry = loop_meta_at(&points, 0.25, false).unwrap();
        assert_relative_eq!(entry.theta, 0.3, epsilon = TOLERANCE);
        let exit = loop_meta_at(&points, 0.75, false).unwrap();
        assert_relative_eq!(exit.theta, 0.3, epsilon = TOLERANCE);
    }

    #[test]
    fn loop_meta_wraps_on_closed_track() {
        let points = [looped(1, 2.0 * PI), ordinary(2, 5.0, 0.0, 0.0), ordinary(3, 5.0, 0.0, 5.0)];
        // Last closed segment runs from point 3 back to point 1.
        assert!(loop_meta_at(&points, 0.9, true).is_some());
        assert!(loop_meta_at(&points, 0.9, false).is_none());
    }

    #[test]
    fn build_samples_count_and_range() {
        let points = [ordinary(1, 0.0, 0.0, 0.0), ordinary(2, 10.0, 0.0, 0.0)];
        let curve = CatmullRom::new(points.iter().map(TrackPoint::position).collect(), false)
            .unwrap();
        let tilt = TiltProfile::from_points(&points, false);
        let samples = build_samples(&points, &curve, &tilt, 100);

        assert_eq!(samples.len(), 101);
        assert_relative_eq!(samples[0].t, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(samples[100].t, 1.0, epsilon = TOLERANCE);
        assert!(samples.iter().all(|s| !s.in_loop));
    }

    #[test]
    fn build_samples_use_analytic_frame_in_loop() {
        let points = [ordinary(1, 0.0, 0.0, 0.0), looped(2, 1.0), looped(3, 2.0)];
        let curve = CatmullRom::new(
            vec![Float3::ZERO, Float3::new(5.0, 3.0, 0.0), Float3::new(3.0, 9.0, 0.0)],
            false,
        )
        .unwrap();
        let tilt = TiltProfile::from_points(&points, false);
        let samples = build_samples(&points, &curve, &tilt, 40);

        let right = Float3::RIGHT.cross(Float3::UP);
        for sample in samples.iter().filter(|s| s.in_loop) {
            assert_relative_eq!(sample.normal.x, right.x, epsilon = TOLERANCE);
            assert_relative_eq!(sample.normal.z, right.z, epsilon = TOLERANCE);
            assert_relative_eq!(sample.tangent.dot(sample.up), 0.0, epsilon = TOLERANCE);
        }
        let at_end = samples.last().unwrap();
        assert_relative_eq!(at_end.tangent.x, 2.0f32.cos(), epsilon = TOLERANCE);
        assert_relative_eq!(at_end.tangent.y, 2.0f32.sin(), epsilon = TOLERANCE);
    }

    #[test]
    fn interpolate_at_progress_boundaries() {
        let samples = [make_sample(0.0, 0.0), make_sample(0.5, 10.0), make_sample(1.0, 20.0)];

        let below = interpolate_at_progress(&samples, -0.5).unwrap();
        assert_relative_eq!(below.t, -0.5, epsilon = TOLERANCE);
        assert_relative_eq!(below.position.x, 0.0, epsilon = TOLERANCE);

        let mid = interpolate_at_progress(&samples, 0.25).unwrap();
        assert_relative_eq!(mid.position.x, 5.0, epsilon = TOLERANCE);

        let above = interpolate_at_progress(&samples, 2.0).unwrap();
        assert_relative_eq!(above.position.x, 20.0, epsilon = TOLERANCE);
    }

    #[test]
    fn interpolate_at_progress_empty_is_none() {
        assert!(interpolate_at_progress(&[], 0.5).is_none());
    }

    #[test]
    fn interpolate_normalizes_frame_vectors() {
        let mut a = make_sample(0.0, 0.0);
        let mut b = make_sample(1.0, 10.0);
        a.tangent = Float3::new(0.0, 0.0, -1.0);
        b.tangent = Float3::new(-1.0, 0.0, 0.0);

        let s = interpolate_at_progress(&[a, b], 0.5).unwrap();
        assert_relative_eq!(s.tangent.magnitude(), 1.0, epsilon = TOLERANCE);
    }
}
