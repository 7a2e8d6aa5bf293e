use crate::sim::{deg_to_rad, Float3};
use crate::track::FrameSample;

/// Ties hang this far below the centre line.
pub const TIE_DROP: f32 = 0.08;

/// Left and right rail polylines, one vertex per frame sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RailPaths {
    pub left: Vec<Float3>,
    pub right: Vec<Float3>,
}

/// Cross-tie placement.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tie {
    /// Index into the sample table.
    pub sample: usize,
    pub position: Float3,
    /// Heading in radians, `atan2(tangent.x, tangent.z)`.
    pub yaw: f32,
    /// Bank in radians.
    pub roll: f32,
}

/// Offsets of the two rails from the centre line for a bank of `tilt` degrees.
///
/// The normal component shrinks with the cosine of the bank while the rails shift
/// vertically in opposite directions by its sine.
pub fn rail_offsets(normal: Float3, tilt: f32, offset: f32) -> (Float3, Float3) {
    let (sin, cos) = deg_to_rad(tilt).sin_cos();
    let side = normal * (offset * cos);
    let lift = Float3::UP * (offset * sin);
    (side + lift, -side - lift)
}

pub fn rail_paths(samples: &[FrameSample], offset: f32) -> RailPaths {
    let (left, right) = samples
        .iter()
        .map(|s| {
            let (l, r) = rail_offsets(s.normal, s.tilt, offset);
            (s.position + l, s.position + r)
        })
        .unzip();
    RailPaths { left, right }
}

pub fn ties(samples: &[FrameSample], interval: usize) -> Vec<Tie> {
    samples
        .iter()
        .enumerate()
        .step_by(interval.max(1))
        .map(|(sample, s)| Tie {
            sample,
            position: s.position - Float3::UP * TIE_DROP,
            yaw: s.frame().yaw(),
            roll: deg_to_rad(s.tilt),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Frame;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const TOLERANCE: f32 = 1e-5;

    fn sample(x: f32, tilt: f32) -> FrameSample {
        FrameSample::new(0.0, Float3::new(x, 5.0, 0.0), Frame::DEFAULT, tilt, false)
    }

    #[test]
    fn flat_rails_sit_beside_centre_line() {
        let rails = rail_paths(&[sample(0.0, 0.0)], 0.3);
        assert_relative_eq!(rails.left[0].z, 0.3, epsilon = TOLERANCE);
        assert_relative_eq!(rails.right[0].z, -0.3, epsilon = TOLERANCE);
        assert_relative_eq!(rails.left[0].y, 5.0, epsilon = TOLERANCE);
        assert_relative_eq!(rails.right[0].y, 5.0, epsilon = TOLERANCE);
    }

    #[test]
    fn banked_rails_shift_vertically() {
        let rails = rail_paths(&[sample(0.0, 30.0)], 0.3);
        assert_relative_eq!(rails.left[0].y, 5.15, epsilon = TOLERANCE);
        assert_relative_eq!(rails.right[0].y, 4.85, epsilon = TOLERANCE);
        assert_relative_eq!(rails.left[0].z, 0.3 * 30f32.to_radians().cos(), epsilon = TOLERANCE);
    }

    #[test]
    fn fully_banked_rails_stack() {
        let (l, r) = rail_offsets(Float3::new(0.0, 0.0, 1.0), 90.0, 0.3);
        assert_relative_eq!(l.z, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(l.y, 0.3, epsilon = TOLERANCE);
        assert_relative_eq!(r.y, -0.3, epsilon = TOLERANCE);
    }

    #[test]
    fn rails_have_one_vertex_per_sample() {
        let samples: Vec<_> = (0..7).map(|i| sample(i as f32, 0.0)).collect();
        let rails = rail_paths(&samples, 0.3);
        assert_eq!(rails.left.len(), 7);
        assert_eq!(rails.right.len(), 7);
    }

    #[test]
    fn ties_every_second_sample() {
        let samples: Vec<_> = (0..7).map(|i| sample(i as f32, 45.0)).collect();
        let placed = ties(&samples, 2);
        let indices: Vec<_> = placed.iter().map(|t| t.sample).collect();
        assert_eq!(indices, vec![0, 2, 4, 6]);

        let tie = placed[1];
        assert_relative_eq!(tie.position.y, 5.0 - TIE_DROP, epsilon = TOLERANCE);
        assert_relative_eq!(tie.yaw, FRAC_PI_2, epsilon = TOLERANCE);
        assert_relative_eq!(tie.roll, 45f32.to_radians(), epsilon = TOLERANCE);
    }
}
