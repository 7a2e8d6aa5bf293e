use super::point::TrackPoint;

/// Piecewise-linear bank angle (degrees) over the curve parameter.
///
/// Uses the same segment split as the curve: segment `i` of an open track spans
/// `[i / (n - 1), (i + 1) / (n - 1)]`; a closed track has `n` segments wrapping back
/// to the first point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TiltProfile {
    tilts: Vec<f32>,
    closed: bool,
}

impl TiltProfile {
    pub fn new(tilts: Vec<f32>, closed: bool) -> Self {
        Self { tilts, closed }
    }

    pub fn from_points(points: &[TrackPoint], closed: bool) -> Self {
        Self::new(points.iter().map(TrackPoint::tilt).collect(), closed)
    }

    /// Tilt at parameter `t`. Zero for fewer than 2 points.
    pub fn at(&self, t: f32) -> f32 {
        let n = self.tilts.len();
        if n < 2 {
            return 0.0;
        }

        if self.closed {
            let scaled = t.rem_euclid(1.0) * n as f32;
            let index = scaled.floor() as usize;
            let frac = scaled - index as f32;
            let a = self.tilts[index % n];
            let b = self.tilts[(index + 1) % n];
            return a + (b - a) * frac;
        }

        let scaled = t.max(0.0) * (n - 1) as f32;
        let index = scaled.floor() as usize;
        if index >= n - 1 {
            return self.tilts[n - 1];
        }
        let frac = scaled - index as f32;
        let a = self.tilts[index];
        let b = self.tilts[index + 1];
        a + (b - a) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-6;

    #[test]
    fn fewer_than_two_points_is_flat() {
        assert_eq!(TiltProfile::new(vec![], false).at(0.5), 0.0);
        assert_eq!(TiltProfile::new(vec![30.0], false).at(0.5), 0.0);
    }

    #[test]
    fn open_midpoint_of_first_segment() {
        let profile = TiltProfile::new(vec![0.0, 90.0, 0.0], false);
        assert_relative_eq!(profile.at(0.25), 45.0, epsilon = TOLERANCE);
        assert_relative_eq!(profile.at(0.5), 90.0, epsilon = TOLERANCE);
        assert_relative_eq!(profile.at(0.75), 45.0, epsilon = TOLERANCE);
    }

    #[test]
    fn open_past_end_clamps_to_last_tilt() {
        let profile = TiltProfile::new(vec![0.0, 90.0, -20.0], false);
        assert_relative_eq!(profile.at(1.0), -20.0, epsilon = TOLERANCE);
        assert_relative_eq!(profile.at(1.7), -20.0, epsilon = TOLERANCE);
        assert_relative_eq!(profile.at(-0.3), 0.0, epsilon = TOLERANCE);
    }

    #[test]
    fn closed_last_segment_wraps_to_first() {
        let profile = TiltProfile::new(vec![0.0, 40.0, 80.0, 40.0], true);
        // Segment 3 runs from the last point (40) back to the first (0).
        assert_relative_eq!(profile.at(0.875), 20.0, epsilon = 1e-5);
        assert_relative_eq!(profile.at(1.0), 0.0, epsilon = TOLERANCE);
    }
}
