/// Sampling density and structure spacing for a track build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackParams {
    /// Frame samples per control point.
    pub samples_per_point: usize,
    /// Lower bound on the number of sample steps.
    pub min_samples: usize,
    /// Half gauge: distance from the centre line to each rail.
    pub rail_offset: f32,
    /// Every n-th sample carries a tie.
    pub tie_interval: usize,
    /// Every n-th sample is a support candidate.
    pub support_interval: usize,
    /// Every n-th sample carries a light marker pair.
    pub light_interval: usize,
    /// Sideways distance of light markers from the centre line.
    pub light_offset: f32,
}

impl TrackParams {
    pub fn new(
        samples_per_point: usize,
        min_samples: usize,
        rail_offset: f32,
        tie_interval: usize,
        support_interval: usize,
        light_interval: usize,
        light_offset: f32,
    ) -> Self {
        Self {
            samples_per_point,
            min_samples,
            rail_offset,
            tie_interval,
            support_interval,
            light_interval,
            light_offset,
        }
    }

    /// Number of uniform parameter steps for a track of `point_count` points.
    ///
    /// The sample table holds one more entry than this (both ends included).
    pub fn sample_steps(&self, point_count: usize) -> usize {
        (self.samples_per_point * point_count).max(self.min_samples).max(1)
    }
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            samples_per_point: 20,
            min_samples: 100,
            rail_offset: 0.3,
            tie_interval: 2,
            support_interval: 3,
            light_interval: 6,
            light_offset: 0.5,
        }
    }
}
