use super::curve::CatmullRom;
use super::spline::FrameSample;
use super::tilt::TiltProfile;

/// Output of a track build: the curve, its frame table and the tilt interpolant.
///
/// Tracks with fewer than 2 points build to an empty result.
#[derive(Debug, Clone, Default)]
pub struct TrackBuild {
    pub curve: Option<CatmullRom>,
    pub samples: Vec<FrameSample>,
    pub tilt: TiltProfile,
}

impl TrackBuild {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.curve.is_none() || self.samples.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.curve.as_ref().is_some_and(CatmullRom::is_closed)
    }

    /// Arc length of the sampled centre line.
    pub fn length(&self) -> f32 {
        self.samples
            .windows(2)
            .map(|pair| pair[0].position.distance(pair[1].position))
            .sum()
    }
}
