use crate::sim::Float3;
use crate::track::FrameSample;

use super::supports::horizontal_normal;

/// Markers float this far above the centre line.
pub const LIGHT_LIFT: f32 = 0.1;

/// Night-mode marker colours (0xRRGGBB), cycled along the track.
pub const LIGHT_PALETTE: [u32; 5] = [0xFF0000, 0xFFFF00, 0x00FF00, 0x00FFFF, 0xFF00FF];

/// A pair of light markers on either side of the track.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightMarker {
    pub sample: usize,
    pub left: Float3,
    pub right: Float3,
    /// Index into [`LIGHT_PALETTE`].
    pub color_index: usize,
}

impl LightMarker {
    pub fn color(&self) -> u32 {
        LIGHT_PALETTE[self.color_index % LIGHT_PALETTE.len()]
    }
}

pub fn light_markers(samples: &[FrameSample], interval: usize, offset: f32) -> Vec<LightMarker> {
    samples
        .iter()
        .enumerate()
        .step_by(interval.max(1))
        .enumerate()
        .map(|(ordinal, (sample, s))| {
            let side = horizontal_normal(s.tangent) * offset;
            let lifted = s.position + Float3::UP * LIGHT_LIFT;
            LightMarker {
                sample,
                left: lifted + side,
                right: lifted - side,
                color_index: ordinal % LIGHT_PALETTE.len(),
            }
        })
        .collect()
}
