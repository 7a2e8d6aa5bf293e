//! Rail, tie, support and light geometry derived from a frame table.
//!
//! Everything here is a pure function of the samples; nothing mutates track state.

mod lights;
mod rails;
mod supports;

pub use lights::{light_markers, LightMarker, LIGHT_LIFT, LIGHT_PALETTE};
pub use rails::{rail_offsets, rail_paths, ties, RailPaths, Tie, TIE_DROP};
pub use supports::{
    horizontal_normal, supports, Brace, Leg, Support, CROSS_BRACE_HEIGHT, DIAGONAL_BRACE_HEIGHT,
    LEG_INSET, MIN_SUPPORT_HEIGHT,
};

use crate::track::{FrameSample, TrackParams};

/// All derived structure for one track build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackStructure {
    pub rails: RailPaths,
    pub ties: Vec<Tie>,
    pub supports: Vec<Support>,
    pub lights: Vec<LightMarker>,
}

pub fn derive_structure(samples: &[FrameSample], params: &TrackParams) -> TrackStructure {
    TrackStructure {
        rails: rail_paths(samples, params.rail_offset),
        ties: ties(samples, params.tie_interval),
        supports: supports(samples, params.support_interval, params.rail_offset),
        lights: light_markers(samples, params.light_interval, params.light_offset),
    }
}
