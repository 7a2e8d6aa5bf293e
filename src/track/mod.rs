//! Track points, loop synthesis, curve construction and frame sampling.
//!
//! This module provides the pipeline from an edited list of control points to a
//! sampled, twist-free frame table.

mod curve;
mod evaluate;
mod loops;
mod params;
mod point;
mod result;
mod spline;
mod store;
mod tilt;

pub use curve::CatmullRom;
pub use evaluate::build_track;
pub use loops::{
    generate_loop, lateral_offset, loop_forward, synthesize_loop, LoopInsertion, LoopParams,
};
pub use params::TrackParams;
pub use point::{LoopMeta, PointId, PointIdGenerator, TrackPoint};
pub use result::TrackBuild;
pub use spline::{build_samples, interpolate_at_progress, loop_meta_at, FrameSample};
pub use store::TrackStore;
pub use tilt::TiltProfile;
