//! Pure math primitives for track framing.
//!
//! This module contains zero-dependency vector, rotation and frame types.

pub mod constants;
mod frame;
mod math;

pub use constants::{deg_to_rad, wrap_progress, WORLD_UP};
pub use frame::{Frame, LoopBasis};
pub use math::{Float3, Quaternion};
