//! Fixed numerical thresholds shared by the framing and structure code.

use super::math::Float3;

pub const WORLD_UP: Float3 = Float3::UP;

/// Secondary seed axis when the initial tangent is (nearly) vertical.
pub const FALLBACK_UP: Float3 = Float3::RIGHT;

/// `|T0·T1|` this close to 1 means the transport rotation is undefined.
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// Minimum residual length after re-orthogonalising a transported up vector.
pub const RESIDUAL_EPSILON: f32 = 1e-3;

/// Minimum length of world-up projected off the first tangent.
pub const SEED_EPSILON: f32 = 1e-2;

pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Wraps a ride progress value into `[0, 1)`.
pub fn wrap_progress(progress: f32) -> f32 {
    let wrapped = progress.rem_euclid(1.0);
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
