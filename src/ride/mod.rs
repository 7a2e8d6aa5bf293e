//! Maps ride progress onto a placement along the built track.

use crate::sim::{wrap_progress, Float3, Frame, Quaternion};
use crate::track::{interpolate_at_progress, TrackBuild};

/// Distance covered per second at a ride speed of 1.
pub const CRUISE_SPEED: f32 = 10.0;

/// Distance ahead of the car that the camera looks at.
const LOOK_AHEAD: f32 = 1.0;

/// Car/camera placement at one ride progress value.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RideTransform {
    /// Progress actually evaluated (wrapped or clamped).
    pub t: f32,
    pub position: Float3,
    /// Untilted frame interpolated from the sample table.
    pub frame: Frame,
    /// Bank angle in degrees.
    pub tilt: f32,
    /// `frame` rolled by `tilt`.
    pub banked: Frame,
    /// Look-at point one unit ahead along the tangent.
    pub target: Float3,
    /// Orientation of `banked` as a rotation from local axes.
    pub orientation: Quaternion,
}

/// Result of advancing ride progress by one tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RideStep {
    pub progress: f32,
    /// An open track reached its end.
    pub finished: bool,
}

/// Placement on `build` at `progress`. `None` when nothing is built.
pub fn ride_transform(build: &TrackBuild, progress: f32) -> Option<RideTransform> {
    let curve = build.curve.as_ref()?;
    let t = if curve.is_closed() {
        wrap_progress(progress)
    } else {
        progress.clamp(0.0, 1.0)
    };

    let sample = interpolate_at_progress(&build.samples, t)?;
    let position = curve.point_at(t);
    let tilt = build.tilt.at(t);
    let frame = sample.frame();
    let banked = frame.with_tilt(tilt);

    Some(RideTransform {
        t,
        position,
        frame,
        tilt,
        banked,
        target: position + frame.tangent * LOOK_AHEAD,
        orientation: banked.orientation(),
    })
}

/// Advances `progress` by `dt` seconds at `speed` times [`CRUISE_SPEED`].
///
/// Closed tracks wrap modulo 1. Open tracks clamp at 1 and report `finished`.
pub fn advance_progress(
    progress: f32,
    dt: f32,
    speed: f32,
    track_length: f32,
    closed: bool,
) -> RideStep {
    if track_length <= f32::EPSILON {
        return RideStep {
            progress,
            finished: !closed,
        };
    }

    let next = progress + speed * CRUISE_SPEED * dt / track_length;
    if closed {
        RideStep {
            progress: wrap_progress(next),
            finished: false,
        }
    } else if next >= 1.0 {
        RideStep {
            progress: 1.0,
            finished: true,
        }
    } else {
        RideStep {
            progress: next.max(0.0),
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{build_track, TrackParams, TrackStore};
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-4;

    fn straight_build(tilts: &[f32]) -> TrackBuild {
        let mut store = TrackStore::new();
        let ids: Vec<_> = (0..tilts.len())
            .map(|i| store.add(Float3::new(i as f32 * 10.0, 2.0, 0.0)))
            .collect();
        for (&id, &tilt) in ids.iter().zip(tilts) {
            store.update_tilt(id, tilt);
        }
        build_track(store.points(), false, &TrackParams::default())
    }

    #[test]
    fn empty_build_has_no_transform() {
        assert!(ride_transform(&TrackBuild::empty(), 0.5).is_none());
    }

    #[test]
    fn transform_follows_the_curve() {
        let build = straight_build(&[0.0, 0.0, 0.0]);
        let ride = ride_transform(&build, 0.5).unwrap();

        assert_relative_eq!(ride.position.x, 10.0, epsilon = TOLERANCE);
        assert_relative_eq!(ride.position.y, 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(ride.target.x, 11.0, epsilon = TOLERANCE);
        assert_relative_eq!(ride.tilt, 0.0, epsilon = TOLERANCE);
        assert_eq!(ride.banked, ride.frame);
    }

    #[test]
    fn orientation_faces_along_tangent() {
        let build = straight_build(&[0.0, 0.0]);
        let ride = ride_transform(&build, 0.3).unwrap();
        let forward = ride.orientation.mul_vec(Float3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(forward.x, ride.frame.tangent.x, epsilon = TOLERANCE);
        assert_relative_eq!(forward.y, ride.frame.tangent.y, epsilon = TOLERANCE);
        assert_relative_eq!(forward.z, ride.frame.tangent.z, epsilon = TOLERANCE);
    }

    #[test]
    fn banked_frame_rolls_about_tangent() {
        let build = straight_build(&[0.0, 90.0]);
        let ride = ride_transform(&build, 0.5).unwrap();

        assert_relative_eq!(ride.tilt, 45.0, epsilon = TOLERANCE);
        assert_relative_eq!(ride.banked.tangent.dot(ride.banked.up), 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(ride.banked.up.y, 45f32.to_radians().cos(), epsilon = TOLERANCE);
        // Positive tilt lifts the normal side.
        assert!(ride.banked.normal.y > 0.0);
    }

    #[test]
    fn open_progress_is_clamped() {
        let build = straight_build(&[0.0, 0.0]);
        let ride = ride_transform(&build, 1.5).unwrap();
        assert_relative_eq!(ride.t, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(ride.position.x, 10.0, epsilon = TOLERANCE);
    }

    #[test]
    fn advance_scales_with_length_and_speed() {
        let step = advance_progress(0.5, 0.1, 1.0, 20.0, false);
        assert_relative_eq!(step.progress, 0.55, epsilon = TOLERANCE);
        assert!(!step.finished);

        let faster = advance_progress(0.5, 0.1, 2.0, 20.0, false);
        assert_relative_eq!(faster.progress, 0.6, epsilon = TOLERANCE);
    }

    #[test]
    fn open_track_finishes_at_end() {
        let step = advance_progress(0.99, 1.0, 1.0, 20.0, false);
        assert_eq!(step.progress, 1.0);
        assert!(step.finished);
    }

    #[test]
    fn closed_track_wraps() {
        let step = advance_progress(0.95, 0.2, 1.0, 20.0, true);
        assert_relative_eq!(step.progress, 0.05, epsilon = TOLERANCE);
        assert!(!step.finished);
    }

    #[test]
    fn zero_length_track_does_not_move() {
        let step = advance_progress(0.0, 1.0, 1.0, 0.0, false);
        assert_eq!(step.progress, 0.0);
        assert!(step.finished);
        assert!(!advance_progress(0.0, 1.0, 1.0, 0.0, true).finished);
    }
}
