//! Single-call FFI for coasterkit.
//!
//! Functions:
//! - `coaster_build` - takes control points, produces the frame table and rails
//! - `coaster_ride_transform` - takes control points and a progress, produces a placement
//!
//! # Error Codes
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-2`: Not enough points for a ride
//! - `-3`: Buffer overflow (resize and retry)
//! - `-4`: Point not found

use crate::ride::{ride_transform, RideTransform};
use crate::sim::Float3;
use crate::structure::rail_paths;
use crate::track::{build_track, FrameSample, LoopParams, TrackBuild, TrackParams, TrackStore};

/// Control point as seen by the host.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoasterPoint {
    pub position: Float3,
    /// Bank angle in degrees.
    pub tilt: f32,
    /// Non-zero to splice a loop in after this point.
    pub loop_after: u8,
}

/// Output buffers for track data.
#[repr(C)]
pub struct CoasterOutput {
    pub samples: *mut FrameSample,
    pub left_rail: *mut Float3,
    pub right_rail: *mut Float3,
    /// Capacity of each of the three buffers above.
    pub capacity: usize,

    // Written by coaster_build
    pub sample_count: *mut usize,
    pub track_length: *mut f32,
}

/// Build the frame table and rail polylines for a set of control points.
///
/// Fewer than 2 points is not an error: the counts come back as zero.
///
/// # Safety
///
/// - `points` must be valid for `point_count` reads, or `point_count` must be zero
/// - `output` must be a valid pointer to a `CoasterOutput` whose buffers hold at least
///   `capacity` elements each
#[no_mangle]
pub unsafe extern "C" fn coaster_build(
    points: *const CoasterPoint,
    point_count: usize,
    closed: i32,
    output: *mut CoasterOutput,
) -> i32 {
    if output.is_null() || (point_count > 0 && points.is_null()) {
        return -1;
    }
    let output = &mut *output;
    if output.sample_count.is_null() || output.track_length.is_null() {
        return -1;
    }

    let build = match build_from(to_slice(points, point_count), closed != 0) {
        Ok(build) => build,
        Err(code) => return code,
    };

    let count = build.samples.len();
    if count > output.capacity {
        *output.sample_count = count;
        return -3;
    }
    if count > 0
        && (output.samples.is_null() || output.left_rail.is_null() || output.right_rail.is_null())
    {
        return -1;
    }

    let rails = rail_paths(&build.samples, TrackParams::default().rail_offset);
    for (i, sample) in build.samples.iter().enumerate() {
        *output.samples.add(i) = *sample;
        *output.left_rail.add(i) = rails.left[i];
        *output.right_rail.add(i) = rails.right[i];
    }

    *output.sample_count = count;
    *output.track_length = build.length();
    0
}

/// Evaluate the ride placement at `progress` for a set of control points.
///
/// # Safety
///
/// - `points` must be valid for `point_count` reads, or `point_count` must be zero
/// - `out` must be a valid pointer to a `RideTransform`
#[no_mangle]
pub unsafe extern "C" fn coaster_ride_transform(
    points: *const CoasterPoint,
    point_count: usize,
    closed: i32,
    progress: f32,
    out: *mut RideTransform,
) -> i32 {
    if out.is_null() || (point_count > 0 && points.is_null()) {
        return -1;
    }
    if point_count < 2 {
        return -2;
    }

    let build = match build_from(to_slice(points, point_count), closed != 0) {
        Ok(build) => build,
        Err(code) => return code,
    };

    match ride_transform(&build, progress) {
        Some(transform) => {
            *out = transform;
            0
        }
        None => -2,
    }
}

// --- Helpers ---

fn build_from(points: &[CoasterPoint], closed: bool) -> Result<TrackBuild, i32> {
    let mut store = TrackStore::new();
    let ids: Vec<_> = points
        .iter()
        .map(|p| {
            let id = store.add(p.position);
            store.update_tilt(id, p.tilt);
            id
        })
        .collect();

    let loops = LoopParams::default();
    for (point, &id) in points.iter().zip(&ids) {
        if point.loop_after != 0 {
            store.insert_loop(id, &loops).map_err(|err| err.code())?;
        }
    }

    Ok(build_track(store.points(), closed, &TrackParams::default()))
}

unsafe fn to_slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if len == 0 || ptr.is_null() {
        &[]
    } else {
        std::slice::from_raw_parts(ptr, len)
    }
}
