use tracing::debug;

use super::curve::CatmullRom;
use super::params::TrackParams;
use super::point::TrackPoint;
use super::result::TrackBuild;
use super::spline::build_samples;
use super::tilt::TiltProfile;

/// Rebuilds the curve, tilt interpolant and frame table from scratch.
///
/// Pure function of its inputs; callers invoke it after every edit.
pub fn build_track(points: &[TrackPoint], closed: bool, params: &TrackParams) -> TrackBuild {
    let Some(curve) = CatmullRom::new(points.iter().map(TrackPoint::position).collect(), closed)
    else {
        return TrackBuild::empty();
    };

    let tilt = TiltProfile::from_points(points, closed);
    let steps = params.sample_steps(points.len());
    let samples = build_samples(points, &curve, &tilt, steps);

    debug!(
        points = points.len(),
        closed,
        samples = samples.len(),
        loop_samples = samples.iter().filter(|s| s.in_loop).count(),
        "rebuilt track"
    );

    TrackBuild {
        curve: Some(curve),
        samples,
        tilt,
    }
}
