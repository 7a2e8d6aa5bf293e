//! Vertical loop synthesis.
//!
//! A loop is a ring of control points on a vertical circle standing on the entry
//! point. The ascending half is a pure circle; the descending half eases sideways so
//! the exit clears the entry track. Every generated point carries the loop basis and
//! its angle so the frame builder can rebuild an exact frame instead of transporting
//! one around the circle.

use std::f32::consts::TAU;

use tracing::debug;

use super::point::{PointId, PointIdGenerator, TrackPoint};
use crate::sim::{Float3, LoopBasis};

/// Entry segments shorter than this (horizontally) fall back to +X.
const MIN_FORWARD_LENGTH: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopParams {
    /// Circle radius in world units.
    pub radius: f32,
    /// Number of generated points, the last one closing the circle.
    pub point_count: usize,
    /// Sideways displacement reached at the loop exit.
    pub separation: f32,
}

impl LoopParams {
    pub fn new(radius: f32, point_count: usize, separation: f32) -> Self {
        Self {
            radius,
            point_count,
            separation,
        }
    }

    pub fn with_radius(radius: f32) -> Self {
        Self::new(radius, 20, radius + 2.0)
    }
}

impl Default for LoopParams {
    fn default() -> Self {
        Self::with_radius(8.0)
    }
}

/// Ids of the points added by a loop splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopInsertion {
    pub entry: PointId,
    pub entry_index: usize,
    pub loop_points: Vec<PointId>,
    pub transition: Option<PointId>,
}

impl LoopInsertion {
    pub fn added(&self) -> usize {
        self.loop_points.len() + usize::from(self.transition.is_some())
    }
}

/// Horizontal direction of travel into `points[entry_index]`.
pub fn loop_forward(points: &[TrackPoint], entry_index: usize) -> Float3 {
    if entry_index == 0 || entry_index >= points.len() {
        return Float3::RIGHT;
    }
    let entry = points[entry_index].position();
    let prev = points[entry_index - 1].position();
    let forward = (entry - prev).horizontal();
    if forward.magnitude() < MIN_FORWARD_LENGTH {
        return Float3::RIGHT;
    }
    forward.normalize()
}

/// Smoothstep sideways offset for normalised loop progress in `[0, 1]`.
///
/// Zero up to the top of the loop, easing to `separation` at the exit.
pub fn lateral_offset(progress: f32, separation: f32) -> f32 {
    let s = ((progress - 0.5) / 0.5).clamp(0.0, 1.0);
    s * s * (3.0 - 2.0 * s) * separation
}

/// Generates the loop ring for an entry at `entry` heading along `forward`.
pub fn generate_loop(
    entry: Float3,
    forward: Float3,
    params: &LoopParams,
    ids: &mut PointIdGenerator,
) -> Vec<TrackPoint> {
    let basis = LoopBasis::from_forward(forward);
    let n = params.point_count.max(1);

    (1..=n)
        .map(|i| {
            let progress = i as f32 / n as f32;
            let theta = progress * TAU;
            let position = entry
                + basis.circle_offset(theta, params.radius)
                + basis.right * lateral_offset(progress, params.separation);
            TrackPoint::on_loop(ids.next_id(), position, basis, theta)
        })
        .collect()
}

/// Splices a loop into `points` right after `points[entry_index]`.
///
/// The entry point and everything around the insertion keep their ids and
/// positions. When a point follows the entry, a transition point halfway between
/// the loop exit and that point smooths the rejoin. Returns `None` if
/// `entry_index` is out of range.
pub fn synthesize_loop(
    points: &[TrackPoint],
    entry_index: usize,
    params: &LoopParams,
    ids: &mut PointIdGenerator,
) -> Option<(Vec<TrackPoint>, LoopInsertion)> {
    let entry = points.get(entry_index)?;
    let forward = loop_forward(points, entry_index);
    let ring = generate_loop(entry.position(), forward, params, ids);

    let transition = match (ring.last(), points.get(entry_index + 1)) {
        (Some(exit), Some(next)) => Some(TrackPoint::ordinary(
            ids.next_id(),
            exit.position().lerp(next.position(), 0.5),
            0.0,
        )),
        _ => None,
    };

    let insertion = LoopInsertion {
        entry: entry.id(),
        entry_index,
        loop_points: ring.iter().map(TrackPoint::id).collect(),
        transition: transition.as_ref().map(TrackPoint::id),
    };

    let mut result = Vec::with_capacity(points.len() + insertion.added());
    result.extend_from_slice(&points[..=entry_index]);
    result.extend(ring);
    result.extend(transition);
    result.extend_from_slice(&points[entry_index + 1..]);

    debug!(
        entry = %insertion.entry,
        forward = ?forward,
        added = insertion.added(),
        "synthesized loop"
    );

    Some((result, insertion))
}
