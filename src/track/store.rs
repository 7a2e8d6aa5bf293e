use tracing::debug;

use super::loops::{synthesize_loop, LoopInsertion, LoopParams};
use super::point::{PointId, PointIdGenerator, TrackPoint};
use crate::error::TrackError;
use crate::sim::Float3;

/// Ordered control points of the track plus the id source that named them.
///
/// Order defines the curve parametrisation. Every edit keeps the relative order of
/// untouched points.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    points: Vec<TrackPoint>,
    ids: PointIdGenerator,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: PointId) -> Option<&TrackPoint> {
        self.points.iter().find(|p| p.id() == id)
    }

    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id() == id)
    }

    /// Appends an untilted point and returns its fresh id.
    pub fn add(&mut self, position: Float3) -> PointId {
        let id = self.ids.next_id();
        self.points.push(TrackPoint::ordinary(id, position, 0.0));
        id
    }

    /// Moves a point, keeping its tilt and id. Returns false if `id` is unknown.
    pub fn update(&mut self, id: PointId, position: Float3) -> bool {
        match self.points.iter_mut().find(|p| p.id() == id) {
            Some(point) => {
                point.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Sets a point's bank angle in degrees. Returns false if `id` is unknown.
    pub fn update_tilt(&mut self, id: PointId, tilt: f32) -> bool {
        match self.points.iter_mut().find(|p| p.id() == id) {
            Some(point) => {
                point.set_tilt(tilt);
                true
            }
            None => false,
        }
    }

    /// Deletes a point. Returns false if `id` is unknown.
    pub fn remove(&mut self, id: PointId) -> bool {
        let before = self.points.len();
        self.points.retain(|p| p.id() != id);
        self.points.len() != before
    }

    /// Empties the track. Issued ids stay consumed.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Splices a vertical loop in after the point `id`.
    pub fn insert_loop(
        &mut self,
        id: PointId,
        params: &LoopParams,
    ) -> Result<LoopInsertion, TrackError> {
        let entry_index = self.index_of(id).ok_or(TrackError::PointNotFound(id))?;
        let (points, insertion) = synthesize_loop(&self.points, entry_index, params, &mut self.ids)
            .ok_or(TrackError::PointNotFound(id))?;
        self.points = points;
        debug!(points = self.points.len(), "track points after loop splice");
        Ok(insertion)
    }
}
