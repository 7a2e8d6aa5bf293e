use std::fmt;

use crate::sim::{Float3, LoopBasis};

/// Identity of a track point. Never reused within a session.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point-{}", self.0)
    }
}

/// Monotonic id source owned by the track store.
#[derive(Debug, Clone, Default)]
pub struct PointIdGenerator {
    last: u64,
}

impl PointIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> PointId {
        self.last += 1;
        PointId(self.last)
    }
}

/// Analytic loop data carried by a loop-generated point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoopMeta {
    pub basis: LoopBasis,
    pub theta: f32,
}

/// A control point of the track, tagged by how it was created.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackPoint {
    /// Placed by the user or inserted as a splice transition.
    Ordinary {
        id: PointId,
        position: Float3,
        tilt: f32,
    },
    /// Generated by loop synthesis; carries the loop's basis and angle.
    Loop {
        id: PointId,
        position: Float3,
        tilt: f32,
        basis: LoopBasis,
        theta: f32,
    },
}

impl TrackPoint {
    pub const fn ordinary(id: PointId, position: Float3, tilt: f32) -> Self {
        Self::Ordinary { id, position, tilt }
    }

    pub const fn on_loop(id: PointId, position: Float3, basis: LoopBasis, theta: f32) -> Self {
        Self::Loop {
            id,
            position,
            tilt: 0.0,
            basis,
            theta,
        }
    }

    pub fn id(&self) -> PointId {
        match self {
            Self::Ordinary { id, .. } | Self::Loop { id, .. } => *id,
        }
    }

    pub fn position(&self) -> Float3 {
        match self {
            Self::Ordinary { position, .. } | Self::Loop { position, .. } => *position,
        }
    }

    /// Bank angle in degrees.
    pub fn tilt(&self) -> f32 {
        match self {
            Self::Ordinary { tilt, .. } | Self::Loop { tilt, .. } => *tilt,
        }
    }

    pub fn loop_meta(&self) -> Option<LoopMeta> {
        match self {
            Self::Ordinary { .. } => None,
            Self::Loop { basis, theta, .. } => Some(LoopMeta {
                basis: *basis,
                theta: *theta,
            }),
        }
    }

    pub fn is_loop(&self) -> bool {
        matches!(self, Self::Loop { .. })
    }

    pub(crate) fn set_position(&mut self, value: Float3) {
        match self {
            Self::Ordinary { position, .. } | Self::Loop { position, .. } => *position = value,
        }
    }

    pub(crate) fn set_tilt(&mut self, value: f32) {
        match self {
            Self::Ordinary { tilt, .. } | Self::Loop { tilt, .. } => *tilt = value,
        }
    }
}
