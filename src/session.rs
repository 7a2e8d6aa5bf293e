//! Editing session: the point store, mode, selection, ride playback and display toggles.
//!
//! The session owns the last [`TrackBuild`] and rebuilds it synchronously after every edit
//! it performs. Hosts that bypass the session and mutate state some other way call
//! [`CoasterSession::rebuild`] themselves.

use tracing::{debug, info, warn};

use crate::error::TrackError;
use crate::ride::{advance_progress, ride_transform, RideTransform};
use crate::sim::Float3;
use crate::structure::{derive_structure, TrackStructure};
use crate::track::{
    build_track, LoopInsertion, LoopParams, PointId, TrackBuild, TrackParams, TrackPoint,
    TrackStore,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CoasterMode {
    #[default]
    Build,
    Ride,
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Initial ride speed multiplier.
    pub ride_speed: f32,
    /// Height given to points placed from a ground-plane hit.
    pub placement_height: f32,
    pub min_placement_height: f32,
    pub max_placement_height: f32,
    pub loop_params: LoopParams,
    pub track_params: TrackParams,
}

impl SessionConfig {
    pub fn clamp_height(&self, height: f32) -> f32 {
        height.clamp(self.min_placement_height, self.max_placement_height)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ride_speed: 1.0,
            placement_height: 3.0,
            min_placement_height: 0.5,
            max_placement_height: 50.0,
            loop_params: LoopParams::default(),
            track_params: TrackParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoasterSession {
    pub mode: CoasterMode,
    pub selected: Option<PointId>,
    pub ride_progress: f32,
    pub is_riding: bool,
    pub ride_speed: f32,
    pub is_dragging_point: bool,
    pub is_adding_points: bool,
    pub has_chain_lift: bool,
    pub show_wood_supports: bool,
    pub is_night_mode: bool,
    pub camera_target: Float3,
    is_looped: bool,
    store: TrackStore,
    config: SessionConfig,
    build: TrackBuild,
}

impl Default for CoasterSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl CoasterSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            mode: CoasterMode::Build,
            selected: None,
            ride_progress: 0.0,
            is_riding: false,
            ride_speed: config.ride_speed,
            is_dragging_point: false,
            is_adding_points: true,
            has_chain_lift: true,
            show_wood_supports: false,
            is_night_mode: false,
            camera_target: Float3::ZERO,
            is_looped: false,
            store: TrackStore::new(),
            config,
            build: TrackBuild::empty(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn points(&self) -> &[TrackPoint] {
        self.store.points()
    }

    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub fn is_looped(&self) -> bool {
        self.is_looped
    }

    /// Switches between open and closed topology and rebuilds.
    pub fn set_looped(&mut self, looped: bool) {
        if self.is_looped != looped {
            self.is_looped = looped;
            self.rebuild();
        }
    }

    /// Last built curve and frame table.
    pub fn track(&self) -> &TrackBuild {
        &self.build
    }

    /// Re-runs the curve and frame pipeline over the current points.
    pub fn rebuild(&mut self) {
        self.build = build_track(
            self.store.points(),
            self.is_looped,
            &self.config.track_params,
        );
    }

    /// Structure for the current build, honouring the display toggles.
    pub fn structure(&self) -> TrackStructure {
        let mut structure = derive_structure(&self.build.samples, &self.config.track_params);
        if !self.show_wood_supports {
            structure.supports.clear();
        }
        if !self.is_night_mode {
            structure.lights.clear();
        }
        structure
    }

    pub fn add_point(&mut self, position: Float3) -> PointId {
        let id = self.store.add(position);
        self.rebuild();
        id
    }

    /// Places a point from a ground-plane hit at `(x, z)`.
    ///
    /// Only accepted in build mode while adding points. `height` is clamped to the
    /// configured placement range. An accepted placement drops the selection.
    pub fn place_point(&mut self, x: f32, z: f32, height: f32) -> Option<PointId> {
        if self.mode != CoasterMode::Build || !self.is_adding_points {
            warn!(mode = ?self.mode, adding = self.is_adding_points, "point placement ignored");
            return None;
        }
        self.selected = None;
        let y = self.config.clamp_height(height);
        Some(self.add_point(Float3::new(x, y, z)))
    }

    /// Places a point at the configured default height.
    pub fn place_point_default(&mut self, x: f32, z: f32) -> Option<PointId> {
        self.place_point(x, z, self.config.placement_height)
    }

    pub fn update_point(&mut self, id: PointId, position: Float3) -> bool {
        let touched = self.store.update(id, position);
        if touched {
            self.rebuild();
        }
        touched
    }

    pub fn update_tilt(&mut self, id: PointId, tilt: f32) -> bool {
        let touched = self.store.update_tilt(id, tilt);
        if touched {
            self.rebuild();
        }
        touched
    }

    /// Deletes a point, dropping the selection if it pointed there.
    pub fn remove_point(&mut self, id: PointId) -> bool {
        let touched = self.store.remove(id);
        if touched {
            if self.selected == Some(id) {
                self.selected = None;
            }
            self.rebuild();
        }
        touched
    }

    pub fn select(&mut self, id: Option<PointId>) {
        self.selected = id;
    }

    /// Splices a loop in after `id` using the configured loop parameters.
    pub fn create_loop_at(&mut self, id: PointId) -> Result<LoopInsertion, TrackError> {
        let params = self.config.loop_params;
        let insertion = self.store.insert_loop(id, &params).inspect_err(|err| {
            warn!(%err, "loop insertion rejected");
        })?;
        self.rebuild();
        Ok(insertion)
    }

    /// Empties the track and resets selection and ride state.
    ///
    /// A ride in progress is stopped, returning the session to build mode.
    pub fn clear_track(&mut self) {
        self.store.clear();
        self.selected = None;
        if self.mode == CoasterMode::Ride || self.is_riding {
            self.stop_ride();
        }
        self.ride_progress = 0.0;
        self.is_riding = false;
        self.rebuild();
    }

    pub fn start_ride(&mut self) -> Result<(), TrackError> {
        let found = self.store.len();
        if found < 2 {
            warn!(found, "ride start rejected");
            return Err(TrackError::NotEnoughPoints { found });
        }
        self.mode = CoasterMode::Ride;
        self.is_riding = true;
        self.ride_progress = 0.0;
        info!(points = found, length = self.build.length(), "ride started");
        Ok(())
    }

    pub fn stop_ride(&mut self) {
        self.mode = CoasterMode::Build;
        self.is_riding = false;
        self.ride_progress = 0.0;
        info!("ride stopped");
    }

    /// Advances the ride by `dt` seconds and returns the new placement.
    ///
    /// Reaching the end of an open track stops the ride; the returned placement is
    /// the one at the end.
    pub fn tick(&mut self, dt: f32) -> Option<RideTransform> {
        if !self.is_riding {
            return None;
        }

        let step = advance_progress(
            self.ride_progress,
            dt,
            self.ride_speed,
            self.build.length(),
            self.build.is_closed(),
        );
        self.ride_progress = step.progress;

        let transform = ride_transform(&self.build, step.progress);
        if let Some(ride) = &transform {
            self.camera_target = ride.target;
        }
        debug!(progress = step.progress, "ride tick");

        if step.finished {
            self.stop_ride();
        }
        transform
    }
}
