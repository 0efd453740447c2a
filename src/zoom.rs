//! Timed boom-arm zoom for the follow camera

use bevy::prelude::*;

use crate::boom::BoomArm;
use crate::boom::SpringArm;
use crate::events::ZoomEnd;
use crate::movement::CharacterMovement;
use crate::movement::MovementSink;

/// Zoom state of a character's camera boom.
///
/// `ZoomIn` and `ZoomOut` are timed transitions that settle into `ZoomedIn` and `ZoomedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ZoomState {
    ZoomedIn,
    #[default]
    ZoomedOut,
    ZoomIn,
    ZoomOut,
}

impl ZoomState {
    pub const fn is_transitioning(self) -> bool { matches!(self, Self::ZoomIn | Self::ZoomOut) }

    /// The stable state this state ends in.
    pub const fn settled(self) -> Self {
        match self {
            Self::ZoomIn | Self::ZoomedIn => Self::ZoomedIn,
            Self::ZoomOut | Self::ZoomedOut => Self::ZoomedOut,
        }
    }
}

/// Boom distances and timing for the zoom transition
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct CameraZoomConfig {
    /// Boom length at rest
    pub base_distance:  f32,
    /// Boom length when zoomed
    pub zoom_distance:  f32,
    /// Seconds for a full transition
    pub zoom_duration:  f32,
    /// Length of the forward obstruction probe
    pub trace_distance: f32,
}

impl Default for CameraZoomConfig {
    fn default() -> Self {
        Self {
            base_distance:  300.0,
            zoom_distance:  175.0,
            zoom_duration:  0.25,
            trace_distance: 200.0,
        }
    }
}

/// Relative slack below `zoom_duration` at which a transition counts as finished. Frame deltas
/// summed in `f32` land a few ulps short of the duration.
const SETTLE_TOLERANCE: f32 = 1e-4;

impl CameraZoomConfig {
    /// Whether `elapsed` seconds complete a transition.
    pub fn is_complete(&self, elapsed: f32) -> bool {
        self.progress(elapsed) >= 1.0 || elapsed >= self.zoom_duration * (1.0 - SETTLE_TOLERANCE)
    }

    /// Normalized transition progress in `[0, 1]`. A non-positive duration is already done.
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.zoom_duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.zoom_duration).clamp(0.0, 1.0)
    }

    /// Boom length for a state after `elapsed` seconds in it.
    pub fn distance_at(&self, state: ZoomState, elapsed: f32) -> f32 {
        match state {
            ZoomState::ZoomedOut => self.base_distance,
            ZoomState::ZoomedIn => self.zoom_distance,
            ZoomState::ZoomIn => (self.zoom_distance - self.base_distance)
                .mul_add(self.progress(elapsed), self.base_distance),
            ZoomState::ZoomOut => (self.base_distance - self.zoom_distance)
                .mul_add(self.progress(elapsed), self.zoom_distance),
        }
    }
}

/// Runtime zoom state of one character.
///
/// `current_distance` is what [`CameraZoom::advance`] last computed from the state, the timer and
/// the config. It is exactly `base_distance` or `zoom_distance` once a transition settles.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
#[require(CameraZoomConfig, SpringArm)]
pub struct CameraZoom {
    state:            ZoomState,
    elapsed:          f32,
    current_distance: f32,
    requests:         u32,
}

impl Default for CameraZoom {
    fn default() -> Self { Self::new(&CameraZoomConfig::default()) }
}

impl CameraZoom {
    pub const fn new(config: &CameraZoomConfig) -> Self {
        Self {
            state:            ZoomState::ZoomedOut,
            elapsed:          0.0,
            current_distance: config.base_distance,
            requests:         0,
        }
    }

    pub const fn state(&self) -> ZoomState { self.state }

    pub const fn elapsed(&self) -> f32 { self.elapsed }

    pub const fn current_distance(&self) -> f32 { self.current_distance }

    /// Number of zoom requests so far, wrapping. Changes on every request, restarts included.
    pub const fn requests(&self) -> u32 { self.requests }

    /// Starts zooming in from the beginning, whatever the current state.
    ///
    /// The timer restarts even mid-transition, so the next step measures from `base_distance`
    /// again rather than from wherever the boom currently is.
    pub fn request_zoom_in(&mut self, movement: &mut impl MovementSink) {
        self.elapsed = 0.0;
        self.state = ZoomState::ZoomIn;
        self.requests = self.requests.wrapping_add(1);
        movement.set_orient_rotation_to_movement(false);
    }

    /// Starts zooming out from the beginning, whatever the current state.
    pub fn request_zoom_out(&mut self, movement: &mut impl MovementSink) {
        self.elapsed = 0.0;
        self.state = ZoomState::ZoomOut;
        self.requests = self.requests.wrapping_add(1);
        movement.set_orient_rotation_to_movement(true);
    }

    /// Advances the transition by `dt` seconds and recomputes `current_distance`.
    ///
    /// Returns the settled state when a transition finished during this step.
    pub fn advance(&mut self, dt: f32, config: &CameraZoomConfig) -> Option<ZoomState> {
        if !self.state.is_transitioning() {
            self.current_distance = config.distance_at(self.state, 0.0);
            return None;
        }

        self.elapsed += dt.max(0.0);
        self.current_distance = config.distance_at(self.state, self.elapsed);

        if !config.is_complete(self.elapsed) {
            return None;
        }

        self.state = self.state.settled();
        self.elapsed = 0.0;
        self.current_distance = config.distance_at(self.state, 0.0);
        Some(self.state)
    }
}

/// Advances every character's zoom and publishes the boom length.
///
/// The length is written every frame, settled or not.
pub fn advance_camera_zoom(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &CameraZoomConfig, &mut CameraZoom, &mut SpringArm)>,
) {
    let dt = time.delta_secs();

    for (entity, config, mut zoom, mut arm) in &mut query {
        let mut next = *zoom;
        let settled = next.advance(dt, config);
        zoom.set_if_neq(next);

        if let Some(settled) = settled {
            debug!(
                "CameraZoom: {entity:?} settled in {settled:?} at distance {:.1}",
                zoom.current_distance()
            );
            commands.trigger(ZoomEnd {
                character: entity,
                state:     settled,
            });
        }

        arm.set_arm_length(zoom.current_distance());
    }
}

/// Observer that puts a freshly spawned character's zoom at rest and publishes the base length.
pub fn on_camera_zoom_added(
    add: On<Add, CameraZoom>,
    mut query: Query<(
        &CameraZoomConfig,
        &mut CameraZoom,
        &mut SpringArm,
        Option<&mut CharacterMovement>,
    )>,
) {
    let entity = add.entity;

    let Ok((config, mut zoom, mut arm, movement)) = query.get_mut(entity) else {
        return;
    };

    if config.zoom_duration <= 0.0 {
        warn!(
            "CameraZoomConfig on {entity:?}: zoom_duration {} is not positive, transitions will snap",
            config.zoom_duration
        );
    }
    if config.trace_distance < 0.0 {
        warn!(
            "CameraZoomConfig on {entity:?}: negative trace_distance {} probes backwards",
            config.trace_distance
        );
    }

    *zoom = CameraZoom::new(config);
    arm.set_arm_length(zoom.current_distance());

    if let Some(mut movement) = movement {
        movement.set_orient_rotation_to_movement(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-3;

    fn zoom_and_movement() -> (CameraZoomConfig, CameraZoom, CharacterMovement) {
        let config = CameraZoomConfig::default();
        (config, CameraZoom::new(&config), CharacterMovement::default())
    }

    #[test]
    fn starts_zoomed_out_at_base_distance() {
        let (config, zoom, _) = zoom_and_movement();
        assert_eq!(zoom.state(), ZoomState::ZoomedOut);
        assert_eq!(zoom.elapsed(), 0.0);
        assert_eq!(zoom.current_distance(), config.base_distance);
    }

    #[test]
    fn zoom_in_scenario_with_tenth_second_steps() {
        let (config, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_in(&mut movement);

        assert_eq!(zoom.advance(0.1, &config), None);
        assert!((zoom.current_distance() - 250.0).abs() < TOLERANCE);
        assert_eq!(zoom.state(), ZoomState::ZoomIn);

        assert_eq!(zoom.advance(0.1, &config), None);
        assert!((zoom.current_distance() - 200.0).abs() < TOLERANCE);

        assert_eq!(zoom.advance(0.1, &config), Some(ZoomState::ZoomedIn));
        assert_eq!(zoom.state(), ZoomState::ZoomedIn);
        assert_eq!(zoom.current_distance(), 175.0);
        assert_eq!(zoom.elapsed(), 0.0);
    }

    #[test]
    fn lands_exactly_on_zoom_distance_at_duration() {
        let (config, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_in(&mut movement);

        zoom.advance(0.125, &config);
        assert_eq!(zoom.state(), ZoomState::ZoomIn);
        assert_eq!(zoom.advance(0.125, &config), Some(ZoomState::ZoomedIn));
        assert_eq!(zoom.current_distance(), config.zoom_distance);
    }

    #[test]
    fn settled_state_holds_until_next_request() {
        let (config, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_in(&mut movement);
        zoom.advance(1.0, &config);

        for _ in 0..10 {
            assert_eq!(zoom.advance(0.1, &config), None);
            assert_eq!(zoom.state(), ZoomState::ZoomedIn);
            assert_eq!(zoom.current_distance(), config.zoom_distance);
            assert_eq!(zoom.elapsed(), 0.0);
        }
    }

    #[test]
    fn interpolation_matches_linear_formula() {
        let config = CameraZoomConfig::default();
        for step in 0..=20 {
            let t = step as f32 / 20.0;
            let elapsed = t * config.zoom_duration;

            let zoom_in = config.distance_at(ZoomState::ZoomIn, elapsed);
            let expected_in = config.base_distance + t * (config.zoom_distance - config.base_distance);
            assert!((zoom_in - expected_in).abs() < TOLERANCE, "zoom in at t={t}");

            let zoom_out = config.distance_at(ZoomState::ZoomOut, elapsed);
            let expected_out = config.zoom_distance + t * (config.base_distance - config.zoom_distance);
            assert!((zoom_out - expected_out).abs() < TOLERANCE, "zoom out at t={t}");
        }
    }

    #[test]
    fn distance_stays_between_endpoints_while_transitioning() {
        let (config, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_out(&mut movement);
        for dt in [0.01, 0.07, 0.003, 0.09, 0.05, 0.2] {
            zoom.advance(dt, &config);
            let distance = zoom.current_distance();
            assert!(distance >= config.zoom_distance && distance <= config.base_distance);
        }
        assert_eq!(zoom.state(), ZoomState::ZoomedOut);
    }

    #[test]
    fn zero_steps_change_nothing() {
        let (config, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_in(&mut movement);
        zoom.advance(0.1, &config);
        let before = zoom;

        for _ in 0..5 {
            assert_eq!(zoom.advance(0.0, &config), None);
            assert_eq!(zoom, before);
        }
    }

    #[test]
    fn large_step_saturates_on_first_advance() {
        let (config, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_out(&mut movement);
        assert_eq!(zoom.advance(30.0, &config), Some(ZoomState::ZoomedOut));
        assert_eq!(zoom.current_distance(), config.base_distance);
    }

    #[test]
    fn negative_step_is_ignored() {
        let (config, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_in(&mut movement);
        zoom.advance(0.1, &config);
        zoom.advance(-5.0, &config);
        assert!((zoom.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn repeated_zoom_in_restarts_from_base_distance() {
        let (config, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_in(&mut movement);
        zoom.advance(0.2, &config);
        assert!((zoom.current_distance() - 200.0).abs() < TOLERANCE);

        zoom.request_zoom_in(&mut movement);
        assert_eq!(zoom.elapsed(), 0.0);
        assert_eq!(zoom.state(), ZoomState::ZoomIn);

        zoom.advance(0.0, &config);
        assert_eq!(zoom.current_distance(), config.base_distance);

        zoom.advance(0.1, &config);
        assert!((zoom.current_distance() - 250.0).abs() < TOLERANCE);
    }

    #[test]
    fn zoom_out_mid_zoom_in_jumps_to_zoom_distance() {
        let (config, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_in(&mut movement);
        zoom.advance(0.1, &config);

        zoom.request_zoom_out(&mut movement);
        zoom.advance(0.0, &config);
        assert_eq!(zoom.current_distance(), config.zoom_distance);
        assert_eq!(zoom.state(), ZoomState::ZoomOut);
    }

    #[test]
    fn requests_toggle_orientation_lock() {
        let (_, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_in(&mut movement);
        assert!(!movement.orient_rotation_to_movement);
        zoom.request_zoom_out(&mut movement);
        assert!(movement.orient_rotation_to_movement);
    }

    #[test]
    fn non_positive_duration_snaps() {
        let config = CameraZoomConfig {
            zoom_duration: 0.0,
            ..default()
        };
        let mut zoom = CameraZoom::new(&config);
        let mut movement = CharacterMovement::default();
        zoom.request_zoom_in(&mut movement);
        assert_eq!(zoom.advance(0.0, &config), Some(ZoomState::ZoomedIn));
        assert_eq!(zoom.current_distance(), config.zoom_distance);
    }

    #[test]
    fn equal_steps_summing_to_duration_settle() {
        let (config, _, mut movement) = zoom_and_movement();

        for steps in 1..=200_u16 {
            let dt = config.zoom_duration / f32::from(steps);
            let mut zoom = CameraZoom::new(&config);
            zoom.request_zoom_in(&mut movement);

            for _ in 1..steps {
                assert_eq!(zoom.advance(dt, &config), None, "settled early with {steps} steps");
            }
            assert_eq!(
                zoom.advance(dt, &config),
                Some(ZoomState::ZoomedIn),
                "{steps} steps of {dt} left elapsed at {}",
                zoom.elapsed()
            );
            assert_eq!(zoom.current_distance(), config.zoom_distance);
        }
    }

    #[test]
    fn every_request_is_counted() {
        let (_, mut zoom, mut movement) = zoom_and_movement();
        zoom.request_zoom_in(&mut movement);
        zoom.request_zoom_in(&mut movement);
        zoom.request_zoom_out(&mut movement);
        assert_eq!(zoom.requests(), 3);
        assert_eq!(zoom.elapsed(), 0.0);
    }

    #[test]
    fn settled_maps_transitions_to_their_targets() {
        assert_eq!(ZoomState::ZoomIn.settled(), ZoomState::ZoomedIn);
        assert_eq!(ZoomState::ZoomOut.settled(), ZoomState::ZoomedOut);
        assert_eq!(ZoomState::ZoomedIn.settled(), ZoomState::ZoomedIn);
        assert!(!ZoomState::ZoomedOut.is_transitioning());
    }
}
