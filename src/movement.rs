//! Control-relative movement input
//!
//! Maps forward/right axis samples onto world-space directions taken from the controller's
//! view yaw, never from the character's own facing. Movement simulation itself is left to
//! whatever consumes `CharacterMovement`.

use bevy::prelude::*;

use crate::components::ControlRotation;

/// Receiver for movement intents. Implemented by the host's movement simulation.
pub trait MovementSink {
    /// Queues movement along `direction` scaled by `scale` for the next simulation step.
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);

    /// Whether the character turns to face its movement direction.
    fn set_orient_rotation_to_movement(&mut self, orient: bool);
}

/// Movement state shared with the host's movement simulation.
///
/// Intents accumulate in `pending_input` until the host drains them with
/// [`CharacterMovement::consume_input_vector`]. The tuning fields are read by the host only.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component, Default)]
pub struct CharacterMovement {
    pub pending_input:                Vec3,
    pub orient_rotation_to_movement:  bool,
    pub jump_pressed:                 bool,
    /// Degrees per second
    pub rotation_rate:                Vec3,
    pub jump_z_velocity:              f32,
    pub air_control:                  f32,
    pub max_walk_speed:               f32,
    pub min_analog_walk_speed:        f32,
    pub braking_deceleration_walking: f32,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self {
            pending_input:                Vec3::ZERO,
            orient_rotation_to_movement:  true,
            jump_pressed:                 false,
            rotation_rate:                Vec3::new(0.0, 400.0, 0.0),
            jump_z_velocity:              300.0,
            air_control:                  0.2,
            max_walk_speed:               500.0,
            min_analog_walk_speed:        20.0,
            braking_deceleration_walking: 2000.0,
        }
    }
}

impl CharacterMovement {
    /// Returns the accumulated input and clears it.
    pub fn consume_input_vector(&mut self) -> Vec3 { std::mem::take(&mut self.pending_input) }

    pub const fn jump(&mut self) { self.jump_pressed = true; }

    pub const fn stop_jumping(&mut self) { self.jump_pressed = false; }
}

impl MovementSink for CharacterMovement {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    fn set_orient_rotation_to_movement(&mut self, orient: bool) {
        self.orient_rotation_to_movement = orient;
    }
}

/// Which basis vector an axis sample moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementAxis {
    Forward,
    Right,
}

/// World-space forward and right vectors for a view yaw.
pub fn movement_basis(yaw: f32) -> (Vec3, Vec3) {
    let rotation = Quat::from_rotation_y(yaw);
    (rotation * Vec3::NEG_Z, rotation * Vec3::X)
}

/// Submits a movement intent for one axis sample.
///
/// Nothing is submitted without a controller or for a zero sample.
pub fn apply_movement_axis(
    axis: MovementAxis,
    control: Option<&ControlRotation>,
    value: f32,
    sink: &mut impl MovementSink,
) {
    let Some(control) = control else {
        return;
    };
    if value == 0.0 {
        return;
    }

    let (forward, right) = movement_basis(control.yaw);
    let direction = match axis {
        MovementAxis::Forward => forward,
        MovementAxis::Right => right,
    };
    sink.add_movement_input(direction, value);
}

pub fn apply_forward(control: Option<&ControlRotation>, value: f32, sink: &mut impl MovementSink) {
    apply_movement_axis(MovementAxis::Forward, control, value, sink);
}

pub fn apply_right(control: Option<&ControlRotation>, value: f32, sink: &mut impl MovementSink) {
    apply_movement_axis(MovementAxis::Right, control, value, sink);
}
