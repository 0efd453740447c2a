//! Components describing a controllable third-person character.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::movement::CharacterMovement;
use crate::probe::ObstructionTrace;
use crate::zoom::CameraZoom;

/// Pitch stays just short of straight up/down so the yaw basis never degenerates.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.0175;

/// Default concrete character.
///
/// Spawning it pulls in everything the locomotion and zoom systems need. A controller is
/// attached separately by inserting `ControlRotation`; until then movement input is ignored.
#[derive(Component, Reflect, Debug, Default, Clone, Copy)]
#[reflect(Component, Default)]
#[require(
    CameraZoom,
    CharacterMovement,
    PlayerInput,
    EyeHeight,
    LookConfig,
    ObstructionTrace,
    Transform
)]
pub struct PlayerCharacter;

/// Marks a character whose input is polled from the installed `InputSource`.
#[derive(Component, Reflect, Debug, Default, Clone, Copy)]
#[reflect(Component, Default)]
pub struct PlayerInput;

/// View rotation of the controller possessing a character, in radians.
///
/// Yaw turns about +Y with yaw 0 looking down -Z. Positive pitch looks up.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct ControlRotation {
    pub yaw:   f32,
    pub pitch: f32,
    pub roll:  f32,
}

impl ControlRotation {
    pub const fn from_yaw(yaw: f32) -> Self {
        Self {
            yaw,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    /// Full view rotation.
    pub fn to_quat(&self) -> Quat { Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll) }

    /// Rotation with pitch and roll dropped.
    pub fn yaw_rotation(&self) -> Quat { Quat::from_rotation_y(self.yaw) }

    /// Direction the controller is looking.
    pub fn view_direction(&self) -> Vec3 { self.to_quat() * Vec3::NEG_Z }

    pub fn add_yaw_input(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(std::f32::consts::TAU);
    }

    pub fn add_pitch_input(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

/// Height of the character's eyes above its origin.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component, Default)]
pub struct EyeHeight(pub f32);

impl Default for EyeHeight {
    fn default() -> Self { Self(64.0) }
}

/// Look sensitivity settings.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component, Default)]
pub struct LookConfig {
    /// Radians of yaw per unit of mouse axis
    pub mouse_yaw_scale:   f32,
    /// Radians of pitch per unit of mouse axis
    pub mouse_pitch_scale: f32,
    /// Degrees per second at full stick deflection. Only custom gamepad hooks read this.
    pub gamepad_turn_rate: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            mouse_yaw_scale:   2.5_f32.to_radians(),
            mouse_pitch_scale: 2.5_f32.to_radians(),
            gamepad_turn_rate: 50.0,
        }
    }
}
