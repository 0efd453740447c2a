//! Forward obstruction probe from the character's eyes.
//!
//! The probe segment is recorded every frame but nothing reacts to it: the boom length is never
//! shortened to keep the camera out of geometry.

use bevy::prelude::*;

use crate::components::ControlRotation;
use crate::components::EyeHeight;
use crate::zoom::CameraZoomConfig;

/// Segment swept by the latest obstruction probe
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct ObstructionTrace {
    pub start: Vec3,
    pub end:   Vec3,
}

impl ObstructionTrace {
    pub fn length(&self) -> f32 { self.start.distance(self.end) }
}

/// Position and rotation the character sees from.
///
/// With a controller attached the view rotation is the controller's, otherwise the body's.
pub fn eye_viewpoint(
    transform: &Transform,
    eye_height: f32,
    control: Option<&ControlRotation>,
) -> (Vec3, Quat) {
    let position = transform.translation + Vec3::Y * eye_height;
    let rotation = control.map_or(transform.rotation, ControlRotation::to_quat);
    (position, rotation)
}

/// Probe segment of `distance` along the view direction.
pub fn probe_segment(position: Vec3, rotation: Quat, distance: f32) -> ObstructionTrace {
    ObstructionTrace {
        start: position,
        end:   position + rotation * Vec3::NEG_Z * distance,
    }
}

/// System that refreshes every character's probe segment.
pub fn trace_camera_obstruction(
    mut query: Query<(
        &Transform,
        &EyeHeight,
        &CameraZoomConfig,
        Option<&ControlRotation>,
        &mut ObstructionTrace,
    )>,
) {
    for (transform, eye_height, config, control, mut trace) in &mut query {
        let (position, rotation) = eye_viewpoint(transform, eye_height.0, control);
        *trace = probe_segment(position, rotation, config.trace_distance);
    }
}
