//! Boom arm that carries the follow camera, and the orbit-camera adapter that renders it

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::components::ControlRotation;

/// Anything whose length the zoom controller can drive.
pub trait BoomArm {
    fn arm_length(&self) -> f32;

    fn set_arm_length(&mut self, length: f32);
}

/// Camera boom attached to a character.
///
/// The zoom controller overwrites `target_arm_length` every frame once the character spawns.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component, Default)]
pub struct SpringArm {
    pub target_arm_length:         f32,
    /// Boom pivot relative to the character origin
    pub socket_offset:             Vec3,
    /// Rotate the boom with the controller's view rotation
    pub use_pawn_control_rotation: bool,
}

impl Default for SpringArm {
    fn default() -> Self {
        Self {
            target_arm_length:         400.0,
            socket_offset:             Vec3::ZERO,
            use_pawn_control_rotation: true,
        }
    }
}

impl BoomArm for SpringArm {
    fn arm_length(&self) -> f32 { self.target_arm_length }

    fn set_arm_length(&mut self, length: f32) { self.target_arm_length = length; }
}

impl BoomArm for PanOrbitCamera {
    fn arm_length(&self) -> f32 { self.target_radius }

    fn set_arm_length(&mut self, length: f32) {
        self.target_radius = length;
        self.force_update = true;
    }
}

/// Camera that rides the end of a character's spring arm.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct FollowCamera {
    pub character: Entity,
}

/// Extension trait for pointing a `PanOrbitCamera` down a spring arm.
pub trait PanOrbitCameraBoomExt {
    /// Places the camera at the end of `arm`, pivoting on `pivot`.
    /// Orientation is taken from `control` when the arm follows the controller.
    fn follow_spring_arm(&mut self, pivot: Vec3, arm: &SpringArm, control: Option<&ControlRotation>);
}

impl PanOrbitCameraBoomExt for PanOrbitCamera {
    fn follow_spring_arm(&mut self, pivot: Vec3, arm: &SpringArm, control: Option<&ControlRotation>) {
        self.target_focus = pivot + arm.socket_offset;
        self.set_arm_length(arm.arm_length());

        if let Some(control) = control.filter(|_| arm.use_pawn_control_rotation) {
            // Orbit pitch is positive above the focus, looking down
            self.target_yaw = control.yaw;
            self.target_pitch = -control.pitch;
        }

        self.force_update = true;
    }
}

/// System that moves every follow camera to its character's spring arm.
pub fn sync_follow_cameras(
    mut camera_query: Query<(&FollowCamera, &mut PanOrbitCamera)>,
    character_query: Query<(&Transform, &SpringArm, Option<&ControlRotation>)>,
) {
    for (follow, mut pan_orbit) in &mut camera_query {
        let Ok((transform, arm, control)) = character_query.get(follow.character) else {
            continue;
        };

        pan_orbit.follow_spring_arm(transform.translation, arm, control);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_camera_takes_arm_length_as_radius() {
        let mut camera = PanOrbitCamera::default();
        camera.force_update = false;
        camera.set_arm_length(175.0);
        assert_eq!(camera.target_radius, 175.0);
        assert_eq!(camera.arm_length(), 175.0);
        assert!(camera.force_update);
    }

    #[test]
    fn follow_uses_controller_rotation() {
        let mut camera = PanOrbitCamera::default();
        let arm = SpringArm {
            target_arm_length: 250.0,
            socket_offset: Vec3::Y * 60.0,
            ..default()
        };
        let control = ControlRotation {
            yaw:   1.0,
            pitch: -0.3,
            roll:  0.0,
        };

        camera.follow_spring_arm(Vec3::new(10.0, 0.0, 5.0), &arm, Some(&control));

        assert_eq!(camera.target_focus, Vec3::new(10.0, 60.0, 5.0));
        assert_eq!(camera.target_radius, 250.0);
        assert_eq!(camera.target_yaw, 1.0);
        assert_eq!(camera.target_pitch, 0.3);
    }

    #[test]
    fn follow_keeps_orientation_without_control_rotation() {
        let mut camera = PanOrbitCamera::default();
        camera.target_yaw = 0.7;
        camera.target_pitch = 0.2;
        let arm = SpringArm {
            use_pawn_control_rotation: false,
            ..default()
        };

        camera.follow_spring_arm(Vec3::ZERO, &arm, Some(&ControlRotation::from_yaw(2.0)));
        assert_eq!(camera.target_yaw, 0.7);
        assert_eq!(camera.target_pitch, 0.2);

        let arm = SpringArm::default();
        camera.follow_spring_arm(Vec3::ZERO, &arm, None);
        assert_eq!(camera.target_yaw, 0.7);
        assert_eq!(camera.target_radius, 400.0);
    }

    #[test]
    fn orbit_pose_looks_along_control_rotation() {
        // PanOrbitCamera places its eye at focus + rot * (0, 0, radius), rot = Y(yaw) * X(-pitch)
        let control = ControlRotation {
            yaw:   0.8,
            pitch: -0.4,
            roll:  0.0,
        };
        let mut camera = PanOrbitCamera::default();
        camera.follow_spring_arm(Vec3::ZERO, &SpringArm::default(), Some(&control));

        let orbit = Quat::from_axis_angle(Vec3::Y, camera.target_yaw)
            * Quat::from_axis_angle(Vec3::X, -camera.target_pitch);
        let eye_to_focus = -(orbit * Vec3::Z);
        assert!(eye_to_focus.abs_diff_eq(control.view_direction(), 1e-5));
    }
}
