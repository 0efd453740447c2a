//! Demonstrates a third-person character using `bevy_third_person_ext`.
//!
//! - WASD moves relative to where the camera looks, not where the character faces
//! - Moving the mouse turns the camera
//! - Hold the right mouse button to zoom the boom in; the character strafes while zoomed
//! - Space hops
//! - Press 'P' to toggle the obstruction probe lines

use bevy::color::palettes::css::DEEP_SKY_BLUE;
use bevy::color::palettes::css::ORANGE;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use bevy_third_person_ext::EyeHeight;
use bevy_third_person_ext::InputSourcePlugin;
use bevy_third_person_ext::ObstructionProbeGizmo;
use bevy_third_person_ext::ObstructionProbeVisualizationPlugin;
use bevy_third_person_ext::prelude::*;

const CAPSULE_RADIUS: f32 = 42.0;
const CAPSULE_HALF_HEIGHT: f32 = 96.0;
const GROUND_SIZE: f32 = 6000.0;
const GRAVITY: f32 = 980.0;
const MOUSE_UNITS_PER_PIXEL: f32 = 0.1;

/// Keyboard and mouse state in the shape the plugin polls
#[derive(Resource, Default)]
struct KeyboardMouseInput {
    forward:    f32,
    right:      f32,
    look_up:    f32,
    look_right: f32,
    jump:       bool,
    zoom:       bool,
}

impl InputSource for KeyboardMouseInput {
    fn axis_value(&self, axis: InputAxis) -> f32 {
        match axis {
            InputAxis::Forward => self.forward,
            InputAxis::Right => self.right,
            InputAxis::LookUpMouse => self.look_up,
            InputAxis::LookRightMouse => self.look_right,
            InputAxis::LookUpGamepad | InputAxis::LookRightGamepad => 0.0,
        }
    }

    fn is_pressed(&self, action: InputAction) -> bool {
        match action {
            InputAction::Jump => self.jump,
            InputAction::Zoom => self.zoom,
        }
    }
}

/// Vertical speed of the demo's hop
#[derive(Component, Default)]
struct VerticalVelocity(f32);

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            PanOrbitCameraPlugin,
            ThirdPersonPlugin,
            InputSourcePlugin::<KeyboardMouseInput>::default(),
            ObstructionProbeVisualizationPlugin,
        ))
        .init_resource::<KeyboardMouseInput>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            sample_keyboard_mouse.before(ThirdPersonSystems::Input),
        )
        .add_systems(
            Update,
            integrate_movement
                .after(ThirdPersonSystems::Zoom)
                .before(ThirdPersonSystems::Camera),
        )
        .add_systems(Update, toggle_probe_lines)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
    ));

    for (i, x) in [-900.0, -300.0, 300.0, 900.0].into_iter().enumerate() {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(150.0, 150.0 + 100.0 * i as f32, 150.0))),
            MeshMaterial3d(materials.add(Color::from(ORANGE))),
            Transform::from_xyz(x, 75.0 + 50.0 * i as f32, -800.0),
        ));
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(400.0, 1000.0, 400.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let character = commands
        .spawn((
            PlayerCharacter,
            ControlRotation::default(),
            VerticalVelocity::default(),
            SpringArm {
                socket_offset: Vec3::Y * CAPSULE_HALF_HEIGHT,
                ..default()
            },
            Mesh3d(meshes.add(Capsule3d::new(
                CAPSULE_RADIUS,
                2.0 * (CAPSULE_HALF_HEIGHT - CAPSULE_RADIUS),
            ))),
            MeshMaterial3d(materials.add(Color::from(DEEP_SKY_BLUE))),
            Transform::from_xyz(0.0, CAPSULE_HALF_HEIGHT, 0.0),
            EyeHeight(64.0),
        ))
        .id();

    commands.spawn((
        Camera3d::default(),
        PanOrbitCamera {
            zoom_smoothness: 0.0,
            pan_smoothness: 0.0,
            orbit_smoothness: 0.0,
            ..default()
        },
        FollowCamera { character },
    ));
}

fn sample_keyboard_mouse(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    mut input: ResMut<KeyboardMouseInput>,
) {
    let axis = |positive: KeyCode, negative: KeyCode| {
        f32::from(u8::from(keys.pressed(positive))) - f32::from(u8::from(keys.pressed(negative)))
    };

    input.forward = axis(KeyCode::KeyW, KeyCode::KeyS);
    input.right = axis(KeyCode::KeyD, KeyCode::KeyA);
    input.look_right = motion.delta.x * MOUSE_UNITS_PER_PIXEL;
    input.look_up = -motion.delta.y * MOUSE_UNITS_PER_PIXEL;
    input.jump = keys.pressed(KeyCode::Space);
    input.zoom = buttons.pressed(MouseButton::Right);
}

/// Stand-in for a real movement simulation: walks, turns and hops.
fn integrate_movement(
    time: Res<Time>,
    mut query: Query<(
        &mut Transform,
        &mut CharacterMovement,
        &mut VerticalVelocity,
        &ControlRotation,
    )>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut movement, mut vertical, control) in &mut query {
        let input = movement.consume_input_vector().clamp_length_max(1.0);
        transform.translation += input * movement.max_walk_speed * dt;

        let desired_yaw = if movement.orient_rotation_to_movement {
            (input.length_squared() > 0.0).then(|| (-input.x).atan2(-input.z))
        } else {
            Some(control.yaw)
        };
        if let Some(yaw) = desired_yaw {
            let target = Quat::from_rotation_y(yaw);
            let max_step = movement.rotation_rate.y.to_radians() * dt;
            let angle = transform.rotation.angle_between(target);
            if angle > f32::EPSILON {
                transform.rotation = transform.rotation.slerp(target, (max_step / angle).min(1.0));
            }
        }

        let grounded = transform.translation.y <= CAPSULE_HALF_HEIGHT;
        if grounded && movement.jump_pressed {
            vertical.0 = movement.jump_z_velocity;
        }
        vertical.0 -= GRAVITY * dt;
        transform.translation.y = (transform.translation.y + vertical.0 * dt).max(CAPSULE_HALF_HEIGHT);
        if transform.translation.y <= CAPSULE_HALF_HEIGHT {
            vertical.0 = 0.0;
        }
    }
}

fn toggle_probe_lines(keys: Res<ButtonInput<KeyCode>>, mut config_store: ResMut<GizmoConfigStore>) {
    if keys.just_pressed(KeyCode::KeyP) {
        let (config, _) = config_store.config_mut::<ObstructionProbeGizmo>();
        config.enabled = !config.enabled;
    }
}
