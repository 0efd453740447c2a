// bevy_third_person_ext
// Third-person character support for Bevy:
// - Control-relative movement input
// - Timed boom-arm zoom with an orientation lock while zoomed
// - Follow camera driven through bevy_panorbit_camera

use bevy::prelude::*;

mod boom;
mod components;
mod controls;
mod events;
mod input;
mod movement;
pub mod prelude;
mod probe;
#[cfg(feature = "visualization")]
mod visualization;
mod zoom;

// Public API - Events
pub use events::ActionInput;
pub use events::AxisInput;
pub use events::ZoomBegin;
pub use events::ZoomEnd;

// Public API - Traits
pub use boom::BoomArm;
pub use boom::PanOrbitCameraBoomExt;
pub use controls::CharacterControls;
pub use input::InputSource;
pub use movement::MovementSink;

// Public API - Components
pub use boom::FollowCamera;
pub use boom::SpringArm;
pub use components::ControlRotation;
pub use components::EyeHeight;
pub use components::PlayerCharacter;
pub use components::PlayerInput;
pub use movement::CharacterMovement;
pub use probe::ObstructionTrace;
pub use zoom::CameraZoom;

// Public API - Configuration components
pub use components::LookConfig;
pub use zoom::CameraZoomConfig;

// Public API - Input and zoom types
pub use components::PITCH_LIMIT;
pub use controls::ControlContext;
pub use input::ActionPhase;
pub use input::InputAction;
pub use input::InputAxis;
pub use movement::MovementAxis;
pub use zoom::ZoomState;

// Public API - Utility functions
pub use movement::apply_forward;
pub use movement::apply_movement_axis;
pub use movement::apply_right;
pub use movement::movement_basis;
pub use probe::eye_viewpoint;
pub use probe::probe_segment;

// Public API - Plugins
pub use controls::CharacterControlsPlugin;
pub use input::InputSourcePlugin;
#[cfg(feature = "visualization")]
pub use visualization::ObstructionProbeGizmo;
#[cfg(feature = "visualization")]
pub use visualization::ObstructionProbeVisualizationConfig;
#[cfg(feature = "visualization")]
pub use visualization::ObstructionProbeVisualizationPlugin;

// Internal - used by plugin, not for external use
use boom::sync_follow_cameras;
use probe::trace_camera_obstruction;
use zoom::advance_camera_zoom;
use zoom::on_camera_zoom_added;

/// Per-frame ordering of the plugin's work, all in `Update`
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThirdPersonSystems {
    /// Input polling; hooks run in the observers it triggers
    Input,
    /// Zoom transitions and boom length publishing
    Zoom,
    /// Obstruction probe and follow camera sync
    Camera,
}

/// Plugin that adds the character locomotion and camera zoom functionality
pub struct ThirdPersonPlugin;

impl Plugin for ThirdPersonPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                ThirdPersonSystems::Input,
                ThirdPersonSystems::Zoom,
                ThirdPersonSystems::Camera,
            )
                .chain(),
        )
        // Hooks for the built-in character
        .add_plugins(CharacterControlsPlugin::<PlayerCharacter>::default())
        // Spawn-time initialization
        .add_observer(on_camera_zoom_added)
        .add_systems(
            Update,
            advance_camera_zoom.in_set(ThirdPersonSystems::Zoom),
        )
        .add_systems(
            Update,
            (trace_camera_obstruction, sync_follow_cameras).in_set(ThirdPersonSystems::Camera),
        );
    }
}
