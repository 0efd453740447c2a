//! Convenient re-exports for common types and traits

pub use crate::ThirdPersonPlugin;
pub use crate::ThirdPersonSystems;
pub use crate::boom::BoomArm;
pub use crate::boom::FollowCamera;
pub use crate::boom::PanOrbitCameraBoomExt;
pub use crate::boom::SpringArm;
pub use crate::components::ControlRotation;
pub use crate::components::LookConfig;
pub use crate::components::PlayerCharacter;
pub use crate::controls::CharacterControls;
pub use crate::controls::CharacterControlsPlugin;
pub use crate::controls::ControlContext;
pub use crate::events::ActionInput;
pub use crate::events::AxisInput;
pub use crate::events::ZoomBegin;
pub use crate::events::ZoomEnd;
pub use crate::input::InputAction;
pub use crate::input::InputAxis;
pub use crate::input::InputSource;
pub use crate::input::InputSourcePlugin;
pub use crate::movement::CharacterMovement;
pub use crate::movement::MovementSink;
pub use crate::zoom::CameraZoom;
pub use crate::zoom::CameraZoomConfig;
pub use crate::zoom::ZoomState;
