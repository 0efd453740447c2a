//! Input and zoom lifecycle events.

use bevy::prelude::*;

use crate::input::ActionPhase;
use crate::input::InputAction;
use crate::input::InputAxis;
use crate::zoom::ZoomState;

// ============================================================================
// Input
// ============================================================================

/// One axis sample for a character. Hosts send one per bound axis every frame.
#[derive(EntityEvent, Reflect, Debug, Clone, Copy)]
#[reflect(Event, FromReflect)]
pub struct AxisInput {
    #[event_target]
    pub character: Entity,
    pub axis:      InputAxis,
    pub value:     f32,
}

impl AxisInput {
    pub const fn new(character: Entity, axis: InputAxis, value: f32) -> Self {
        Self {
            character,
            axis,
            value,
        }
    }
}

/// A press or release of a bound action.
#[derive(EntityEvent, Reflect, Debug, Clone, Copy)]
#[reflect(Event, FromReflect)]
pub struct ActionInput {
    #[event_target]
    pub character: Entity,
    pub action:    InputAction,
    pub phase:     ActionPhase,
}

impl ActionInput {
    pub const fn pressed(character: Entity, action: InputAction) -> Self {
        Self {
            character,
            action,
            phase: ActionPhase::Pressed,
        }
    }

    pub const fn released(character: Entity, action: InputAction) -> Self {
        Self {
            character,
            action,
            phase: ActionPhase::Released,
        }
    }
}

// ============================================================================
// Zoom lifecycle
// ============================================================================

/// Fired when a zoom request starts or restarts a transition.
#[derive(EntityEvent, Reflect, Debug, Clone, Copy)]
#[reflect(Event, FromReflect)]
pub struct ZoomBegin {
    #[event_target]
    pub character: Entity,
    /// `ZoomIn` or `ZoomOut`
    pub state:     ZoomState,
}

/// Fired when a transition settles.
#[derive(EntityEvent, Reflect, Debug, Clone, Copy)]
#[reflect(Event, FromReflect)]
pub struct ZoomEnd {
    #[event_target]
    pub character: Entity,
    /// `ZoomedIn` or `ZoomedOut`
    pub state:     ZoomState,
}
