//! Input bindings and the host input source
//!
//! The host's input system sits behind [`InputSource`]. [`InputSourcePlugin`] polls it once per
//! frame and turns the samples into `AxisInput` and `ActionInput` events for every
//! `PlayerInput` character.

use std::marker::PhantomData;

use bevy::prelude::*;

use crate::ThirdPersonSystems;
use crate::components::PlayerInput;
use crate::events::ActionInput;
use crate::events::AxisInput;

/// Bound input axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InputAxis {
    Forward,
    Right,
    LookUpGamepad,
    LookRightGamepad,
    LookUpMouse,
    LookRightMouse,
}

impl InputAxis {
    pub const ALL: [Self; 6] = [
        Self::Forward,
        Self::Right,
        Self::LookUpGamepad,
        Self::LookRightGamepad,
        Self::LookUpMouse,
        Self::LookRightMouse,
    ];

    /// Name of the axis mapping in the host's input settings
    pub const fn binding_name(self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Right => "Right",
            Self::LookUpGamepad => "LookUp_Gamepad",
            Self::LookRightGamepad => "LookRight_Gamepad",
            Self::LookUpMouse => "LookUp_Mouse",
            Self::LookRightMouse => "LookRight_Mouse",
        }
    }
}

/// Bound input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InputAction {
    Jump,
    Zoom,
}

impl InputAction {
    pub const ALL: [Self; 2] = [Self::Jump, Self::Zoom];

    /// Name of the action mapping in the host's input settings
    pub const fn binding_name(self) -> &'static str {
        match self {
            Self::Jump => "Jump",
            Self::Zoom => "Zoom",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Jump => 0,
            Self::Zoom => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ActionPhase {
    Pressed,
    Released,
}

/// Host input state, sampled once per frame.
pub trait InputSource: Resource {
    /// Current value of an axis, conventionally in `[-1, 1]` for sticks and keys.
    fn axis_value(&self, axis: InputAxis) -> f32;

    /// Whether an action's button is held this frame.
    fn is_pressed(&self, action: InputAction) -> bool;
}

/// Polls `S` every frame and dispatches input events to `PlayerInput` characters.
pub struct InputSourcePlugin<S: InputSource>(PhantomData<S>);

impl<S: InputSource> Default for InputSourcePlugin<S> {
    fn default() -> Self { Self(PhantomData) }
}

impl<S: InputSource> Plugin for InputSourcePlugin<S> {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            dispatch_input_source::<S>.in_set(ThirdPersonSystems::Input),
        );
    }
}

/// Action buttons held as of the previous poll
#[derive(Default)]
struct HeldActions([bool; InputAction::ALL.len()]);

impl HeldActions {
    /// Records the new button state and returns the edge, if any.
    fn update(&mut self, action: InputAction, pressed: bool) -> Option<ActionPhase> {
        let held = &mut self.0[action.index()];
        let phase = match (*held, pressed) {
            (false, true) => Some(ActionPhase::Pressed),
            (true, false) => Some(ActionPhase::Released),
            _ => None,
        };
        *held = pressed;
        phase
    }
}

/// System that turns the input source's state into per-character events.
///
/// Every axis is sent every frame, zero or not. Actions only send on press and release edges.
fn dispatch_input_source<S: InputSource>(
    mut commands: Commands,
    source: Res<S>,
    mut held: Local<HeldActions>,
    characters: Query<Entity, With<PlayerInput>>,
) {
    let edges: Vec<(InputAction, ActionPhase)> = InputAction::ALL
        .into_iter()
        .filter_map(|action| {
            held.update(action, source.is_pressed(action))
                .map(|phase| (action, phase))
        })
        .collect();

    for character in &characters {
        for axis in InputAxis::ALL {
            commands.trigger(AxisInput::new(character, axis, source.axis_value(axis)));
        }

        for &(action, phase) in &edges {
            commands.trigger(ActionInput {
                character,
                action,
                phase,
            });
        }
    }
}
