//! Overridable character input hooks and the observers that drive them

use std::marker::PhantomData;

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

use crate::components::ControlRotation;
use crate::components::LookConfig;
use crate::components::PlayerCharacter;
use crate::events::ActionInput;
use crate::events::AxisInput;
use crate::events::ZoomBegin;
use crate::input::ActionPhase;
use crate::input::InputAction;
use crate::input::InputAxis;
use crate::movement::CharacterMovement;
use crate::movement::apply_forward;
use crate::movement::apply_right;
use crate::zoom::CameraZoom;

/// Character state a hook may read or change.
///
/// Components are handed over as [`Mut`], so only a hook that actually writes to one marks it
/// changed.
pub struct ControlContext<'a> {
    /// `None` while no controller possesses the character
    pub control_rotation: Option<Mut<'a, ControlRotation>>,
    pub movement:         Mut<'a, CharacterMovement>,
    pub zoom:             Mut<'a, CameraZoom>,
    pub look:             &'a LookConfig,
    pub delta_secs:       f32,
}

/// Input hooks of a concrete character type.
///
/// Every hook has a default. Gamepad look does nothing unless overridden, so a character that
/// wants stick-driven camera rotation has to supply it.
pub trait CharacterControls: Component<Mutability = Mutable> {
    fn move_forward(&mut self, ctx: &mut ControlContext, value: f32) {
        if value != 0.0 {
            apply_forward(ctx.control_rotation.as_deref(), value, &mut *ctx.movement);
        }
    }

    fn move_right(&mut self, ctx: &mut ControlContext, value: f32) {
        if value != 0.0 {
            apply_right(ctx.control_rotation.as_deref(), value, &mut *ctx.movement);
        }
    }

    fn look_up_gamepad(&mut self, _ctx: &mut ControlContext, _value: f32) {}

    fn look_right_gamepad(&mut self, _ctx: &mut ControlContext, _value: f32) {}

    fn enter_zoom(&mut self, ctx: &mut ControlContext) {
        ctx.zoom.request_zoom_in(&mut *ctx.movement);
    }

    fn exit_zoom(&mut self, ctx: &mut ControlContext) {
        ctx.zoom.request_zoom_out(&mut *ctx.movement);
    }
}

impl CharacterControls for PlayerCharacter {}

/// Routes input events for characters carrying `C` to its hooks.
pub struct CharacterControlsPlugin<C: CharacterControls>(PhantomData<C>);

impl<C: CharacterControls> Default for CharacterControlsPlugin<C> {
    fn default() -> Self { Self(PhantomData) }
}

impl<C: CharacterControls> Plugin for CharacterControlsPlugin<C> {
    fn build(&self, app: &mut App) {
        app.add_observer(on_axis_input::<C>)
            .add_observer(on_action_input::<C>);
    }
}

type ControlQuery<'w, 's, C> = Query<
    'w,
    's,
    (
        &'static mut C,
        Option<&'static mut ControlRotation>,
        &'static mut CharacterMovement,
        &'static mut CameraZoom,
        &'static LookConfig,
    ),
>;

/// Observer for `AxisInput` - movement goes to the hooks, mouse look straight to the controller
pub fn on_axis_input<C: CharacterControls>(
    input: On<AxisInput>,
    time: Res<Time>,
    mut query: ControlQuery<C>,
) {
    let Ok((mut controls, control_rotation, movement, zoom, look)) =
        query.get_mut(input.character)
    else {
        return;
    };

    let value = input.value;
    let hook: fn(&mut C, &mut ControlContext, f32) = match input.axis {
        InputAxis::Forward => C::move_forward,
        InputAxis::Right => C::move_right,
        InputAxis::LookUpGamepad => C::look_up_gamepad,
        InputAxis::LookRightGamepad => C::look_right_gamepad,
        InputAxis::LookUpMouse => {
            if let Some(mut control) = control_rotation.filter(|_| value != 0.0) {
                control.add_pitch_input(value * look.mouse_pitch_scale);
            }
            return;
        },
        InputAxis::LookRightMouse => {
            if let Some(mut control) = control_rotation.filter(|_| value != 0.0) {
                // Positive look-right turns clockwise seen from above
                control.add_yaw_input(-value * look.mouse_yaw_scale);
            }
            return;
        },
    };

    let mut ctx = ControlContext {
        control_rotation,
        movement,
        zoom,
        look,
        delta_secs: time.delta_secs(),
    };
    hook(&mut *controls, &mut ctx, value);
}

/// Observer for `ActionInput` - jump goes to the movement simulation, zoom to the hooks
pub fn on_action_input<C: CharacterControls>(
    input: On<ActionInput>,
    mut commands: Commands,
    time: Res<Time>,
    mut query: ControlQuery<C>,
) {
    let character = input.character;

    let Ok((mut controls, control_rotation, mut movement, zoom, look)) = query.get_mut(character)
    else {
        return;
    };

    match (input.action, input.phase) {
        (InputAction::Jump, ActionPhase::Pressed) => movement.jump(),
        (InputAction::Jump, ActionPhase::Released) => movement.stop_jumping(),
        (InputAction::Zoom, phase) => {
            let requests_before = zoom.requests();

            let mut ctx = ControlContext {
                control_rotation,
                movement,
                zoom,
                look,
                delta_secs: time.delta_secs(),
            };
            match phase {
                ActionPhase::Pressed => controls.enter_zoom(&mut ctx),
                ActionPhase::Released => controls.exit_zoom(&mut ctx),
            }

            let state = ctx.zoom.state();
            if state.is_transitioning() && ctx.zoom.requests() != requests_before {
                debug!("CameraZoom: {character:?} begins {state:?}");
                commands.trigger(ZoomBegin { character, state });
            }
        },
    }
}
