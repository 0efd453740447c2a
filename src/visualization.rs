//! Debug drawing for the camera obstruction probe
//!
//! Uses Bevy's `GizmoConfigGroup` pattern so the probe lines can be toggled without touching the
//! probe itself.

use bevy::prelude::*;

use crate::probe::ObstructionTrace;

/// Gizmo config group for obstruction probe lines.
/// Toggle via `GizmoConfigStore::config_mut::<ObstructionProbeGizmo>().enabled`
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ObstructionProbeGizmo {}

/// Appearance of the probe lines
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct ObstructionProbeVisualizationConfig {
    pub line_color: Color,
    pub line_width: f32,
}

impl Default for ObstructionProbeVisualizationConfig {
    fn default() -> Self {
        Self {
            line_color: Color::srgb(0.0, 1.0, 0.0), // Green
            line_width: 5.0,
        }
    }
}

/// Plugin that draws every character's obstruction probe
pub struct ObstructionProbeVisualizationPlugin;

impl Plugin for ObstructionProbeVisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<ObstructionProbeGizmo>()
            .init_resource::<ObstructionProbeVisualizationConfig>()
            .add_systems(Startup, init_obstruction_probe_gizmo)
            .add_systems(
                Update,
                (sync_gizmo_line_width, draw_obstruction_probes)
                    .chain()
                    .after(crate::ThirdPersonSystems::Camera),
            );
    }
}

/// Initialize the probe gizmo config (disabled by default)
fn init_obstruction_probe_gizmo(
    mut config_store: ResMut<GizmoConfigStore>,
    viz_config: Res<ObstructionProbeVisualizationConfig>,
) {
    let (config, _) = config_store.config_mut::<ObstructionProbeGizmo>();
    config.enabled = false;
    config.line.width = viz_config.line_width;
}

fn sync_gizmo_line_width(
    mut config_store: ResMut<GizmoConfigStore>,
    viz_config: Res<ObstructionProbeVisualizationConfig>,
) {
    if !viz_config.is_changed() {
        return;
    }
    let (config, _) = config_store.config_mut::<ObstructionProbeGizmo>();
    config.line.width = viz_config.line_width;
}

fn draw_obstruction_probes(
    mut gizmos: Gizmos<ObstructionProbeGizmo>,
    viz_config: Res<ObstructionProbeVisualizationConfig>,
    trace_query: Query<&ObstructionTrace>,
) {
    for trace in &trace_query {
        gizmos.line(trace.start, trace.end, viz_config.line_color);
    }
}
