use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*};

use crate::states::AppState;

pub mod fps_counter;

/// Development aid: an FPS readout toggled with F3.
pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_systems(OnEnter(AppState::Running), fps_counter::spawn_fps_counter)
            .add_systems(
                Update,
                (fps_counter::toggle_fps_counter, fps_counter::update_fps_text)
                    .run_if(in_state(AppState::Running)),
            );
    }
}
