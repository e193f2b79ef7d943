use bevy::prelude::*;

use crate::components::Compositor;
use crate::core::canvas::DrawList;
use crate::core::input::GlobalKeyboard;
use crate::file::settings::Settings;
use crate::scenes::setup_camera;
use crate::states::AppState;

/// Runs the pads once per fixed step so bar speed stays in pixels per tick
/// regardless of the display refresh rate.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        match GlobalKeyboard::open() {
            Some(keyboard) => {
                info!("Reading keys from the desktop keyboard state");
                app.insert_non_send_resource(keyboard);
            }
            None => warn!(
                "Desktop keyboard state unavailable, keys only register while the overlay has focus"
            ),
        }

        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (setup_camera, setup_compositor))
            .add_systems(
                FixedUpdate,
                tick_overlay.run_if(in_state(AppState::Running)),
            );
    }
}

pub fn setup_compositor(mut commands: Commands, settings: Res<Settings>) {
    info!(
        "Pads bound to {:?}/{:?} and {:?}/{:?}, reset on {:?}",
        settings.keys.don_left,
        settings.keys.katsu_left,
        settings.keys.don_right,
        settings.keys.katsu_right,
        settings.keys.reset_counter,
    );
    commands.insert_resource(Compositor::from_settings(&settings));
}

pub fn tick_overlay(
    desktop_keys: Option<NonSend<GlobalKeyboard>>,
    window_keys: Res<ButtonInput<KeyCode>>,
    mut compositor: ResMut<Compositor>,
    mut draw_list: ResMut<DrawList>,
) {
    draw_list.clear();
    match desktop_keys {
        Some(keyboard) => compositor.tick(&keyboard.held_keys(), &mut *draw_list),
        None => compositor.tick(&*window_keys, &mut *draw_list),
    }
}
