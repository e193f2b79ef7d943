use bevy::prelude::*;
use bevy::window::{ExitCondition, PrimaryWindow, WindowPlugin};

use crate::file::settings::Settings;

pub const WINDOW_TITLE: &str = "TaikoKeyOverlay";

pub fn overlay_window_plugin() -> WindowPlugin {
    WindowPlugin {
        primary_window: Some(Window {
            title: WINDOW_TITLE.to_string(),
            resizable: false,
            ..default()
        }),
        exit_condition: ExitCondition::OnPrimaryClosed,
        ..default()
    }
}

pub fn apply_window_size(window: &mut Window, settings: &Settings) {
    window
        .resolution
        .set(settings.width as f32, settings.height as f32);
}

pub fn apply_window_settings(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    settings: Res<Settings>,
) {
    if let Ok(mut window) = windows.single_mut() {
        apply_window_size(&mut window, &settings);
    } else {
        warn!("Primary window not available to apply settings");
    }
}

/// Maps a top-left-origin pixel rectangle to the center of the same area in
/// world space, for a 2D camera centered on a `width` x `height` window.
pub fn screen_to_world(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    window_size: Vec2,
) -> Vec2 {
    Vec2::new(
        x + width / 2.0 - window_size.x / 2.0,
        window_size.y / 2.0 - (y + height / 2.0),
    )
}
