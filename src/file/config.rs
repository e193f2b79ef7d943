use bevy::prelude::*;

use crate::core::window::apply_window_settings;
use crate::file::settings::{config_path, load_or_create_settings};

/// Loads `config.ini` once at startup, writes missing options back, and
/// applies the window size and tick rate it describes.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let path = config_path();
        let settings = load_or_create_settings(&path);
        info!("Loaded settings from '{}'", path.display());

        let tick_rate = settings.max_framerate.max(1);
        app.insert_resource(settings)
            .insert_resource(Time::<Fixed>::from_hz(tick_rate as f64))
            .add_systems(Startup, apply_window_settings);
    }
}
