use bevy::prelude::*;

use taiko_key_overlay::core::window::overlay_window_plugin;
use taiko_key_overlay::file::ConfigPlugin;
use taiko_key_overlay::render::DrawListPlugin;
use taiko_key_overlay::scenes::OverlayPlugin;
use taiko_key_overlay::states::StartupPlugin;

#[cfg(not(feature = "production"))]
use taiko_key_overlay::debug::DebugPlugin;

fn main() -> AppExit {
    App::new()
        .add_plugins((
            DefaultPlugins.set(overlay_window_plugin()),
            ConfigPlugin,
            #[cfg(not(feature = "production"))] DebugPlugin,
            StartupPlugin,
            DrawListPlugin,
            OverlayPlugin,
        ))
        .run()
}
