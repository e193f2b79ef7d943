use bevy::prelude::*;

pub mod overlay;

pub use overlay::{tick_overlay, OverlayPlugin};

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
