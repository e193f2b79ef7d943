use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::file::settings::Settings;

#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Font used for the press counters.
#[derive(Resource, Debug, Clone, Default)]
pub struct OverlayFont(pub Handle<Font>);

// The overlay only starts ticking once everything it draws with is available,
// so the first counter frame never renders without a font.
pub fn load_font(mut commands: Commands, asset_server: Res<AssetServer>, settings: Res<Settings>) {
    info!("Loading font '{}'", settings.font_file_name);
    let handle: Handle<Font> = asset_server.load(settings.font_file_name.clone());
    commands.insert_resource(OverlayFont(handle));
}

pub fn check_startup_complete(
    font: Res<OverlayFont>,
    settings: Res<Settings>,
    asset_server: Res<AssetServer>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: MessageWriter<AppExit>,
) {
    match asset_server.load_state(&font.0) {
        LoadState::Loaded => next_state.set(AppState::Running),
        LoadState::Failed(err) => {
            error!("Failed to load font '{}': {err}", settings.font_file_name);
            exit.write(AppExit::error());
        }
        _ => {}
    }
}

pub struct StartupPlugin;

impl Plugin for StartupPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_systems(OnEnter(AppState::Loading), load_font)
            .add_systems(
                Update,
                check_startup_complete.run_if(in_state(AppState::Loading)),
            );
    }
}
