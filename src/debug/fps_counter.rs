use bevy::{
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
};

use crate::states::OverlayFont;

const TOGGLE_KEY: KeyCode = KeyCode::F3;

#[derive(Component)]
pub struct FpsCounter;

#[derive(Component)]
pub struct FpsText;

pub fn spawn_fps_counter(mut commands: Commands, font: Res<OverlayFont>) {
    let text_font = TextFont {
        font: font.0.clone(),
        font_size: 12.0,
        ..default()
    };

    commands
        .spawn((
            Text::new("FPS: "),
            text_font.clone(),
            TextColor(Color::srgb(1.0, 1.0, 1.0)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(4.0),
                left: Val::Px(4.0),
                ..default()
            },
            Visibility::Hidden,
            FpsCounter,
        ))
        .with_child((
            TextSpan::default(),
            text_font,
            TextColor(Color::srgb(1.0, 1.0, 1.0)),
            FpsText,
        ));
}

pub fn toggle_fps_counter(
    input: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut Visibility, With<FpsCounter>>,
) {
    if !input.just_pressed(TOGGLE_KEY) {
        return;
    }
    for mut visibility in &mut query {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Inherited,
            _ => Visibility::Hidden,
        };
    }
}

pub fn update_fps_text(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut TextSpan, With<FpsText>>,
) {
    for mut span in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                **span = format!("{value:.0}");
            }
        }
    }
}
