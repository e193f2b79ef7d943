use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::core::canvas::DrawList;
use crate::core::window::screen_to_world;
use crate::file::settings::Settings;
use crate::states::{AppState, OverlayFont};

const COUNTER_FONT_SIZE: f32 = 24.0;
const RECT_Z: f32 = 0.0;
const TEXT_Z: f32 = 100.0;
// Keeps later draw calls in front of earlier ones within a layer.
const Z_STEP: f32 = 0.001;

#[derive(Component)]
pub struct OverlayRect;

#[derive(Component)]
pub struct OverlayText;

/// Entities reused frame to frame to present the latest [`DrawList`].
#[derive(Resource, Default)]
pub struct DrawPool {
    rects: Vec<Entity>,
    texts: Vec<Entity>,
}

pub struct DrawListPlugin;

impl Plugin for DrawListPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawList>()
            .init_resource::<DrawPool>()
            .add_systems(
                Update,
                present_draw_list.run_if(in_state(AppState::Running)),
            );
    }
}

#[allow(clippy::type_complexity)]
pub fn present_draw_list(
    mut commands: Commands,
    draw_list: Res<DrawList>,
    settings: Res<Settings>,
    font: Res<OverlayFont>,
    mut pool: ResMut<DrawPool>,
    mut rects: Query<
        (&mut Sprite, &mut Transform, &mut Visibility),
        (With<OverlayRect>, Without<OverlayText>),
    >,
    mut texts: Query<
        (&mut Text2d, &mut TextColor, &mut Anchor, &mut Transform, &mut Visibility),
        (With<OverlayText>, Without<OverlayRect>),
    >,
) {
    let window_size = Vec2::new(settings.width as f32, settings.height as f32);

    for (index, command) in draw_list.rects.iter().enumerate() {
        let size = Vec2::new(command.rect.width, command.rect.height.max(0.0));
        let center = screen_to_world(
            command.rect.x,
            command.rect.y,
            size.x,
            size.y,
            window_size,
        );
        let transform = Transform::from_translation(center.extend(RECT_Z + index as f32 * Z_STEP));
        let color: Color = command.color.into();

        match pool.rects.get(index).copied() {
            Some(entity) => {
                if let Ok((mut sprite, mut current, mut visibility)) = rects.get_mut(entity) {
                    sprite.color = color;
                    sprite.custom_size = Some(size);
                    *current = transform;
                    *visibility = Visibility::Inherited;
                }
            }
            None => {
                let entity = commands
                    .spawn((Sprite::from_color(color, size), transform, OverlayRect))
                    .id();
                pool.rects.push(entity);
            }
        }
    }

    for &entity in pool.rects.iter().skip(draw_list.rects.len()) {
        if let Ok((_, _, mut visibility)) = rects.get_mut(entity) {
            *visibility = Visibility::Hidden;
        }
    }

    for (index, command) in draw_list.texts.iter().enumerate() {
        let position = screen_to_world(command.x, command.y, 0.0, 0.0, window_size);
        let transform =
            Transform::from_translation(position.extend(TEXT_Z + index as f32 * Z_STEP));
        let anchor = if command.centered {
            Anchor::CENTER
        } else {
            Anchor::TOP_LEFT
        };
        let color = TextColor(command.color.into());

        match pool.texts.get(index).copied() {
            Some(entity) => {
                if let Ok((mut text, mut text_color, mut current_anchor, mut current, mut visibility)) =
                    texts.get_mut(entity)
                {
                    if text.0 != command.text {
                        text.0.clone_from(&command.text);
                    }
                    *text_color = color;
                    *current_anchor = anchor;
                    *current = transform;
                    *visibility = Visibility::Inherited;
                }
            }
            None => {
                let entity = commands
                    .spawn((
                        Text2d::new(command.text.clone()),
                        TextFont {
                            font: font.0.clone(),
                            font_size: COUNTER_FONT_SIZE,
                            ..default()
                        },
                        color,
                        anchor,
                        transform,
                        OverlayText,
                    ))
                    .id();
                pool.texts.push(entity);
            }
        }
    }

    for &entity in pool.texts.iter().skip(draw_list.texts.len()) {
        if let Ok((_, _, _, _, mut visibility)) = texts.get_mut(entity) {
            *visibility = Visibility::Hidden;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canvas::{Canvas, ScreenRect};
    use crate::core::color::palette;

    fn presenter_app() -> App {
        let mut app = App::new();
        app.init_resource::<DrawList>()
            .init_resource::<DrawPool>()
            .insert_resource(Settings::default())
            .insert_resource(OverlayFont::default())
            .add_systems(Update, present_draw_list);
        app
    }

    fn draw_rects(app: &mut App, count: usize) {
        let mut draw_list = app.world_mut().resource_mut::<DrawList>();
        draw_list.clear();
        for index in 0..count {
            draw_list.draw_rect(
                ScreenRect::new(32.0, index as f32 * 10.0, 80.0, 10.0),
                palette::DON,
            );
        }
    }

    fn pooled_visibility(app: &App) -> Vec<Visibility> {
        let world = app.world();
        world
            .resource::<DrawPool>()
            .rects
            .iter()
            .map(|&entity| {
                *world
                    .get::<Visibility>(entity)
                    .expect("pooled rect has visibility")
            })
            .collect()
    }

    #[test]
    fn shrinking_draw_list_hides_extra_rects() {
        let mut app = presenter_app();
        draw_rects(&mut app, 4);
        app.update();
        assert_eq!(pooled_visibility(&app), vec![Visibility::Inherited; 4]);

        draw_rects(&mut app, 2);
        app.update();
        assert_eq!(
            pooled_visibility(&app),
            vec![
                Visibility::Inherited,
                Visibility::Inherited,
                Visibility::Hidden,
                Visibility::Hidden,
            ]
        );
    }

    #[test]
    fn growing_again_reuses_pooled_rects() {
        let mut app = presenter_app();
        draw_rects(&mut app, 4);
        app.update();
        draw_rects(&mut app, 1);
        app.update();
        draw_rects(&mut app, 3);
        app.update();

        let world = app.world_mut();
        let spawned = world
            .query_filtered::<Entity, With<OverlayRect>>()
            .iter(world)
            .count();
        assert_eq!(spawned, 4);
        assert_eq!(
            pooled_visibility(&app),
            vec![
                Visibility::Inherited,
                Visibility::Inherited,
                Visibility::Inherited,
                Visibility::Hidden,
            ]
        );
    }
}
