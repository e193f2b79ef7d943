use bevy::prelude::*;

use crate::components::key_pad::{KeyPad, OverlayParams, PadBindings, PadLayout};
use crate::core::canvas::Canvas;
use crate::core::input::KeyInput;
use crate::file::settings::Settings;

/// Owns the left and right pads and advances them once per tick.
///
/// The reset key is edge-triggered: holding it resets once, not every tick.
#[derive(Resource, Debug, Clone)]
pub struct Compositor {
    left: KeyPad,
    right: KeyPad,
    reset_key: KeyCode,
    reset_was_down: bool,
}

impl Compositor {
    pub fn new(left: KeyPad, right: KeyPad, reset_key: KeyCode) -> Self {
        Self {
            left,
            right,
            reset_key,
            reset_was_down: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let params = OverlayParams {
            scroll_speed: settings.bar_speed,
            release_fade_ticks: settings.release_fade_time,
            ..default()
        };

        let half_width = (settings.width / 2) as f64;
        let spacing = settings.spacing_percent / 100.0;
        let center_y = (settings.height as i32).saturating_sub(settings.key_size);
        let layout = |center_x: f64| PadLayout {
            center_x: center_x as i32,
            center_y,
            width: settings.key_size,
            height: settings.key_size,
        };

        let keys = &settings.keys;
        let left = KeyPad::new(
            layout(half_width * (1.0 - spacing)),
            PadBindings {
                don: keys.don_left,
                katsu: keys.katsu_left,
            },
            params,
        );
        let right = KeyPad::new(
            layout(half_width * (1.0 + spacing)),
            PadBindings {
                don: keys.don_right,
                katsu: keys.katsu_right,
            },
            params,
        );

        Self::new(left, right, keys.reset_counter)
    }

    pub fn tick(&mut self, input: &impl KeyInput, canvas: &mut impl Canvas) {
        let reset_down = input.is_down(self.reset_key);
        if reset_down && !self.reset_was_down {
            self.reset();
        }
        self.reset_was_down = reset_down;

        self.left.tick(input, canvas);
        self.right.tick(input, canvas);
    }

    pub fn reset(&mut self) {
        info!("resetting press counters");
        self.left.reset();
        self.right.reset();
    }

    pub fn left(&self) -> &KeyPad {
        &self.left
    }

    pub fn right(&self) -> &KeyPad {
        &self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canvas::DrawList;

    #[test]
    fn layout_follows_settings() {
        let compositor = Compositor::from_settings(&Settings::default());

        // 240 wide, 40% spacing: centers at 120 * 0.6 and 120 * 1.4
        assert_eq!(compositor.left().layout().center_x, 72);
        assert_eq!(compositor.right().layout().center_x, 168);
        assert_eq!(compositor.left().layout().center_y, 560);
        assert_eq!(compositor.right().layout().width, 80);
    }

    #[test]
    fn bindings_follow_settings() {
        let compositor = Compositor::from_settings(&Settings::default());

        assert_eq!(compositor.left().bindings().don, KeyCode::KeyX);
        assert_eq!(compositor.left().bindings().katsu, KeyCode::KeyZ);
        assert_eq!(compositor.right().bindings().don, KeyCode::Period);
        assert_eq!(compositor.right().bindings().katsu, KeyCode::Slash);
    }

    #[test]
    fn pads_draw_left_then_right() {
        let mut compositor = Compositor::from_settings(&Settings::default());
        let input = ButtonInput::<KeyCode>::default();
        let mut canvas = DrawList::default();

        compositor.tick(&input, &mut canvas);

        let xs: Vec<f32> = canvas.texts.iter().map(|text| text.x).collect();
        assert_eq!(xs, vec![72.0, 168.0]);
    }

    #[test]
    fn reset_fires_once_per_key_down() {
        let mut compositor = Compositor::from_settings(&Settings::default());
        let mut input = ButtonInput::<KeyCode>::default();
        let mut canvas = DrawList::default();

        input.press(KeyCode::KeyX);
        compositor.tick(&input, &mut canvas);
        input.press(KeyCode::KeyR);
        compositor.tick(&input, &mut canvas);
        assert_eq!(compositor.left().press_count(), 0);

        input.release(KeyCode::KeyX);
        compositor.tick(&input, &mut canvas);
        input.press(KeyCode::KeyX);
        compositor.tick(&input, &mut canvas);
        assert_eq!(compositor.left().press_count(), 1, "held reset key must not keep resetting");

        input.release(KeyCode::KeyR);
        compositor.tick(&input, &mut canvas);
        input.press(KeyCode::KeyR);
        compositor.tick(&input, &mut canvas);
        assert_eq!(compositor.left().press_count(), 0);
    }
}
