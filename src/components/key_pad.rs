use bevy::prelude::*;

use crate::components::bar::Bar;
use crate::components::bar_track::BarTrack;
use crate::core::canvas::{Canvas, ScreenRect};
use crate::core::color::{palette, Rgba8};
use crate::core::input::KeyInput;

const BORDER_THICKNESS: i32 = 8;

/// The two button roles of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Drum {
    Don,
    Katsu,
}

impl Drum {
    pub fn color(self) -> Rgba8 {
        match self {
            Drum::Don => palette::DON,
            Drum::Katsu => palette::KATSU,
        }
    }
}

/// Displayed state of the key cell, recomputed every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadPhase {
    Idle,
    Pressed,
    /// Fading out; `remaining` ticks of color are left (`1..=release_fade_ticks`).
    Releasing { remaining: u32 },
}

/// Center and size of a pad cell, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadLayout {
    pub center_x: i32,
    pub center_y: i32,
    pub width: i32,
    pub height: i32,
}

impl PadLayout {
    pub fn left(&self) -> i32 {
        self.center_x - self.width / 2
    }

    /// Where bars are born and where the top of the key cell sits.
    pub fn key_line(&self) -> i32 {
        self.center_y - self.height / 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadBindings {
    pub don: KeyCode,
    pub katsu: KeyCode,
}

/// Tuning shared by both pads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayParams {
    /// Pixels a bar scrolls per tick.
    pub scroll_speed: f64,
    /// Line at which bar tops freeze and closed bars expire.
    pub stop_threshold: f64,
    pub release_fade_ticks: u32,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            scroll_speed: 12.0,
            stop_threshold: 6.0,
            release_fade_ticks: 8,
        }
    }
}

/// Press/hold/release state machine for one pad and the bars it drives.
#[derive(Debug, Clone)]
pub struct KeyPad {
    layout: PadLayout,
    bindings: PadBindings,
    params: OverlayParams,

    don_was_down: bool,
    katsu_was_down: bool,
    last_triggered: Option<Drum>,

    press_count: u32,
    release_timer: u32,
    phase: PadPhase,

    target_color: Rgba8,
    border_color: Rgba8,

    track: BarTrack,
}

impl KeyPad {
    pub fn new(layout: PadLayout, bindings: PadBindings, params: OverlayParams) -> Self {
        Self {
            layout,
            bindings,
            params,
            don_was_down: false,
            katsu_was_down: false,
            last_triggered: None,
            press_count: 0,
            release_timer: 0,
            phase: PadPhase::Idle,
            target_color: palette::IDLE_KEY,
            border_color: palette::IDLE_BORDER,
            track: BarTrack::new(),
        }
    }

    /// Samples both bound keys and runs one tick.
    pub fn tick(&mut self, input: &impl KeyInput, canvas: &mut impl Canvas) {
        let don_down = input.is_down(self.bindings.don);
        let katsu_down = input.is_down(self.bindings.katsu);
        self.step(don_down, katsu_down, canvas);
    }

    /// Runs one tick from already sampled key states.
    pub fn step(&mut self, don_down: bool, katsu_down: bool, canvas: &mut impl Canvas) {
        if don_down && !self.don_was_down {
            self.trigger(Drum::Don);
        }
        if katsu_down && !self.katsu_was_down {
            self.trigger(Drum::Katsu);
        }

        self.update_release(don_down, katsu_down);

        self.track
            .advance(self.params.scroll_speed, self.params.stop_threshold, canvas);

        self.don_was_down = don_down;
        self.katsu_was_down = katsu_down;

        self.draw(canvas);
    }

    fn trigger(&mut self, drum: Drum) {
        self.press_count += 1;

        let color = drum.color();
        self.border_color = color;
        self.target_color =
            color.scaled(palette::KEY_FILL_NUMERATOR, palette::KEY_FILL_DENOMINATOR);
        self.last_triggered = Some(drum);

        self.track.close_latest();
        self.track.push(Bar::new(
            self.layout.left(),
            self.layout.width,
            self.layout.key_line() as f64,
            color,
        ));
    }

    // Release is keyed on the drum that triggered last, not on "nothing held":
    // holding Don while tapping Katsu starts the fade as soon as Katsu lifts.
    fn update_release(&mut self, don_down: bool, katsu_down: bool) {
        let released = match self.last_triggered {
            Some(Drum::Don) => !don_down,
            Some(Drum::Katsu) => !katsu_down,
            None => false,
        };

        if !released {
            self.release_timer = self.params.release_fade_ticks;
            self.phase = match self.last_triggered {
                Some(_) => PadPhase::Pressed,
                None => PadPhase::Idle,
            };
            return;
        }

        self.track.close_latest();

        if self.release_timer > 0 {
            self.release_timer -= 1;
        }
        self.phase = match self.release_timer {
            0 => PadPhase::Idle,
            remaining => PadPhase::Releasing { remaining },
        };
    }

    fn draw(&self, canvas: &mut impl Canvas) {
        let PadLayout {
            center_x,
            center_y,
            width,
            height,
        } = self.layout;

        canvas.draw_rect(
            ScreenRect::new(
                self.layout.left() as f32,
                self.layout.key_line() as f32,
                width as f32,
                height as f32,
            ),
            self.border_color,
        );

        let key_width = width - BORDER_THICKNESS * 2;
        let key_height = height - BORDER_THICKNESS * 2;
        canvas.draw_rect(
            ScreenRect::new(
                (center_x - key_width / 2) as f32,
                (center_y - key_height / 2) as f32,
                key_width as f32,
                key_height as f32,
            ),
            self.key_color(),
        );

        canvas.draw_text(
            center_x as f32,
            center_y as f32,
            &self.press_count.to_string(),
            palette::COUNTER_TEXT,
            true,
        );
    }

    /// Clears the counter and colors. The release timer, the last trigger and
    /// every bar in flight are left alone.
    pub fn reset(&mut self) {
        self.press_count = 0;
        self.target_color = palette::IDLE_KEY;
        self.border_color = palette::IDLE_BORDER;
        debug!("pad reset, {} bars in flight", self.track.len());
    }

    pub fn key_color(&self) -> Rgba8 {
        match self.phase {
            PadPhase::Idle => palette::IDLE_KEY,
            PadPhase::Pressed => self.target_color,
            PadPhase::Releasing { remaining } => self
                .target_color
                .scaled(remaining, self.params.release_fade_ticks),
        }
    }

    pub fn phase(&self) -> PadPhase {
        self.phase
    }

    pub fn press_count(&self) -> u32 {
        self.press_count
    }

    pub fn release_timer(&self) -> u32 {
        self.release_timer
    }

    pub fn last_triggered(&self) -> Option<Drum> {
        self.last_triggered
    }

    pub fn target_color(&self) -> Rgba8 {
        self.target_color
    }

    pub fn border_color(&self) -> Rgba8 {
        self.border_color
    }

    pub fn bars(&self) -> &BarTrack {
        &self.track
    }

    pub fn layout(&self) -> PadLayout {
        self.layout
    }

    pub fn bindings(&self) -> PadBindings {
        self.bindings
    }
}
