use bevy::prelude::*;

use crate::core::color::Rgba8;

/// Axis-aligned rectangle in window pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Render collaborator. The overlay issues draw calls and never reads back.
pub trait Canvas {
    fn draw_rect(&mut self, rect: ScreenRect, color: Rgba8);
    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Rgba8, centered: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectCommand {
    pub rect: ScreenRect,
    pub color: Rgba8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub color: Rgba8,
    pub centered: bool,
}

/// Draw calls recorded during one tick, in issue order.
///
/// Rectangles and text are kept in separate lists because they are presented
/// by different entity pools; text is always drawn above rectangles.
#[derive(Resource, Debug, Default, Clone)]
pub struct DrawList {
    pub rects: Vec<RectCommand>,
    pub texts: Vec<TextCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.rects.clear();
        self.texts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.texts.is_empty()
    }
}

impl Canvas for DrawList {
    fn draw_rect(&mut self, rect: ScreenRect, color: Rgba8) {
        self.rects.push(RectCommand { rect, color });
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Rgba8, centered: bool) {
        self.texts.push(TextCommand {
            x,
            y,
            text: text.to_string(),
            color,
            centered,
        });
    }
}
