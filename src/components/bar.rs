use crate::core::canvas::{Canvas, ScreenRect};
use crate::core::color::{palette, Rgba8};

/// One press-to-release interval scrolling up the note highway.
///
/// `start_y` is the top edge, `end_y` the bottom edge. While `hold` is set the
/// bottom edge stays on the key line and the bar stretches as the top edge
/// retreats. Once closed, both edges scroll until the bottom edge reaches the
/// stop line, at which point the bar expires.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: i32,
    pub width: i32,
    pub start_y: f64,
    pub end_y: f64,
    pub hold: bool,
    pub color: Rgba8,
    expired: bool,
}

impl Bar {
    pub fn new(x: i32, width: i32, key_line_y: f64, color: Rgba8) -> Self {
        Self {
            x,
            width,
            start_y: key_line_y,
            end_y: key_line_y,
            hold: true,
            color,
            expired: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn close(&mut self) {
        self.hold = false;
    }

    /// Moves the bar one tick. Returns `true` once the bar has expired; an
    /// expired bar is never moved again.
    pub fn advance(&mut self, scroll_speed: f64, stop_threshold: f64) -> bool {
        if self.expired {
            return true;
        }

        if self.start_y > stop_threshold {
            self.start_y = (self.start_y - scroll_speed).max(stop_threshold);
        }

        if !self.hold {
            self.end_y -= scroll_speed;
        }

        if self.end_y <= stop_threshold {
            self.expired = true;
        }

        self.expired
    }

    /// Draws the body and the highlight strip along its top edge. The strip is
    /// as tall as the stop line offset, so a frozen bar keeps it on screen.
    pub fn draw(&self, canvas: &mut impl Canvas, highlight_thickness: f64) {
        if self.expired {
            return;
        }

        let x = self.x as f32;
        let width = self.width as f32;
        let start_y = self.start_y as f32;

        canvas.draw_rect(
            ScreenRect::new(x, start_y, width, (self.end_y - self.start_y) as f32),
            self.color,
        );
        canvas.draw_rect(
            ScreenRect::new(x, start_y, width, highlight_thickness as f32),
            palette::BAR_HIGHLIGHT,
        );
    }
}
