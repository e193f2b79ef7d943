use std::collections::VecDeque;

use crate::components::bar::Bar;
use crate::core::canvas::Canvas;

/// The bars of one pad, oldest first.
///
/// Bars scroll at a shared speed and are closed in creation order, so they
/// expire from the front; a ring buffer keeps both ends O(1).
#[derive(Debug, Default, Clone)]
pub struct BarTrack {
    bars: VecDeque<Bar>,
}

impl BarTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bar: Bar) {
        self.bars.push_back(bar);
    }

    pub fn latest(&self) -> Option<&Bar> {
        self.bars.back()
    }

    /// Closes the most recent bar, if any.
    pub fn close_latest(&mut self) {
        if let Some(bar) = self.bars.back_mut() {
            bar.close();
        }
    }

    /// Advances every bar one tick, drops the ones that expired and draws the
    /// survivors.
    pub fn advance(
        &mut self,
        scroll_speed: f64,
        stop_threshold: f64,
        canvas: &mut impl Canvas,
    ) {
        let mut expired = 0;
        for bar in self.bars.iter_mut() {
            if bar.advance(scroll_speed, stop_threshold) {
                expired += 1;
            } else {
                bar.draw(canvas, stop_threshold);
            }
        }

        if expired == 0 {
            return;
        }

        while self.bars.front().is_some_and(Bar::is_expired) {
            self.bars.pop_front();
            expired -= 1;
        }
        if expired > 0 {
            self.bars.retain(|bar| !bar.is_expired());
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}
