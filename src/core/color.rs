use bevy::prelude::Color;

/// 8-bit RGBA color as used by the pad state machine.
///
/// The overlay does all of its color math on integer channels so that the
/// release fade truncates the same way on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiplies every color channel by `numerator / denominator`, truncating.
    /// Alpha is kept. A zero denominator yields black.
    pub fn scaled(self, numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return Self { a: self.a, ..Self::BLACK };
        }
        let scale = |channel: u8| {
            (channel as u64 * numerator as u64 / denominator as u64).min(255) as u8
        };
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}

impl From<Rgba8> for Color {
    fn from(color: Rgba8) -> Self {
        Color::srgba_u8(color.r, color.g, color.b, color.a)
    }
}

pub mod palette {
    use super::Rgba8;

    pub const DON: Rgba8 = Rgba8::rgb(235, 69, 44); // red
    pub const KATSU: Rgba8 = Rgba8::rgb(68, 141, 171); // blue

    pub const IDLE_KEY: Rgba8 = Rgba8::BLACK;
    pub const IDLE_BORDER: Rgba8 = Rgba8::WHITE;

    pub const BAR_HIGHLIGHT: Rgba8 = Rgba8::rgba(255, 255, 255, 192);
    pub const COUNTER_TEXT: Rgba8 = Rgba8::WHITE;

    /// Key fill is drawn at 4/5 of the palette color so the border stands out.
    pub const KEY_FILL_NUMERATOR: u32 = 4;
    pub const KEY_FILL_DENOMINATOR: u32 = 5;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_truncates_per_channel() {
        let color = Rgba8::rgb(235, 69, 44).scaled(4, 5);
        assert_eq!(color, Rgba8::rgb(188, 55, 35));
    }

    #[test]
    fn scaled_keeps_alpha() {
        let color = Rgba8::rgba(100, 100, 100, 192).scaled(1, 2);
        assert_eq!(color, Rgba8::rgba(50, 50, 50, 192));
    }

    #[test]
    fn scaled_by_zero_is_black() {
        assert_eq!(palette::KATSU.scaled(0, 8), Rgba8::BLACK);
        assert_eq!(palette::KATSU.scaled(3, 0), Rgba8::BLACK);
    }

    #[test]
    fn scaled_handles_long_fades() {
        let color = Rgba8::rgb(188, 55, 35).scaled(29_999_999, 30_000_000);
        assert_eq!(color, Rgba8::rgb(187, 54, 34));
        assert_eq!(Rgba8::WHITE.scaled(u32::MAX, u32::MAX), Rgba8::WHITE);
    }
}
