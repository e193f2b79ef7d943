pub mod bar;
pub mod bar_track;
pub mod compositor;
pub mod key_pad;

pub use bar::Bar;
pub use bar_track::BarTrack;
pub use compositor::Compositor;
pub use key_pad::{Drum, KeyPad, OverlayParams, PadBindings, PadLayout, PadPhase};
