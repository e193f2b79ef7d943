pub mod canvas;
pub mod color;
pub mod input;
pub mod window;

pub use canvas::{Canvas, DrawList, ScreenRect};
pub use color::{palette, Rgba8};
pub use input::{GlobalKeyboard, HeldKeys, KeyInput};
