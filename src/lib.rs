pub mod components;
pub mod core;
pub mod file;
pub mod render;
pub mod scenes;
pub mod states;

#[cfg(not(feature = "production"))]
pub mod debug;
