pub mod config;
pub mod config_file;
pub mod keys;
pub mod settings;

pub use config::ConfigPlugin;
pub use config_file::{ConfigError, ConfigFile};
pub use settings::{KeyBindings, Settings};
