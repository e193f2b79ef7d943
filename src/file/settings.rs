use bevy::prelude::*;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::file::config_file::ConfigFile;
use crate::file::keys::{key_name, parse_key_name};

pub const CONFIG_DIRECTORY: &str = "taiko-key-overlay";
pub const CONFIG_FILE_NAME: &str = "config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub max_framerate: u32,
    pub font_file_name: String,
    pub key_size: i32,
    pub spacing_percent: f64,
    pub bar_speed: f64,
    pub release_fade_time: u32,
    pub keys: KeyBindings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub katsu_left: KeyCode,
    pub don_left: KeyCode,
    pub don_right: KeyCode,
    pub katsu_right: KeyCode,
    pub reset_counter: KeyCode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 240,
            height: 640,
            max_framerate: 60,
            font_file_name: "HarmonyOS_Sans_Regular.ttf".to_string(),
            key_size: 80,
            spacing_percent: 40.0,
            bar_speed: 12.0,
            release_fade_time: 8,
            keys: KeyBindings {
                katsu_left: KeyCode::KeyZ,
                don_left: KeyCode::KeyX,
                don_right: KeyCode::Period,
                katsu_right: KeyCode::Slash,
                reset_counter: KeyCode::KeyR,
            },
        }
    }
}

impl Settings {
    /// Reads every recognized option, inserting defaults for the missing ones.
    pub fn read_from(config: &mut ConfigFile) -> Self {
        let defaults = Settings::default();

        config.select_section("Settings");
        let width = read_checked(config, "Width", defaults.width, |&w| w > 0);
        let height = read_checked(config, "Height", defaults.height, |&h| h > 0);
        let max_framerate = read_value(config, "MaxFramerate", defaults.max_framerate);
        let font_file_name = config.read_or_insert("FontFileName", &defaults.font_file_name);
        let key_size = read_checked(config, "KeySize", defaults.key_size, |&size| size > 0);
        let spacing_percent = read_checked(
            config,
            "SpacingPercent",
            defaults.spacing_percent,
            |spacing| spacing.is_finite(),
        );
        // Bars only expire by scrolling down to the stop line.
        let bar_speed = read_checked(config, "BarSpeed", defaults.bar_speed, |&speed| {
            speed.is_finite() && speed > 0.0
        });
        let release_fade_time = read_value(config, "ReleaseFadeTime", defaults.release_fade_time);

        config.select_section("Keys");
        let katsu_left = read_key(config, "KeyKatsuL", defaults.keys.katsu_left);
        let don_left = read_key(config, "KeyDonL", defaults.keys.don_left);
        let don_right = read_key(config, "KeyDonR", defaults.keys.don_right);
        let katsu_right = read_key(config, "KeyKatsuR", defaults.keys.katsu_right);

        config.select_section("Keys2");
        let reset_counter = read_key(config, "KeyResetCounter", defaults.keys.reset_counter);

        Self {
            width,
            height,
            max_framerate,
            font_file_name,
            key_size,
            spacing_percent,
            bar_speed,
            release_fade_time,
            keys: KeyBindings {
                katsu_left,
                don_left,
                don_right,
                katsu_right,
                reset_counter,
            },
        }
    }
}

fn read_value<T>(config: &mut ConfigFile, name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    read_checked(config, name, default, |_| true)
}

/// Like [`read_value`], but values rejected by `valid` also fall back to the
/// default. The stored text is left untouched either way.
fn read_checked<T>(
    config: &mut ConfigFile,
    name: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T
where
    T: FromStr + Display,
{
    let raw = config.read_or_insert(name, &default.to_string());
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        Ok(_) => {
            warn!("Out-of-range value '{raw}' for {name}, using {default}");
            default
        }
        Err(_) => {
            warn!("Invalid value '{raw}' for {name}, using {default}");
            default
        }
    }
}

fn read_key(config: &mut ConfigFile, name: &str, default: KeyCode) -> KeyCode {
    let default_name = key_name(default).unwrap_or_default();
    let raw = config.read_or_insert(name, default_name);
    parse_key_name(raw.trim()).unwrap_or_else(|| {
        warn!("Unknown key '{raw}' for {name}, using {default_name}");
        default
    })
}

pub fn config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(mut path) => {
            path.push(CONFIG_DIRECTORY);
            path.push(CONFIG_FILE_NAME);
            path
        }
        None => {
            warn!("No user config directory, keeping {CONFIG_FILE_NAME} in the working directory");
            PathBuf::from(CONFIG_FILE_NAME)
        }
    }
}

/// Loads settings from `path`, writing any missing options back.
///
/// Never fails: unreadable files and failed writes are logged and the
/// defaults are used instead.
pub fn load_or_create_settings(path: &Path) -> Settings {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create config directory '{}': {e}", parent.display());
            }
        }
    }

    if !path.exists() {
        info!("Config file not found at '{}', creating default...", path.display());
    }

    let mut config = ConfigFile::load(path).unwrap_or_else(|e| {
        warn!("{e}, using defaults");
        ConfigFile::new()
    });

    let settings = Settings::read_from(&mut config);

    if let Err(e) = config.save(path) {
        warn!("{e}");
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_yields_defaults_and_writes_them_back() {
        let mut config = ConfigFile::new();
        let settings = Settings::read_from(&mut config);

        assert_eq!(settings, Settings::default());
        assert!(config.is_edited());
        assert_eq!(
            config.serialize(),
            "[Settings]\n\
             Width=240\n\
             Height=640\n\
             MaxFramerate=60\n\
             FontFileName=HarmonyOS_Sans_Regular.ttf\n\
             KeySize=80\n\
             SpacingPercent=40\n\
             BarSpeed=12\n\
             ReleaseFadeTime=8\n\
             \n\
             [Keys]\n\
             KeyKatsuL=Z\n\
             KeyDonL=X\n\
             KeyDonR=Period\n\
             KeyKatsuR=Slash\n\
             \n\
             [Keys2]\n\
             KeyResetCounter=R\n\
             \n"
        );
    }

    #[test]
    fn stored_values_override_defaults() {
        let mut config = ConfigFile::parse(
            "[Settings]\nWidth=320\nBarSpeed=12.5\nReleaseFadeTime=4\n\n[Keys]\nKeyDonL=C\nKeyKatsuR=RShift\n\n",
        );
        let settings = Settings::read_from(&mut config);

        assert_eq!(settings.width, 320);
        assert_eq!(settings.bar_speed, 12.5);
        assert_eq!(settings.release_fade_time, 4);
        assert_eq!(settings.keys.don_left, KeyCode::KeyC);
        assert_eq!(settings.keys.katsu_right, KeyCode::ShiftRight);
        assert_eq!(settings.keys.katsu_left, KeyCode::KeyZ);
    }

    #[test]
    fn malformed_values_fall_back_without_overwriting() {
        let mut config = ConfigFile::parse(
            "[Settings]\nKeySize=big\nReleaseFadeTime=-3\n\n[Keys]\nKeyDonR=NotAKey\n\n",
        );
        let settings = Settings::read_from(&mut config);

        assert_eq!(settings.key_size, 80);
        assert_eq!(settings.release_fade_time, 8);
        assert_eq!(settings.keys.don_right, KeyCode::Period);

        config.select_section("Settings");
        assert_eq!(config.get("KeySize"), Some("big"));
    }

    #[test]
    fn bar_speed_must_be_finite_and_positive() {
        for raw in ["NaN", "-5", "0", "inf"] {
            let mut config = ConfigFile::parse(&format!("[Settings]\nBarSpeed={raw}\n\n"));
            let settings = Settings::read_from(&mut config);

            assert_eq!(settings.bar_speed, 12.0, "BarSpeed={raw}");
            config.select_section("Settings");
            assert_eq!(config.get("BarSpeed"), Some(raw));
        }
    }

    #[test]
    fn non_positive_sizes_fall_back() {
        let mut config = ConfigFile::parse(
            "[Settings]\nWidth=0\nKeySize=-2147483648\nSpacingPercent=NaN\n\n",
        );
        let settings = Settings::read_from(&mut config);

        assert_eq!(settings.width, 240);
        assert_eq!(settings.key_size, 80);
        assert_eq!(settings.spacing_percent, 40.0);
    }

    #[test]
    fn load_or_create_persists_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_DIRECTORY).join(CONFIG_FILE_NAME);

        let settings = load_or_create_settings(&path);
        assert_eq!(settings, Settings::default());

        let written = fs::read_to_string(&path).expect("config written");
        assert!(written.starts_with("[Settings]\nWidth=240\n"));
        assert!(written.contains("[Keys2]\nKeyResetCounter=R\n"));
    }

    #[test]
    fn load_or_create_keeps_user_values_and_fills_gaps() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[Settings]\nKeySize=100\n\n").expect("seed config");

        let settings = load_or_create_settings(&path);
        assert_eq!(settings.key_size, 100);

        let written = fs::read_to_string(&path).expect("config written");
        assert!(written.starts_with("[Settings]\nKeySize=100\nWidth=240\n"));
    }
}
