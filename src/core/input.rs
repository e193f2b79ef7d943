use bevy::prelude::*;
use device_query::{DeviceQuery, DeviceState};
use std::collections::HashSet;

use crate::file::keys::from_device_keycode;

/// Input collaborator, sampled once per tick per bound key.
///
/// No debouncing happens here; edge detection belongs to the pads.
pub trait KeyInput {
    fn is_down(&self, key: KeyCode) -> bool;
}

impl KeyInput for ButtonInput<KeyCode> {
    fn is_down(&self, key: KeyCode) -> bool {
        self.pressed(key)
    }
}

/// Keys held at one sample of the desktop keyboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys(HashSet<KeyCode>);

impl FromIterator<KeyCode> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = KeyCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl KeyInput for HeldKeys {
    fn is_down(&self, key: KeyCode) -> bool {
        self.0.contains(&key)
    }
}

/// Keyboard state of the whole desktop, not just the overlay window.
///
/// The overlay normally sits beside the game, which keeps focus; window
/// events never reach us then. Held as a non-send resource since the
/// platform handle is tied to the main thread on some systems.
pub struct GlobalKeyboard {
    device: DeviceState,
}

impl GlobalKeyboard {
    /// `None` when the platform refuses access (no X display, for one).
    pub fn open() -> Option<Self> {
        open_device().map(|device| Self { device })
    }

    pub fn held_keys(&self) -> HeldKeys {
        self.device
            .get_keys()
            .into_iter()
            .filter_map(from_device_keycode)
            .collect()
    }
}

#[cfg(target_os = "linux")]
fn open_device() -> Option<DeviceState> {
    DeviceState::checked_new()
}

#[cfg(not(target_os = "linux"))]
fn open_device() -> Option<DeviceState> {
    Some(DeviceState::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_input_reports_held_keys() {
        let mut input = ButtonInput::<KeyCode>::default();
        input.press(KeyCode::KeyX);

        assert!(input.is_down(KeyCode::KeyX));
        assert!(!input.is_down(KeyCode::KeyZ));

        input.clear();
        assert!(input.is_down(KeyCode::KeyX), "clear only drops the just_* sets");

        input.release(KeyCode::KeyX);
        assert!(!input.is_down(KeyCode::KeyX));
    }

    #[test]
    fn held_keys_report_membership() {
        let held: HeldKeys = [KeyCode::Period, KeyCode::Slash].into_iter().collect();

        assert!(held.is_down(KeyCode::Period));
        assert!(held.is_down(KeyCode::Slash));
        assert!(!held.is_down(KeyCode::KeyX));
        assert!(!HeldKeys::default().is_down(KeyCode::Period));
    }
}
