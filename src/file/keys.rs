use bevy::prelude::KeyCode;
use device_query::Keycode;

// Config files name keys the way SFML's Keyboard::Key does, so existing
// files from other overlays keep working.
const KEY_NAMES: &[(&str, KeyCode)] = &[
    ("A", KeyCode::KeyA),
    ("B", KeyCode::KeyB),
    ("C", KeyCode::KeyC),
    ("D", KeyCode::KeyD),
    ("E", KeyCode::KeyE),
    ("F", KeyCode::KeyF),
    ("G", KeyCode::KeyG),
    ("H", KeyCode::KeyH),
    ("I", KeyCode::KeyI),
    ("J", KeyCode::KeyJ),
    ("K", KeyCode::KeyK),
    ("L", KeyCode::KeyL),
    ("M", KeyCode::KeyM),
    ("N", KeyCode::KeyN),
    ("O", KeyCode::KeyO),
    ("P", KeyCode::KeyP),
    ("Q", KeyCode::KeyQ),
    ("R", KeyCode::KeyR),
    ("S", KeyCode::KeyS),
    ("T", KeyCode::KeyT),
    ("U", KeyCode::KeyU),
    ("V", KeyCode::KeyV),
    ("W", KeyCode::KeyW),
    ("X", KeyCode::KeyX),
    ("Y", KeyCode::KeyY),
    ("Z", KeyCode::KeyZ),
    ("Num0", KeyCode::Digit0),
    ("Num1", KeyCode::Digit1),
    ("Num2", KeyCode::Digit2),
    ("Num3", KeyCode::Digit3),
    ("Num4", KeyCode::Digit4),
    ("Num5", KeyCode::Digit5),
    ("Num6", KeyCode::Digit6),
    ("Num7", KeyCode::Digit7),
    ("Num8", KeyCode::Digit8),
    ("Num9", KeyCode::Digit9),
    ("Escape", KeyCode::Escape),
    ("LControl", KeyCode::ControlLeft),
    ("LShift", KeyCode::ShiftLeft),
    ("LAlt", KeyCode::AltLeft),
    ("LSystem", KeyCode::SuperLeft),
    ("RControl", KeyCode::ControlRight),
    ("RShift", KeyCode::ShiftRight),
    ("RAlt", KeyCode::AltRight),
    ("RSystem", KeyCode::SuperRight),
    ("Menu", KeyCode::ContextMenu),
    ("LBracket", KeyCode::BracketLeft),
    ("RBracket", KeyCode::BracketRight),
    ("Semicolon", KeyCode::Semicolon),
    ("Comma", KeyCode::Comma),
    ("Period", KeyCode::Period),
    ("Quote", KeyCode::Quote),
    ("Slash", KeyCode::Slash),
    ("Backslash", KeyCode::Backslash),
    ("Tilde", KeyCode::Backquote),
    ("Equal", KeyCode::Equal),
    ("Hyphen", KeyCode::Minus),
    ("Space", KeyCode::Space),
    ("Enter", KeyCode::Enter),
    ("Backspace", KeyCode::Backspace),
    ("Tab", KeyCode::Tab),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("End", KeyCode::End),
    ("Home", KeyCode::Home),
    ("Insert", KeyCode::Insert),
    ("Delete", KeyCode::Delete),
    ("Add", KeyCode::NumpadAdd),
    ("Subtract", KeyCode::NumpadSubtract),
    ("Multiply", KeyCode::NumpadMultiply),
    ("Divide", KeyCode::NumpadDivide),
    ("Left", KeyCode::ArrowLeft),
    ("Right", KeyCode::ArrowRight),
    ("Up", KeyCode::ArrowUp),
    ("Down", KeyCode::ArrowDown),
    ("Numpad0", KeyCode::Numpad0),
    ("Numpad1", KeyCode::Numpad1),
    ("Numpad2", KeyCode::Numpad2),
    ("Numpad3", KeyCode::Numpad3),
    ("Numpad4", KeyCode::Numpad4),
    ("Numpad5", KeyCode::Numpad5),
    ("Numpad6", KeyCode::Numpad6),
    ("Numpad7", KeyCode::Numpad7),
    ("Numpad8", KeyCode::Numpad8),
    ("Numpad9", KeyCode::Numpad9),
    ("F1", KeyCode::F1),
    ("F2", KeyCode::F2),
    ("F3", KeyCode::F3),
    ("F4", KeyCode::F4),
    ("F5", KeyCode::F5),
    ("F6", KeyCode::F6),
    ("F7", KeyCode::F7),
    ("F8", KeyCode::F8),
    ("F9", KeyCode::F9),
    ("F10", KeyCode::F10),
    ("F11", KeyCode::F11),
    ("F12", KeyCode::F12),
    ("F13", KeyCode::F13),
    ("F14", KeyCode::F14),
    ("F15", KeyCode::F15),
    ("Pause", KeyCode::Pause),
];

// Older SFML releases spelled a few keys differently.
const LEGACY_ALIASES: &[(&str, KeyCode)] = &[
    ("Return", KeyCode::Enter),
    ("BackSpace", KeyCode::Backspace),
    ("Dash", KeyCode::Minus),
    ("SemiColon", KeyCode::Semicolon),
    ("BackSlash", KeyCode::Backslash),
];

/// Looks up a key by its config name. Names are case-sensitive.
pub fn parse_key_name(name: &str) -> Option<KeyCode> {
    KEY_NAMES
        .iter()
        .chain(LEGACY_ALIASES)
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, key)| *key)
}

/// Canonical config name of a key, if it has one.
pub fn key_name(key: KeyCode) -> Option<&'static str> {
    KEY_NAMES
        .iter()
        .find(|(_, candidate)| *candidate == key)
        .map(|(name, _)| *name)
}

/// Translates a key reported by the desktop keyboard state.
pub fn from_device_keycode(key: Keycode) -> Option<KeyCode> {
    let key = match key {
        Keycode::A => KeyCode::KeyA,
        Keycode::B => KeyCode::KeyB,
        Keycode::C => KeyCode::KeyC,
        Keycode::D => KeyCode::KeyD,
        Keycode::E => KeyCode::KeyE,
        Keycode::F => KeyCode::KeyF,
        Keycode::G => KeyCode::KeyG,
        Keycode::H => KeyCode::KeyH,
        Keycode::I => KeyCode::KeyI,
        Keycode::J => KeyCode::KeyJ,
        Keycode::K => KeyCode::KeyK,
        Keycode::L => KeyCode::KeyL,
        Keycode::M => KeyCode::KeyM,
        Keycode::N => KeyCode::KeyN,
        Keycode::O => KeyCode::KeyO,
        Keycode::P => KeyCode::KeyP,
        Keycode::Q => KeyCode::KeyQ,
        Keycode::R => KeyCode::KeyR,
        Keycode::S => KeyCode::KeyS,
        Keycode::T => KeyCode::KeyT,
        Keycode::U => KeyCode::KeyU,
        Keycode::V => KeyCode::KeyV,
        Keycode::W => KeyCode::KeyW,
        Keycode::X => KeyCode::KeyX,
        Keycode::Y => KeyCode::KeyY,
        Keycode::Z => KeyCode::KeyZ,
        Keycode::Key0 => KeyCode::Digit0,
        Keycode::Key1 => KeyCode::Digit1,
        Keycode::Key2 => KeyCode::Digit2,
        Keycode::Key3 => KeyCode::Digit3,
        Keycode::Key4 => KeyCode::Digit4,
        Keycode::Key5 => KeyCode::Digit5,
        Keycode::Key6 => KeyCode::Digit6,
        Keycode::Key7 => KeyCode::Digit7,
        Keycode::Key8 => KeyCode::Digit8,
        Keycode::Key9 => KeyCode::Digit9,
        Keycode::Escape => KeyCode::Escape,
        Keycode::LControl => KeyCode::ControlLeft,
        Keycode::LShift => KeyCode::ShiftLeft,
        Keycode::LAlt => KeyCode::AltLeft,
        Keycode::RControl => KeyCode::ControlRight,
        Keycode::RShift => KeyCode::ShiftRight,
        Keycode::RAlt => KeyCode::AltRight,
        Keycode::LeftBracket => KeyCode::BracketLeft,
        Keycode::RightBracket => KeyCode::BracketRight,
        Keycode::Semicolon => KeyCode::Semicolon,
        Keycode::Comma => KeyCode::Comma,
        Keycode::Dot => KeyCode::Period,
        Keycode::Apostrophe => KeyCode::Quote,
        Keycode::Slash => KeyCode::Slash,
        Keycode::BackSlash => KeyCode::Backslash,
        Keycode::Grave => KeyCode::Backquote,
        Keycode::Equal => KeyCode::Equal,
        Keycode::Minus => KeyCode::Minus,
        Keycode::Space => KeyCode::Space,
        Keycode::Enter => KeyCode::Enter,
        Keycode::Backspace => KeyCode::Backspace,
        Keycode::Tab => KeyCode::Tab,
        Keycode::PageUp => KeyCode::PageUp,
        Keycode::PageDown => KeyCode::PageDown,
        Keycode::End => KeyCode::End,
        Keycode::Home => KeyCode::Home,
        Keycode::Insert => KeyCode::Insert,
        Keycode::Delete => KeyCode::Delete,
        Keycode::NumpadAdd => KeyCode::NumpadAdd,
        Keycode::NumpadSubtract => KeyCode::NumpadSubtract,
        Keycode::NumpadMultiply => KeyCode::NumpadMultiply,
        Keycode::NumpadDivide => KeyCode::NumpadDivide,
        Keycode::Left => KeyCode::ArrowLeft,
        Keycode::Right => KeyCode::ArrowRight,
        Keycode::Up => KeyCode::ArrowUp,
        Keycode::Down => KeyCode::ArrowDown,
        Keycode::Numpad0 => KeyCode::Numpad0,
        Keycode::Numpad1 => KeyCode::Numpad1,
        Keycode::Numpad2 => KeyCode::Numpad2,
        Keycode::Numpad3 => KeyCode::Numpad3,
        Keycode::Numpad4 => KeyCode::Numpad4,
        Keycode::Numpad5 => KeyCode::Numpad5,
        Keycode::Numpad6 => KeyCode::Numpad6,
        Keycode::Numpad7 => KeyCode::Numpad7,
        Keycode::Numpad8 => KeyCode::Numpad8,
        Keycode::Numpad9 => KeyCode::Numpad9,
        Keycode::F1 => KeyCode::F1,
        Keycode::F2 => KeyCode::F2,
        Keycode::F3 => KeyCode::F3,
        Keycode::F4 => KeyCode::F4,
        Keycode::F5 => KeyCode::F5,
        Keycode::F6 => KeyCode::F6,
        Keycode::F7 => KeyCode::F7,
        Keycode::F8 => KeyCode::F8,
        Keycode::F9 => KeyCode::F9,
        Keycode::F10 => KeyCode::F10,
        Keycode::F11 => KeyCode::F11,
        Keycode::F12 => KeyCode::F12,
        _ => return None,
    };
    Some(key)
}
