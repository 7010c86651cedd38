//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_pressed};

const VIEWER_KEYS: [KeyCode; 15] = [
    KeyCode::Space,
    KeyCode::Right,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::A,
    KeyCode::L,
    KeyCode::Period,
    KeyCode::Equal,
    KeyCode::Minus,
    KeyCode::Z,
    KeyCode::X,
    KeyCode::Apostrophe,
    KeyCode::Slash,
    KeyCode::R,
    KeyCode::Escape,
];

pub fn capture_keys_pressed() -> Vec<KeyCode> {
    VIEWER_KEYS.into_iter().filter(|&key| is_key_pressed(key)).collect()
}
