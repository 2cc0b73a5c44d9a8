use crate::model::{UiMode, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer input in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    /// 0 is the primary button.
    #[serde(default)]
    pub button: i16,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self { PointerEvent { x, y, ..Default::default() } }
    pub fn with_shift(mut self) -> Self { self.shift = true; self }
    pub fn with_ctrl(mut self) -> Self { self.ctrl = true; self }
    pub fn pos(&self) -> Vec2 { Vec2::new(self.x, self.y) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Delete,
    Escape,
    Backspace,
    Control,
    /// Printable input, a single character or a doubled dead key.
    Text(String),
    Other,
}

const DOUBLED_DEAD_KEYS: [&str; 5] = ["``", "~~", "''", "^^", "\"\""];

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Key {
        match key {
            "Delete" | "Del" => Key::Delete,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Control" => Key::Control,
            k if k.chars().count() == 1 || DOUBLED_DEAD_KEYS.contains(&k) => Key::Text(k.to_string()),
            _ => Key::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self { KeyEvent { key, ctrl: false, shift: false } }
    pub fn text(s: &str) -> Self { KeyEvent::new(Key::Text(s.to_string())) }
    pub fn with_ctrl(mut self) -> Self { self.ctrl = true; self }
}

/// Requests for the host, drained with `Editor::take_effects`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// A rejected edit; shown to the user, nothing changed.
    Alert { message: String },
    /// A history entry was pushed and the text slot rewritten.
    GraphChanged,
    /// Selection changed; property editors need refreshing.
    SelectionChanged,
    /// Mirror of a label typed on the canvas.
    LabelInput { value: String },
    ModeChanged { mode: UiMode },
}
