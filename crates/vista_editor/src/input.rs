//! Pointer and keyboard input.
//!
//! The editor never polls the OS itself. A host implements `InputSource`
//! and the context samples it once per tick; edges (press/release) come
//! from comparing against the previous sample.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the editor reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Shift,
    Ctrl,
    Alt,
    Escape,
    Delete,
    /// Letter or digit, upper case
    Char(char),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Anything that can report pointer and key state
pub trait InputSource {
    /// Pointer position in viewport pixels, origin top-left
    fn pointer_position(&self) -> [f32; 2];

    fn is_button_down(&self, button: MouseButton) -> bool;

    fn is_key_down(&self, key: Key) -> bool;

    fn modifiers(&self) -> Modifiers {
        Modifiers {
            shift: self.is_key_down(Key::Shift),
            ctrl: self.is_key_down(Key::Ctrl),
            alt: self.is_key_down(Key::Alt),
        }
    }
}

/// Plain-data input sample, usable as a recorded or scripted source
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub pointer: [f32; 2],
    pub buttons: Vec<MouseButton>,
    pub keys: Vec<Key>,
}

impl InputSnapshot {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pointer: [x, y],
            ..Default::default()
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        if !self.buttons.contains(&button) {
            self.buttons.push(button);
        }
        self
    }

    pub fn with_key(mut self, key: Key) -> Self {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
        self
    }
}

impl InputSource for InputSnapshot {
    fn pointer_position(&self) -> [f32; 2] {
        self.pointer
    }

    fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}

/// State sampled at the start of a tick
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct InputFrame {
    pub pointer: [f32; 2],
    pub left: bool,
    pub modifiers: Modifiers,
    /// Watched keys that were down
    pub keys: Vec<Key>,
}

impl InputFrame {
    pub fn sample<I: InputSource + ?Sized>(source: &I, watched: &[Key]) -> Self {
        Self {
            pointer: source.pointer_position(),
            left: source.is_button_down(MouseButton::Left),
            modifiers: source.modifiers(),
            keys: watched.iter().copied().filter(|k| source.is_key_down(*k)).collect(),
        }
    }

    pub fn left_pressed(&self, previous: &Self) -> bool {
        self.left && !previous.left
    }

    pub fn left_released(&self, previous: &Self) -> bool {
        !self.left && previous.left
    }

    pub fn key_pressed(&self, previous: &Self, key: Key) -> bool {
        self.keys.contains(&key) && !previous.keys.contains(&key)
    }
}
