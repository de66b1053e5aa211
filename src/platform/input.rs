//! Keyboard normalization
//!
//! Browser key names arrive in whatever case the layout produces; everything
//! is compared lowercase. Held keys become [`TickInput`] intents, one-shot
//! keys become [`Command`]s.

use crate::sim::TickInput;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Shoot,
    Restart,
    Menu,
    Mute,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` (or similar) name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "a" | "arrowleft" | "left" => Some(Key::Left),
            "d" | "arrowright" | "right" => Some(Key::Right),
            " " | "space" | "spacebar" => Some(Key::Shoot),
            "r" => Some(Key::Restart),
            "e" => Some(Key::Menu),
            "m" => Some(Key::Mute),
            _ => None,
        }
    }
}

/// Edge-triggered actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Restart,
    Menu,
    ToggleMute,
}

/// Held-key state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    left: bool,
    right: bool,
    shoot: bool,
}

impl InputState {
    /// Record a key press; returns a command for one-shot keys
    pub fn key_down(&mut self, name: &str) -> Option<Command> {
        match Key::from_name(name)? {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Shoot => self.shoot = true,
            Key::Restart => return Some(Command::Restart),
            Key::Menu => return Some(Command::Menu),
            Key::Mute => return Some(Command::ToggleMute),
        }
        None
    }

    pub fn key_up(&mut self, name: &str) {
        match Key::from_name(name) {
            Some(Key::Left) => self.left = false,
            Some(Key::Right) => self.right = false,
            Some(Key::Shoot) => self.shoot = false,
            _ => {}
        }
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            move_left: self.left,
            move_right: self.right,
            shoot: self.shoot,
        }
    }
}
