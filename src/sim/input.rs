//! Held directional keys

use serde::{Deserialize, Serialize};

/// Directional keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
}

impl Key {
    /// Map a host key name (DOM `key` or `code`) to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "Left" | "a" | "A" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "Right" | "d" | "D" | "KeyD" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Currently held keys (last write wins)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn set_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
        }
    }

    /// -1 for left only, +1 for right only, 0 for both or neither
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Key::from_code("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_code("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_code("KeyA"), Some(Key::Left));
        assert_eq!(Key::from_code("d"), Some(Key::Right));
        assert_eq!(Key::from_code("ArrowUp"), None);
        assert_eq!(Key::from_code(" "), None);
    }

    #[test]
    fn test_direction() {
        let mut input = InputState::default();
        assert_eq!(input.direction(), 0.0);

        input.set_key(Key::Left, true);
        assert_eq!(input.direction(), -1.0);

        input.set_key(Key::Right, true);
        assert_eq!(input.direction(), 0.0);

        input.set_key(Key::Left, false);
        assert_eq!(input.direction(), 1.0);
    }

    #[test]
    fn test_set_key_is_idempotent() {
        let mut input = InputState::default();
        input.set_key(Key::Right, true);
        input.set_key(Key::Right, true);
        assert!(input.right);
        input.set_key(Key::Right, false);
        assert!(!input.right);
    }

    #[test]
    fn test_clear() {
        let mut input = InputState {
            left: true,
            right: true,
        };
        input.clear();
        assert_eq!(input, InputState::default());
    }
}
