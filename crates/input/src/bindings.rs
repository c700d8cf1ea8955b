use crate::action::{Action, Key};

/// The two fixed keyboard layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Qwerty,
    Colemak,
}

/// Mapping from logical movement actions to physical keys.
///
/// The whole table is swapped atomically on `toggle_layout`; the projection
/// keys (P/O) and Escape are layout-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    layout: Layout,
    forward: Key,
    backward: Key,
    left: Key,
    right: Key,
    up: Key,
    down: Key,
    layout_toggle: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::qwerty()
    }
}

impl KeyBindings {
    pub fn qwerty() -> Self {
        Self {
            layout: Layout::Qwerty,
            forward: Key::W,
            backward: Key::S,
            left: Key::A,
            right: Key::D,
            up: Key::Q,
            down: Key::E,
            layout_toggle: Key::C,
        }
    }

    pub fn colemak() -> Self {
        Self {
            layout: Layout::Colemak,
            forward: Key::F,
            backward: Key::S,
            left: Key::R,
            right: Key::T,
            up: Key::Space,
            down: Key::A,
            layout_toggle: Key::Q,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Swap the binding table wholesale between the two layouts.
    pub fn toggle_layout(&mut self) {
        *self = match self.layout {
            Layout::Qwerty => Self::colemak(),
            Layout::Colemak => Self::qwerty(),
        };
        tracing::debug!(layout = ?self.layout, "keyboard layout switched");
    }

    /// Resolve a physical key to its logical action under the current layout.
    pub fn resolve(&self, key: Key) -> Option<Action> {
        // Layout-independent keys take precedence.
        match key {
            Key::Escape => return Some(Action::Quit),
            Key::P => return Some(Action::SetPerspective),
            Key::O => return Some(Action::SetOrthographic),
            _ => {}
        }

        if key == self.forward {
            Some(Action::MoveForward)
        } else if key == self.backward {
            Some(Action::MoveBackward)
        } else if key == self.left {
            Some(Action::MoveLeft)
        } else if key == self.right {
            Some(Action::MoveRight)
        } else if key == self.up {
            Some(Action::MoveUp)
        } else if key == self.down {
            Some(Action::MoveDown)
        } else if key == self.layout_toggle {
            Some(Action::ToggleLayout)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qwerty_table() {
        let b = KeyBindings::qwerty();
        assert_eq!(b.resolve(Key::W), Some(Action::MoveForward));
        assert_eq!(b.resolve(Key::S), Some(Action::MoveBackward));
        assert_eq!(b.resolve(Key::A), Some(Action::MoveLeft));
        assert_eq!(b.resolve(Key::D), Some(Action::MoveRight));
        assert_eq!(b.resolve(Key::Q), Some(Action::MoveUp));
        assert_eq!(b.resolve(Key::E), Some(Action::MoveDown));
        assert_eq!(b.resolve(Key::C), Some(Action::ToggleLayout));
    }

    #[test]
    fn colemak_table() {
        let b = KeyBindings::colemak();
        assert_eq!(b.resolve(Key::F), Some(Action::MoveForward));
        assert_eq!(b.resolve(Key::S), Some(Action::MoveBackward));
        assert_eq!(b.resolve(Key::R), Some(Action::MoveLeft));
        assert_eq!(b.resolve(Key::T), Some(Action::MoveRight));
        assert_eq!(b.resolve(Key::Space), Some(Action::MoveUp));
        assert_eq!(b.resolve(Key::A), Some(Action::MoveDown));
        assert_eq!(b.resolve(Key::Q), Some(Action::ToggleLayout));
    }

    #[test]
    fn projection_and_quit_keys_are_layout_independent() {
        for b in [KeyBindings::qwerty(), KeyBindings::colemak()] {
            assert_eq!(b.resolve(Key::P), Some(Action::SetPerspective));
            assert_eq!(b.resolve(Key::O), Some(Action::SetOrthographic));
            assert_eq!(b.resolve(Key::Escape), Some(Action::Quit));
        }
    }

    #[test]
    fn toggle_twice_round_trips() {
        let original = KeyBindings::default();
        let mut b = original;
        b.toggle_layout();
        assert_eq!(b.layout(), Layout::Colemak);
        assert_ne!(b, original);
        b.toggle_layout();
        assert_eq!(b, original);
    }

    #[test]
    fn unbound_key_is_noop() {
        let b = KeyBindings::qwerty();
        assert_eq!(b.resolve(Key::F), None);
        assert_eq!(b.resolve(Key::T), None);
    }
}
