use std::collections::HashSet;

/// Physical keys the application distinguishes.
///
/// Deliberately decoupled from any windowing library; the binary maps its
/// event-loop key codes onto this enum once, at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    C,
    D,
    E,
    F,
    O,
    P,
    Q,
    R,
    S,
    T,
    W,
    Space,
    Escape,
}

/// A high-level action produced by resolving a key through the bindings.
///
/// Move actions are continuous (active while the key is held); the rest are
/// discrete and fire on the press edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Swap between the two fixed keyboard layouts.
    ToggleLayout,
    /// Switch to perspective navigation and re-home the camera.
    SetPerspective,
    /// Switch to orthographic orbit and re-home the camera.
    SetOrthographic,
    /// Exit the application.
    Quit,
}

impl Action {
    /// Whether this action is meaningful as a held (per-frame) input.
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            Action::MoveForward
                | Action::MoveBackward
                | Action::MoveLeft
                | Action::MoveRight
                | Action::MoveUp
                | Action::MoveDown
        )
    }
}

/// The set of logical actions currently held.
///
/// Rebuilt each frame from the held physical keys so the camera update is a
/// pure function of `(dt, InputState)`.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, action: Action, held: bool) {
        if held {
            self.held.insert(action);
        } else {
            self.held.remove(&action);
        }
    }

    pub fn holds(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_actions() {
        assert!(Action::MoveForward.is_continuous());
        assert!(Action::MoveDown.is_continuous());
        assert!(!Action::ToggleLayout.is_continuous());
        assert!(!Action::Quit.is_continuous());
    }

    #[test]
    fn input_state_set_and_release() {
        let mut state = InputState::new();
        assert!(!state.holds(Action::MoveLeft));

        state.set(Action::MoveLeft, true);
        assert!(state.holds(Action::MoveLeft));

        state.set(Action::MoveLeft, false);
        assert!(!state.holds(Action::MoveLeft));
    }

    #[test]
    fn input_state_clear() {
        let mut state = InputState::new();
        state.set(Action::MoveForward, true);
        state.set(Action::MoveUp, true);
        state.clear();
        assert!(!state.holds(Action::MoveForward));
        assert!(!state.holds(Action::MoveUp));
    }
}
