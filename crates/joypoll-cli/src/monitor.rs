use std::fmt::Write as _;

use joypoll::{Backend, Gamepad, GamepadStatus};

/// Renders the labelled buttons as `NAME: value | ...`.
pub(crate) fn render_buttons<B: Backend>(gamepad: &Gamepad<B>, names: &[String]) -> String {
    let mut line = String::new();
    for (index, name) in names.iter().enumerate() {
        let _ = write!(line, "{name}: {} | ", gamepad.button(index));
    }
    line
}

/// Whether every button of `chord` is held. An empty chord never matches.
pub(crate) fn chord_held<B: Backend>(gamepad: &Gamepad<B>, chord: &[usize]) -> bool {
    !chord.is_empty() && chord.iter().all(|&index| gamepad.button(index) != 0)
}

/// Remembers the last reported status so only transitions are logged.
#[derive(Debug)]
pub(crate) struct StatusTracker {
    last: Option<GamepadStatus>,
}

impl StatusTracker {
    pub(crate) fn new() -> Self {
        Self { last: None }
    }

    /// Returns the new status if it differs from the previous one.
    pub(crate) fn update(&mut self, status: GamepadStatus) -> Option<GamepadStatus> {
        if self.last == Some(status) {
            return None;
        }
        self.last = Some(status);
        Some(status)
    }
}
