//! Keyboard mapping and the pending-input slot

use crate::sim::{Direction, TickInput};

/// A key press after mapping, independent of the event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Steer(Direction),
    TogglePause,
    Restart,
}

impl InputEvent {
    /// Only the pause toggle gets through while the game is paused
    pub fn accepted_while_paused(self) -> bool {
        self == InputEvent::TogglePause
    }
}

/// Map a DOM `KeyboardEvent.key` value to a game input
pub fn map_key(key: &str) -> Option<InputEvent> {
    let event = match key {
        "ArrowUp" | "w" | "W" => InputEvent::Steer(Direction::Up),
        "ArrowDown" | "s" | "S" => InputEvent::Steer(Direction::Down),
        "ArrowLeft" | "a" | "A" => InputEvent::Steer(Direction::Left),
        "ArrowRight" | "d" | "D" => InputEvent::Steer(Direction::Right),
        "p" | "P" => InputEvent::TogglePause,
        "Enter" => InputEvent::Restart,
        _ => return None,
    };
    Some(event)
}

/// Collects key presses between frames. The last direction wins; pause
/// presses toggle, so two presses in one frame cancel out.
#[derive(Debug, Clone, Default)]
pub struct InputSlot {
    pending: TickInput,
}

impl InputSlot {
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::Steer(dir) => self.pending.direction = Some(dir),
            InputEvent::TogglePause => self.pending.pause = !self.pending.pause,
            InputEvent::Restart => self.pending.restart = true,
        }
    }

    /// Hand over everything collected so far and start empty
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }

    pub fn pause_pending(&self) -> bool {
        self.pending.pause
    }
}
