//! Pointer input and the per-tick input queue
//!
//! Hosts that receive input between frames push it here; the game drains the
//! queue at the start of each update, before physics runs.

use glam::Vec2;

/// Input events the game understands (world coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Shot button went down
    PointerDown { pos: Vec2 },
    /// Shot button came up
    PointerUp { pos: Vec2 },
    /// Rack the balls again
    Restart,
}

/// FIFO of pending input events
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events in arrival order, leaving the queue empty
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
