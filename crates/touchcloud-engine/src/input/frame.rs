use std::collections::HashSet;

use super::types::{InputEvent, Key, TouchEvent};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys/buttons, pointer and
/// touch positions). `InputFrame` provides events, fresh key presses and
/// touch updates for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame. Repeats are not included.
    pub keys_pressed: HashSet<Key>,

    /// Touch updates this frame, in arrival order.
    pub touches: Vec<TouchEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.touches.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
