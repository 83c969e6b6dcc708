use std::collections::{HashMap, HashSet};

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information, the pointer position and active touches.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,

    /// Last known position of each finger on the surface, by touch id.
    pub touches: HashMap<u64, (f32, f32)>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                    self.touches.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        self.keys_down.remove(key);
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }

            InputEvent::Touch(t) => {
                if t.phase.is_active() {
                    self.touches.insert(t.id, (t.x, t.y));
                } else {
                    self.touches.remove(&t.id);
                }
                frame.touches.push(*t);
            }
        }

        frame.push_event(ev);
    }

    /// Helper queries
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{TouchEvent, TouchPhase};

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    fn touch(id: u64, phase: TouchPhase) -> InputEvent {
        InputEvent::Touch(TouchEvent {
            id,
            phase,
            x: 1.0,
            y: 2.0,
            force: None,
        })
    }

    #[test]
    fn held_key_reports_one_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::R, KeyState::Pressed));
        frame.clear();
        state.apply_event(&mut frame, key(Key::R, KeyState::Pressed));
        assert!(!frame.key_pressed(Key::R));
        assert!(state.key_down(Key::R));
    }

    #[test]
    fn button_held_until_released() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let left = |transition: MouseButtonState| {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: transition,
                x: 3.0,
                y: 4.0,
                modifiers: Modifiers::default(),
            })
        };
        state.apply_event(&mut frame, left(MouseButtonState::Pressed));
        assert!(state.button_down(MouseButton::Left));
        state.apply_event(&mut frame, left(MouseButtonState::Released));
        assert!(!state.button_down(MouseButton::Left));
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn touches_tracked_until_ended() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, touch(1, TouchPhase::Started));
        state.apply_event(&mut frame, touch(2, TouchPhase::Started));
        state.apply_event(&mut frame, touch(1, TouchPhase::Ended));
        assert_eq!(state.active_touches(), 1);
        assert_eq!(frame.touches.len(), 3);
        state.apply_event(&mut frame, touch(2, TouchPhase::Cancelled));
        assert_eq!(state.active_touches(), 0);
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Pressed));
        state.apply_event(&mut frame, touch(7, TouchPhase::Moved));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
        assert_eq!(state.active_touches(), 0);
    }
}
