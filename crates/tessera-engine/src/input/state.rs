use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyAction, MouseButton, MouseButtonState};

/// Observer invoked synchronously on every key event.
pub type KeyCallback = Box<dyn FnMut(Key, KeyAction)>;

/// Current input state for the engine window.
///
/// Holds "is down" sets for keys and mouse buttons plus the last reported
/// cursor position. Identifiers absent from a set read as not pressed, so
/// nothing has to be pre-registered.
///
/// Mutated only through [`apply_event`](Self::apply_event), which the runtime
/// calls while dispatching window events; application code gets read-only
/// queries. Both happen on the one engine thread (see module docs).
#[derive(Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
    cursor_pos: (f64, f64),
    key_callback: Option<KeyCallback>,
}

impl InputState {
    /// Applies a translated platform event to the current state.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Key { key, action } => {
                match action {
                    // Repeat behaves like a press; the insert is a no-op when
                    // the key is already down.
                    KeyAction::Pressed | KeyAction::Repeat => {
                        self.keys_down.insert(key);
                    }
                    KeyAction::Released => {
                        self.keys_down.remove(&key);
                    }
                }

                if let Some(cb) = self.key_callback.as_mut() {
                    cb(key, action);
                }
            }

            InputEvent::MouseButton { button, state } => match state {
                MouseButtonState::Pressed => {
                    self.buttons_down.insert(button);
                }
                MouseButtonState::Released => {
                    self.buttons_down.remove(&button);
                }
            },

            InputEvent::CursorMoved { x, y } => {
                self.cursor_pos = (x, y);
            }
        }
    }

    /// Whether `key` is currently held. Keys never seen in an event are not
    /// pressed.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether `button` is currently held.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Last reported cursor position in window coordinates; `(0, 0)` until
    /// the first cursor event arrives.
    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor_pos
    }

    /// Registers the key observer, replacing any previous one.
    pub fn set_key_callback<F>(&mut self, callback: F)
    where
        F: FnMut(Key, KeyAction) + 'static,
    {
        self.key_callback = Some(Box::new(callback));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn key(key: Key, action: KeyAction) -> InputEvent {
        InputEvent::Key { key, action }
    }

    // ── pressed-state tracking ───────────────────────────────────────────

    #[test]
    fn unseen_identifiers_are_not_pressed() {
        let state = InputState::default();
        assert!(!state.is_key_pressed(Key::W));
        assert!(!state.is_key_pressed(Key::Unknown));
        assert!(!state.is_mouse_pressed(MouseButton::Left));
        assert!(!state.is_mouse_pressed(MouseButton::Other(31)));
    }

    #[test]
    fn key_flips_exactly_on_press_and_release() {
        let mut state = InputState::default();

        state.apply_event(key(Key::A, KeyAction::Pressed));
        assert!(state.is_key_pressed(Key::A));
        assert!(!state.is_key_pressed(Key::B));

        state.apply_event(key(Key::A, KeyAction::Released));
        assert!(!state.is_key_pressed(Key::A));
    }

    #[test]
    fn repeat_does_not_change_pressed_state() {
        let mut state = InputState::default();

        state.apply_event(key(Key::Space, KeyAction::Pressed));
        state.apply_event(key(Key::Space, KeyAction::Repeat));
        assert!(state.is_key_pressed(Key::Space));

        state.apply_event(key(Key::Space, KeyAction::Released));
        state.apply_event(key(Key::Space, KeyAction::Repeat));
        assert!(state.is_key_pressed(Key::Space));
        state.apply_event(key(Key::Space, KeyAction::Released));
        assert!(!state.is_key_pressed(Key::Space));
    }

    #[test]
    fn mouse_buttons_track_press_and_release() {
        let mut state = InputState::default();

        state.apply_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
        });
        assert!(state.is_mouse_pressed(MouseButton::Right));
        assert!(!state.is_mouse_pressed(MouseButton::Left));

        state.apply_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            state: MouseButtonState::Released,
        });
        assert!(!state.is_mouse_pressed(MouseButton::Right));
    }

    // ── cursor ───────────────────────────────────────────────────────────

    #[test]
    fn cursor_defaults_to_origin_and_is_overwritten() {
        let mut state = InputState::default();
        assert_eq!(state.cursor_position(), (0.0, 0.0));

        state.apply_event(InputEvent::CursorMoved { x: 12.5, y: 8.0 });
        assert_eq!(state.cursor_position(), (12.5, 8.0));

        state.apply_event(InputEvent::CursorMoved { x: -3.0, y: 900.0 });
        assert_eq!(state.cursor_position(), (-3.0, 900.0));
    }

    // ── key observer ─────────────────────────────────────────────────────

    #[test]
    fn observer_sees_every_key_event_including_repeats() {
        let seen: Rc<RefCell<Vec<(Key, KeyAction)>>> = Rc::default();
        let log = seen.clone();

        let mut state = InputState::default();
        state.set_key_callback(move |k, a| log.borrow_mut().push((k, a)));

        state.apply_event(key(Key::E, KeyAction::Pressed));
        state.apply_event(key(Key::E, KeyAction::Repeat));
        state.apply_event(key(Key::E, KeyAction::Released));

        assert_eq!(
            *seen.borrow(),
            vec![
                (Key::E, KeyAction::Pressed),
                (Key::E, KeyAction::Repeat),
                (Key::E, KeyAction::Released),
            ]
        );
    }

    #[test]
    fn observer_ignores_mouse_and_cursor_events() {
        let count = Rc::new(RefCell::new(0));
        let n = count.clone();

        let mut state = InputState::default();
        state.set_key_callback(move |_, _| *n.borrow_mut() += 1);

        state.apply_event(InputEvent::CursorMoved { x: 1.0, y: 1.0 });
        state.apply_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
        });
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn registering_a_new_observer_replaces_the_old() {
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));

        let mut state = InputState::default();
        let n = first.clone();
        state.set_key_callback(move |_, _| *n.borrow_mut() += 1);
        let n = second.clone();
        state.set_key_callback(move |_, _| *n.borrow_mut() += 1);

        state.apply_event(key(Key::Q, KeyAction::Pressed));
        assert_eq!(*first.borrow(), 0);
        assert_eq!(*second.borrow(), 1);
    }
}
