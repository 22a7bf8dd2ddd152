//! Keyboard input as a queue of logical events
//!
//! Platforms translate their key events into `KeyEvent`s and feed them to
//! `TickInput::handle_key`; the next `tick` drains the queue.

use super::state::Side;

/// Logical keys the demos care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Letter or symbol key, lowercase
    Char(char),
    Up,
    Down,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn new(key: Key, action: KeyAction) -> Self {
        Self { key, action }
    }

    pub fn press(key: Key) -> Self {
        Self::new(key, KeyAction::Press)
    }

    pub fn release(key: Key) -> Self {
        Self::new(key, KeyAction::Release)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What a key event means to the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A direction key changed state
    Paddle {
        side: Side,
        direction: Direction,
        held: bool,
    },
    /// Escape pressed: reset the match or quit
    Escape,
}

/// Per-paddle key bindings
struct Binding {
    up: &'static [Key],
    down: &'static [Key],
}

const KEYMAP: [Binding; 2] = [
    Binding {
        up: &[Key::Char('z'), Key::Char('w')],
        down: &[Key::Char('s')],
    },
    Binding {
        up: &[Key::Char('k'), Key::Up],
        down: &[Key::Char('j'), Key::Down],
    },
];

/// Queued input for the next tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a key event into queued match events
    pub fn handle_key(&mut self, key: Key, action: KeyAction) {
        let key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };

        if key == Key::Escape {
            if action == KeyAction::Press {
                self.events.push(InputEvent::Escape);
            }
            return;
        }

        // Repeats carry no new state
        if action == KeyAction::Repeat {
            return;
        }
        let held = action == KeyAction::Press;

        for side in Side::ALL {
            let binding = &KEYMAP[side.index()];
            if binding.up.contains(&key) {
                self.events.push(InputEvent::Paddle {
                    side,
                    direction: Direction::Up,
                    held,
                });
            }
            if binding.down.contains(&key) {
                self.events.push(InputEvent::Paddle {
                    side,
                    direction: Direction::Down,
                    held,
                });
            }
        }
    }

    /// Convenience for platform events
    pub fn push(&mut self, event: KeyEvent) {
        self.handle_key(event.key, event.action);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Take all queued events, oldest first
    pub fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.events.drain(..)
    }
}
