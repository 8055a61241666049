//! Maps the host keyboard onto the hex keypad.
use std::time::{Duration, Instant};

use chip::{definitions::keyboard, devices::KeyboardCommands};
use hashbrown::HashMap;

/// The left hand side of a qwerty keyboard, laid out like the hex keypad.
const HOST_LAYOUT: [[char; 4]; 4] = [
    ['1', '2', '3', '4'],
    ['q', 'w', 'e', 'r'],
    ['a', 's', 'd', 'f'],
    ['z', 'x', 'c', 'v'],
];

/// Terminals only report presses, a key counts as held for this long after
/// its last press or auto repeat.
const HOLD: Duration = Duration::from_millis(150);

pub(crate) struct KeyboardAdapter {
    layout: HashMap<char, usize>,
    /// when each key was pressed the last time
    pressed_at: [Option<Instant>; keyboard::SIZE],
}

impl KeyboardAdapter {
    pub fn new() -> Self {
        let mut layout = HashMap::with_capacity(keyboard::SIZE);
        for (host_row, row) in HOST_LAYOUT.iter().zip(keyboard::LAYOUT.iter()) {
            for (&host, &key) in host_row.iter().zip(row.iter()) {
                layout.insert(host, key);
            }
        }

        Self {
            layout,
            pressed_at: [None; keyboard::SIZE],
        }
    }

    /// The keypad key behind the host character.
    pub fn map_key(&self, c: char) -> Option<usize> {
        self.layout.get(&c.to_ascii_lowercase()).copied()
    }

    /// Will register a press, returns false if the character is not mapped.
    pub fn press(&mut self, c: char, now: Instant) -> bool {
        match self.map_key(c) {
            Some(key) => {
                log::trace!("host key '{}' pressed keypad {:X}", c, key);
                self.pressed_at[key] = Some(now);
                true
            }
            None => false,
        }
    }

    fn state(&self, now: Instant) -> [bool; keyboard::SIZE] {
        let mut keys = [false; keyboard::SIZE];
        for (key, pressed_at) in keys.iter_mut().zip(self.pressed_at.iter()) {
            *key = matches!(pressed_at, Some(at) if now.saturating_duration_since(*at) < HOLD);
        }
        keys
    }
}

impl KeyboardCommands for KeyboardAdapter {
    fn get_keyboard(&mut self) -> [bool; keyboard::SIZE] {
        self.state(Instant::now())
    }
}
