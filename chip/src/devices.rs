use crate::{definitions::keyboard, display::Row, KeyError};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will display all from the pixels, row by row
    fn display(&mut self, pixels: &[Row]);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// The current state of every key of the hex keypad.
    fn get_keyboard(&mut self) -> [bool; keyboard::SIZE];
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for the buzzer
pub trait SoundCommands {
    /// Called whenever the buzzer has to start or stop.
    fn set_sound(&mut self, active: bool);
}

/// Will store the state of all keys and latch the first pending press
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
    /// The first key that went from released to pressed since the latch was
    /// last taken or cleared
    pressed: Option<usize>,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    /// Will set the state of the given key, a change from released to
    /// pressed is latched until it is taken. Later presses do not replace
    /// a pending one.
    pub fn set_key(&mut self, key: usize, to: bool) -> Result<(), KeyError> {
        let state = self.keys.get_mut(key).ok_or(KeyError::Invalid(key))?;

        if !*state && to {
            self.pressed.get_or_insert(key);
        }
        *state = to;

        Ok(())
    }

    /// Will apply the state of all keys at once. If several keys go down
    /// in the same update the lowest one is latched.
    pub fn set_mult(&mut self, keys: &[bool; keyboard::SIZE]) {
        for (key, &to) in keys.iter().enumerate() {
            if !self.keys[key] && to {
                self.pressed.get_or_insert(key);
            }
        }
        self.keys = *keys;
    }

    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    /// Takes the latched key press, if there was one.
    pub fn take_press(&mut self) -> Option<usize> {
        self.pressed.take()
    }

    /// Forgets the latched key press.
    pub fn clear_press(&mut self) {
        self.pressed = None;
    }
}
