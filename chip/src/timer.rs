/// Represents a timer inside of the chip infrastruture, it will count down to
/// zero from what ever number given, once per tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    /// Counts down by one, never below zero.
    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// The delay and the sound timer, both count down at 60 hertz
/// independent of the instructions executed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub delay: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub sound: Timer,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrements both timers by one.
    pub fn tick(&mut self) {
        self.delay.tick();
        self.sound.tick();
    }

    /// If the buzzer should currently sound.
    pub fn is_sound_active(&self) -> bool {
        self.sound.get_value() > 0
    }
}
