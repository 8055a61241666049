//! Couples the [`Machine`] to wall-clock time and to the outside world.
//!
//! The [`Clock`] turns elapsed time into an ordered list of instruction steps
//! and 60 hertz timer ticks, the [`Runner`] plays them on the machine and
//! talks to the display, keyboard and sound collaborators.
use std::time::Duration;

use crate::{
    chip8::Machine,
    definitions::{cpu, timer},
    devices::{DisplayCommands, KeyboardCommands, SoundCommands},
    opcode::Operation,
    ExecutionError,
};

/// The highest rate in hertz a [`Clock`] schedules, faster rates are capped.
pub const MAX_RATE: u32 = 1_000_000;

/// The pacing of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How many instructions are executed each second
    pub instructions_per_second: u32,
    /// How often per second the delay and sound timers count down
    pub timer_hz: u32,
    /// Elapsed time beyond this is dropped instead of replayed
    pub max_catch_up: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instructions_per_second: cpu::HERTZ,
            timer_hz: timer::HERTZ,
            max_catch_up: Duration::from_millis(250),
        }
    }
}

/// Something that is due according to the [`Clock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// execute a single instruction
    Step,
    /// count the timers down
    Tick,
}

/// Keeps two independent schedules, one for the instructions and one for the timers.
#[derive(Debug, Clone)]
pub struct Clock {
    step_period: Duration,
    tick_period: Duration,
    max_catch_up: Duration,
    now: Duration,
    next_step: Duration,
    next_tick: Duration,
}

impl Clock {
    pub fn new(config: &Config) -> Self {
        let step_period = period(config.instructions_per_second);
        let tick_period = period(config.timer_hz);
        Self {
            step_period,
            tick_period,
            max_catch_up: config.max_catch_up,
            now: Duration::ZERO,
            next_step: step_period,
            next_tick: tick_period,
        }
    }

    /// Moves the clock forward and returns everything that became due, in order.
    /// On a tie the timer tick comes first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Event> {
        let elapsed = if elapsed > self.max_catch_up {
            log::warn!(
                "dropping {:?} of backlog, the host fell behind",
                elapsed - self.max_catch_up
            );
            self.max_catch_up
        } else {
            elapsed
        };
        self.now += elapsed;

        let mut events = Vec::new();
        loop {
            if self.next_tick <= self.now && self.next_tick <= self.next_step {
                events.push(Event::Tick);
                self.next_tick += self.tick_period;
            } else if self.next_step <= self.now {
                events.push(Event::Step);
                self.next_step += self.step_period;
            } else {
                break;
            }
        }
        events
    }
}

fn period(hertz: u32) -> Duration {
    Duration::from_secs(1) / hertz.clamp(1, MAX_RATE)
}

/// Drives a [`Machine`] with the given collaborators.
pub struct Runner<D, K, S>
where
    D: DisplayCommands,
    K: KeyboardCommands,
    S: SoundCommands,
{
    machine: Machine,
    display: D,
    keyboard: K,
    sound: S,
    clock: Clock,
    /// the framebuffer changed since the last redraw
    dirty: bool,
    /// what the sound collaborator was last told
    sound_active: bool,
}

impl<D, K, S> Runner<D, K, S>
where
    D: DisplayCommands,
    K: KeyboardCommands,
    S: SoundCommands,
{
    pub fn new(machine: Machine, display: D, keyboard: K, sound: S, config: &Config) -> Self {
        Self {
            machine,
            display,
            keyboard,
            sound,
            clock: Clock::new(config),
            dirty: false,
            sound_active: false,
        }
    }

    /// Plays everything that became due during `elapsed`.
    ///
    /// The keyboard is read once up front, the display is redrawn at most
    /// once per timer tick and only if an instruction changed the
    /// framebuffer. The first fatal error is returned and the machine stays
    /// halted from there on.
    pub fn advance(&mut self, elapsed: Duration) -> Result<(), ExecutionError> {
        let keys = self.keyboard.get_keyboard();
        self.machine.set_keyboard(&keys);

        for event in self.clock.advance(elapsed) {
            match event {
                Event::Step => {
                    if let Operation::Draw = self.machine.step()? {
                        self.dirty = true;
                    }
                }
                Event::Tick => {
                    self.machine.tick_timers();
                    self.refresh();
                }
            }
        }

        Ok(())
    }

    fn refresh(&mut self) {
        if self.dirty {
            self.display.display(self.machine.get_display().rows());
            self.dirty = false;
        }

        let active = self.machine.is_sound_active();
        if active != self.sound_active {
            log::debug!("sound {}", if active { "on" } else { "off" });
            self.sound.set_sound(active);
            self.sound_active = active;
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }
}
