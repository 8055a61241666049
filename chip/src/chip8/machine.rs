use std::convert::TryFrom;

use rand::RngCore;

use crate::{
    definitions::{cpu, keyboard, memory},
    devices::Keyboard,
    display::Display,
    memory::Memory,
    opcode::{Instruction, Opcode, Operation, ProgramCounterStep},
    registers::Registers,
    resources::Rom,
    timer::Timers,
    ExecutionError, KeyError, LoadError, MemoryError, ProcessError,
};

/// The execution state of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Ready to execute the next instruction
    Ready,
    /// Suspended by `FX0A` until a key goes from released to pressed,
    /// the key is then stored into `VX`.
    WaitingForKey { x: usize },
    /// A fatal error occured, no further instruction will be executed.
    Halted,
}

/// The Machine struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct Machine {
    /// name of the loaded rom
    pub(super) name: String,
    pub(super) memory: Memory,
    pub(super) registers: Registers,
    /// Both count down at 60 hertz, until they reach 0.
    pub(super) timers: Timers,
    pub(super) display: Display,
    pub(super) keyboard: Keyboard,
    /// The source of `CXNN` random numbers, stored in the machine
    /// so it can be replaced by a mock in tests.
    pub(super) rng: Box<dyn RngCore + Send>,
    pub(super) state: State,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// will create a new machine with zeroed state and the font loaded
    pub fn new() -> Self {
        Self::with_rng(Box::new(rand::rngs::OsRng))
    }

    /// will create a new machine that draws its random numbers from `rng`
    pub fn with_rng(rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            name: String::new(),
            memory: Memory::new(),
            registers: Registers::new(),
            timers: Timers::new(),
            display: Display::new(),
            keyboard: Keyboard::new(),
            rng,
            state: State::Ready,
        }
    }

    /// Copies the bytes into memory starting at `origin`.
    pub fn load(&mut self, bytes: &[u8], origin: usize) -> Result<(), MemoryError> {
        self.memory.load(bytes, origin)
    }

    /// Copies the rom into the program area.
    pub fn load_rom(&mut self, rom: &Rom) -> Result<(), LoadError> {
        self.load(rom.get_data(), memory::PROGRAM_START)?;
        self.name = rom.get_name().to_string();
        log::debug!("loaded rom '{}' ({} bytes)", self.name, rom.get_data().len());
        Ok(())
    }

    /// will advance the program by a single step
    ///
    /// While suspended on a key press nothing is fetched, instead the latched
    /// key press is consumed if there is one.
    pub fn step(&mut self) -> Result<Operation, ExecutionError> {
        let pc = self.registers.pc as usize;

        match self.state {
            State::Ready => {}
            State::WaitingForKey { x } => {
                return Ok(match self.keyboard.take_press() {
                    Some(key) => {
                        log::debug!("resuming with key {:#X} in V{:X}", key, x);
                        self.registers.v[x] = key as u8;
                        self.state = State::Ready;
                        Operation::None
                    }
                    None => Operation::Wait,
                });
            }
            State::Halted => {
                return Err(ExecutionError {
                    pc,
                    opcode: None,
                    source: ProcessError::Halted,
                })
            }
        }

        let opcode = match self.memory.read16(pc) {
            Ok(opcode) => opcode,
            Err(err) => return Err(self.halt(pc, None, err.into())),
        };
        log::trace!("{:#06X}: {:#06X}", pc, opcode);

        let instruction = match Instruction::try_from(opcode) {
            Ok(instruction) => instruction,
            Err(err) => return Err(self.halt(pc, Some(opcode), err.into())),
        };

        self.registers.pc = self.registers.pc.wrapping_add(cpu::INSTRUCTION_SIZE);

        match self.execute(instruction) {
            Ok((step, operation)) => {
                self.advance(step);
                Ok(operation)
            }
            Err(err) => Err(self.halt(pc, Some(opcode), err)),
        }
    }

    /// Counts both timers down by one, has to be called at 60 hertz.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    /// Will set the value of the given key
    pub fn set_key(&mut self, key: usize, to: bool) -> Result<(), KeyError> {
        self.keyboard.set_key(key, to)
    }

    /// Will write keyboard data into interncal keyboard representation.
    pub fn set_keyboard(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.keyboard.set_mult(keys);
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &[bool] {
        self.keyboard.get_keys()
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.timers.sound.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.timers.delay.get_value()
    }

    pub fn is_sound_active(&self) -> bool {
        self.timers.is_sound_active()
    }

    /// Will return the current display configuration
    pub fn get_display(&self) -> &Display {
        &self.display
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, State::WaitingForKey { .. })
    }

    /// name of the loaded rom
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Will move the program counter according to the step.
    pub(super) fn advance(&mut self, step: ProgramCounterStep) {
        match step {
            ProgramCounterStep::Next => {}
            ProgramCounterStep::Skip => {
                self.registers.pc = self.registers.pc.wrapping_add(cpu::INSTRUCTION_SIZE)
            }
            ProgramCounterStep::Jump(pointer) => self.registers.pc = pointer,
        }
    }

    /// Stops the machine, the program counter is left at the failing instruction.
    fn halt(&mut self, pc: usize, opcode: Option<Opcode>, source: ProcessError) -> ExecutionError {
        self.state = State::Halted;
        self.registers.pc = pc as u16;
        log::debug!("halted at {:#06X}: {}", pc, source);
        ExecutionError { pc, opcode, source }
    }
}
