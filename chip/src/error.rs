use thiserror::Error;

use crate::opcode::Opcode;

/// Any error that stops the interpreter from executing the current instruction.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessError {
    #[error("Invalid opcode state '{0}'.")]
    Opcode(#[from] OpcodeError),
    #[error("Invalid memory access '{0}'.")]
    Memory(#[from] MemoryError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("The machine was halted by an earlier error.")]
    Halted,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X}.")]
    Unknown(Opcode),
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MemoryError {
    #[error("Address {address:#06X} with length {len} is outside of the memory.")]
    OutOfBounds { address: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Overflow,
    #[error("Stack is empty!")]
    Underflow,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum KeyError {
    #[error("There is no key with the index {0}.")]
    Invalid(usize),
}

/// A fatal error together with the location it happened at.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
#[error("Execution failed at {pc:#06X}{}: {source}", describe_opcode(.opcode))]
pub struct ExecutionError {
    /// The program counter the failing instruction was fetched from
    pub pc: usize,
    /// The failing opcode, `None` if it could not be fetched
    pub opcode: Option<Opcode>,
    #[source]
    pub source: ProcessError,
}

/// Errors while ingesting a rom image.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unable to read the rom '{0}'.")]
    Io(#[from] std::io::Error),
    #[error("Unable to extract the rom from the archive '{0}'.")]
    Archive(#[from] zip::result::ZipError),
    #[error("The rom '{0}' does not contain any data.")]
    Empty(String),
    #[error("The rom '{name}' has {len} bytes, but only {max} fit into memory.")]
    TooLarge { name: String, len: usize, max: usize },
    #[error("Unable to place the rom into memory '{0}'.")]
    Memory(#[from] MemoryError),
}

fn describe_opcode(opcode: &Option<Opcode>) -> String {
    match opcode {
        Some(opcode) => format!(" (opcode {:#06X})", opcode),
        None => String::new(),
    }
}
