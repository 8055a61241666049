use tinyvec::ArrayVec;

use crate::{definitions::cpu, StackError};

/// The register file of the cpu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub v: [u8; cpu::register::SIZE],
    /// The index register `I`
    pub index: u16,
    /// The program counter, holds the address of the next instruction to be fetched.
    pub pc: u16,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; here we are using `16`.
    stack: ArrayVec<[u16; cpu::stack::SIZE]>,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            v: [0; cpu::register::SIZE],
            index: 0,
            pc: cpu::PROGRAM_COUNTER as u16,
            stack: ArrayVec::new(),
        }
    }
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag register `VF`.
    pub fn set_flag(&mut self, flag: bool) {
        self.v[cpu::register::LAST] = flag as u8;
    }

    pub fn flag(&self) -> u8 {
        self.v[cpu::register::LAST]
    }

    /// Will push the return address to the stack.
    pub fn push_stack(&mut self, pointer: u16) -> Result<(), StackError> {
        self.stack
            .try_push(pointer)
            .map_or(Ok(()), |_| Err(StackError::Overflow))
    }

    /// Will pop the last return address from the stack.
    pub fn pop_stack(&mut self) -> Result<u16, StackError> {
        self.stack.pop().ok_or(StackError::Underflow)
    }

    /// The amount of return addresses on the stack, the stack pointer.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack
    }
}
