//! Opcode abstractions, decoding and constants.
use std::convert::TryFrom;

use crate::OpcodeError;

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the upper twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the upper eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the upper four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the lower four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the lower eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the lower twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble in bits
const NIBBLE: u16 = 4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// Field extractors working on the nibbles of an opcode `OXYN`.
pub trait OpcodeFields {
    /// The operation, the highest nibble.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.op(), 0x1);
    /// ```
    fn op(&self) -> u8;

    /// The first register index, the second nibble.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize;

    /// The second register index, the third nibble.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.y(), 0xD);
    /// ```
    fn y(&self) -> usize;

    /// The lowest nibble.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.n(), 0xA);
    /// ```
    fn n(&self) -> u8;

    /// The lower byte.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.nn(), 0xDA);
    /// ```
    fn nn(&self) -> u8;

    /// The lower twelve bits, used as an address.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.nnn(), 0xEDA);
    /// ```
    fn nnn(&self) -> u16;
}

impl OpcodeFields for Opcode {
    fn op(&self) -> u8 {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE)) as u8
    }

    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE)) as usize
    }

    fn y(&self) -> usize {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        ((self & MASK) >> NIBBLE) as usize
    }

    fn n(&self) -> u8 {
        (self & OPCODE_MASK_000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & OPCODE_MASK_00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & OPCODE_MASK_0FFF
    }
}

/// Every instruction of the base instruction set with its decoded operands.
///
/// `x` and `y` name registers, `nn` is an immediate byte, `nnn` an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` - clears the screen
    Clear,
    /// `00EE` - returns from a subroutine
    Return,
    /// `1NNN` - jumps to `NNN`
    Jump { nnn: u16 },
    /// `2NNN` - calls the subroutine at `NNN`
    Call { nnn: u16 },
    /// `3XNN` - skips the next instruction if `VX == NN`
    SkipEqualImmediate { x: usize, nn: u8 },
    /// `4XNN` - skips the next instruction if `VX != NN`
    SkipNotEqualImmediate { x: usize, nn: u8 },
    /// `5XY0` - skips the next instruction if `VX == VY`
    SkipEqualRegister { x: usize, y: usize },
    /// `6XNN` - `VX = NN`
    SetImmediate { x: usize, nn: u8 },
    /// `7XNN` - `VX += NN`, the carry flag is untouched
    AddImmediate { x: usize, nn: u8 },
    /// `8XY0` - `VX = VY`
    Assign { x: usize, y: usize },
    /// `8XY1` - `VX |= VY`
    Or { x: usize, y: usize },
    /// `8XY2` - `VX &= VY`
    And { x: usize, y: usize },
    /// `8XY3` - `VX ^= VY`
    Xor { x: usize, y: usize },
    /// `8XY4` - `VX += VY`, `VF` is the carry
    Add { x: usize, y: usize },
    /// `8XY5` - `VX -= VY`, `VF` is set when there is no borrow
    Sub { x: usize, y: usize },
    /// `8XY6` - `VX >>= 1`, `VF` is the shifted out bit
    ShiftRight { x: usize },
    /// `8XY7` - `VX = VY - VX`, `VF` is set when there is no borrow
    SubReversed { x: usize, y: usize },
    /// `8XYE` - `VX <<= 1`, `VF` is the shifted out bit
    ShiftLeft { x: usize },
    /// `9XY0` - skips the next instruction if `VX != VY`
    SkipNotEqualRegister { x: usize, y: usize },
    /// `ANNN` - `I = NNN`
    SetIndex { nnn: u16 },
    /// `BNNN` - jumps to `V0 + NNN`
    JumpOffset { nnn: u16 },
    /// `CXNN` - `VX = rand() & NN`
    Random { x: usize, nn: u8 },
    /// `DXYN` - draws the `N` bytes tall sprite at `I` to `(VX, VY)`
    Draw { x: usize, y: usize, n: u8 },
    /// `EX9E` - skips the next instruction if the key `VX` is pressed
    SkipKeyPressed { x: usize },
    /// `EXA1` - skips the next instruction if the key `VX` is not pressed
    SkipKeyNotPressed { x: usize },
    /// `FX07` - `VX = delay timer`
    GetDelayTimer { x: usize },
    /// `FX0A` - waits for a key press and stores it into `VX`
    AwaitKeyPress { x: usize },
    /// `FX15` - `delay timer = VX`
    SetDelayTimer { x: usize },
    /// `FX18` - `sound timer = VX`
    SetSoundTimer { x: usize },
    /// `FX1E` - `I += VX`, `VF` is untouched
    AddIndex { x: usize },
    /// `FX29` - `I` = location of the font glyph for `VX`
    FontGlyph { x: usize },
    /// `FX33` - stores the binary coded decimal of `VX` at `I..=I+2`
    StoreBcd { x: usize },
    /// `FX55` - stores `V0..=VX` at `I`
    StoreRegisters { x: usize },
    /// `FX65` - loads `V0..=VX` from `I`
    LoadRegisters { x: usize },
}

impl TryFrom<Opcode> for Instruction {
    type Error = OpcodeError;

    /// Decodes an opcode, every combination that is not part of the
    /// instruction set is reported as [`OpcodeError::Unknown`].
    ///
    /// # Example
    /// ```rust
    /// # use std::convert::TryFrom;
    /// # use chip::{opcode::*, OpcodeError};
    /// assert_eq!(Instruction::try_from(0x8124), Ok(Instruction::Add { x: 1, y: 2 }));
    /// assert_eq!(Instruction::try_from(0x8128), Err(OpcodeError::Unknown(0x8128)));
    /// ```
    fn try_from(opcode: Opcode) -> Result<Self, Self::Error> {
        use Instruction::*;

        let (x, y, n, nn, nnn) = (opcode.x(), opcode.y(), opcode.n(), opcode.nn(), opcode.nnn());

        let instruction = match (opcode.op(), n) {
            (0x0, _) => match opcode {
                0x00E0 => Clear,
                0x00EE => Return,
                _ => return Err(OpcodeError::Unknown(opcode)),
            },
            (0x1, _) => Jump { nnn },
            (0x2, _) => Call { nnn },
            (0x3, _) => SkipEqualImmediate { x, nn },
            (0x4, _) => SkipNotEqualImmediate { x, nn },
            (0x5, 0x0) => SkipEqualRegister { x, y },
            (0x6, _) => SetImmediate { x, nn },
            (0x7, _) => AddImmediate { x, nn },
            (0x8, 0x0) => Assign { x, y },
            (0x8, 0x1) => Or { x, y },
            (0x8, 0x2) => And { x, y },
            (0x8, 0x3) => Xor { x, y },
            (0x8, 0x4) => Add { x, y },
            (0x8, 0x5) => Sub { x, y },
            (0x8, 0x6) => ShiftRight { x },
            (0x8, 0x7) => SubReversed { x, y },
            (0x8, 0xE) => ShiftLeft { x },
            (0x9, 0x0) => SkipNotEqualRegister { x, y },
            (0xA, _) => SetIndex { nnn },
            (0xB, _) => JumpOffset { nnn },
            (0xC, _) => Random { x, nn },
            (0xD, _) => Draw { x, y, n },
            (0xE, _) => match nn {
                0x9E => SkipKeyPressed { x },
                0xA1 => SkipKeyNotPressed { x },
                _ => return Err(OpcodeError::Unknown(opcode)),
            },
            (0xF, _) => match nn {
                0x07 => GetDelayTimer { x },
                0x0A => AwaitKeyPress { x },
                0x15 => SetDelayTimer { x },
                0x18 => SetSoundTimer { x },
                0x1E => AddIndex { x },
                0x29 => FontGlyph { x },
                0x33 => StoreBcd { x },
                0x55 => StoreRegisters { x },
                0x65 => LoadRegisters { x },
                _ => return Err(OpcodeError::Unknown(opcode)),
            },
            _ => return Err(OpcodeError::Unknown(opcode)),
        };

        Ok(instruction)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents how the program counter moves after an instruction was executed.
///
/// The counter already points at the following instruction when the
/// instruction runs.
pub enum ProgramCounterStep {
    /// Will continue with the following instruction
    Next,
    /// Will skip over the following instruction
    Skip,
    /// Will simply move the program counter to the given location.
    Jump(u16),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents a command from the interpreter up to the front end.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The interpreter is suspended until the next key press.
    Wait,
    /// The framebuffer was changed and should be redrawn.
    Draw,
}

#[cfg(test)]
mod tests {
    use std::convert::TryInto;

    use super::*;

    #[test]
    fn test_fields() {
        let opcode: Opcode = 0xD3A7;
        assert_eq!(opcode.op(), 0xD);
        assert_eq!(opcode.x(), 0x3);
        assert_eq!(opcode.y(), 0xA);
        assert_eq!(opcode.n(), 0x7);
        assert_eq!(opcode.nn(), 0xA7);
        assert_eq!(opcode.nnn(), 0x3A7);
    }

    #[test]
    fn test_tryfrom_opcode_simple() {
        let value: Opcode = 0x00E0;
        let conv = value.try_into();
        assert_eq!(conv, Ok(Instruction::Clear));
    }

    #[test]
    fn test_tryfrom_opcode_simple_fail() {
        let value: Opcode = 0x00E1;
        let conv: Result<Instruction, _> = value.try_into();
        assert_eq!(conv, Err(OpcodeError::Unknown(value)));
    }

    #[test]
    fn test_tryfrom_opcode_multiple() {
        use Instruction::*;

        let tests = [
            (0x00E0, Ok(Clear)),
            (0x00EE, Ok(Return)),
            (0x00E1, Err(())),
            (0x0123, Err(())),
            (0x1919, Ok(Jump { nnn: 0x919 })),
            (0x2222, Ok(Call { nnn: 0x222 })),
            (0x3123, Ok(SkipEqualImmediate { x: 0x1, nn: 0x23 })),
            (0x4123, Ok(SkipNotEqualImmediate { x: 0x1, nn: 0x23 })),
            (0x5120, Ok(SkipEqualRegister { x: 0x1, y: 0x2 })),
            (0x5121, Err(())),
            (0x6123, Ok(SetImmediate { x: 0x1, nn: 0x23 })),
            (0x7123, Ok(AddImmediate { x: 0x1, nn: 0x23 })),
            (0x8120, Ok(Assign { x: 0x1, y: 0x2 })),
            (0x8121, Ok(Or { x: 0x1, y: 0x2 })),
            (0x8122, Ok(And { x: 0x1, y: 0x2 })),
            (0x8123, Ok(Xor { x: 0x1, y: 0x2 })),
            (0x8124, Ok(Add { x: 0x1, y: 0x2 })),
            (0x8125, Ok(Sub { x: 0x1, y: 0x2 })),
            (0x8126, Ok(ShiftRight { x: 0x1 })),
            (0x8127, Ok(SubReversed { x: 0x1, y: 0x2 })),
            (0x812E, Ok(ShiftLeft { x: 0x1 })),
            (0x8128, Err(())),
            (0x812F, Err(())),
            (0x9120, Ok(SkipNotEqualRegister { x: 0x1, y: 0x2 })),
            (0x9121, Err(())),
            (0xA222, Ok(SetIndex { nnn: 0x222 })),
            (0xB222, Ok(JumpOffset { nnn: 0x222 })),
            (0xC123, Ok(Random { x: 0x1, nn: 0x23 })),
            (0xD123, Ok(Draw { x: 0x1, y: 0x2, n: 0x3 })),
            (0xE19E, Ok(SkipKeyPressed { x: 0x1 })),
            (0xE1A1, Ok(SkipKeyNotPressed { x: 0x1 })),
            (0xE111, Err(())),
            (0xF007, Ok(GetDelayTimer { x: 0x0 })),
            (0xF00A, Ok(AwaitKeyPress { x: 0x0 })),
            (0xF015, Ok(SetDelayTimer { x: 0x0 })),
            (0xF018, Ok(SetSoundTimer { x: 0x0 })),
            (0xF01E, Ok(AddIndex { x: 0x0 })),
            (0xF029, Ok(FontGlyph { x: 0x0 })),
            (0xF033, Ok(StoreBcd { x: 0x0 })),
            (0xF055, Ok(StoreRegisters { x: 0x0 })),
            (0xF065, Ok(LoadRegisters { x: 0x0 })),
            (0xF0AA, Err(())),
        ];
        for (value, res) in tests {
            let conv: Result<Instruction, _> = value.try_into();
            assert_eq!(conv, res.map_err(|_| OpcodeError::Unknown(value)));
        }
    }
}
