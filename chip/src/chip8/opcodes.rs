use crate::{
    definitions::display::fontset,
    opcode::{Instruction, Operation, ProgramCounterStep},
    ProcessError,
};

use super::{Machine, State};

type Outcome = Result<(ProgramCounterStep, Operation), ProcessError>;

impl Machine {
    /// Runs a single decoded instruction. The program counter already points
    /// to the following instruction.
    pub(super) fn execute(&mut self, instruction: Instruction) -> Outcome {
        use Instruction::*;
        use ProgramCounterStep::Next;

        let v = &mut self.registers.v;

        let step = match instruction {
            Clear => {
                // 00E0
                self.display.clear();
                return Ok((Next, Operation::Draw));
            }
            Return => {
                // 00EE
                let pc = self.registers.pop_stack()?;
                log::debug!("return to {:#06X}", pc);
                ProgramCounterStep::Jump(pc)
            }
            Jump { nnn } => ProgramCounterStep::Jump(nnn),
            Call { nnn } => {
                // 2NNN
                // the return address is the instruction after the call
                self.registers.push_stack(self.registers.pc)?;
                log::debug!("call {:#06X}, depth {}", nnn, self.registers.stack_depth());
                ProgramCounterStep::Jump(nnn)
            }
            SkipEqualImmediate { x, nn } => ProgramCounterStep::cond(v[x] == nn),
            SkipNotEqualImmediate { x, nn } => ProgramCounterStep::cond(v[x] != nn),
            SkipEqualRegister { x, y } => ProgramCounterStep::cond(v[x] == v[y]),
            SetImmediate { x, nn } => {
                v[x] = nn;
                Next
            }
            AddImmediate { x, nn } => {
                // 7XNN
                // let VX overflow, but ignore carry
                v[x] = v[x].wrapping_add(nn);
                Next
            }
            Assign { x, y } => {
                v[x] = v[y];
                Next
            }
            Or { x, y } => {
                v[x] |= v[y];
                Next
            }
            And { x, y } => {
                v[x] &= v[y];
                Next
            }
            Xor { x, y } => {
                v[x] ^= v[y];
                Next
            }
            Add { x, y } => {
                // 8XY4
                let res = v[x] as u16 + v[y] as u16;
                v[x] = res as u8;
                self.registers.set_flag(res > u8::MAX as u16);
                Next
            }
            Sub { x, y } => {
                // 8XY5
                // VF is the inverted borrow
                let (left, right) = (v[x], v[y]);
                v[x] = left.wrapping_sub(right);
                self.registers.set_flag(left >= right);
                Next
            }
            ShiftRight { x } => {
                // 8XY6
                let value = v[x];
                v[x] = value >> 1;
                self.registers.set_flag(value & 0x01 == 0x01);
                Next
            }
            SubReversed { x, y } => {
                // 8XY7
                let (left, right) = (v[y], v[x]);
                v[x] = left.wrapping_sub(right);
                self.registers.set_flag(left >= right);
                Next
            }
            ShiftLeft { x } => {
                // 8XYE
                let value = v[x];
                v[x] = value << 1;
                self.registers.set_flag(value & 0x80 == 0x80);
                Next
            }
            SkipNotEqualRegister { x, y } => ProgramCounterStep::cond(v[x] != v[y]),
            SetIndex { nnn } => {
                self.registers.index = nnn;
                Next
            }
            JumpOffset { nnn } => ProgramCounterStep::Jump(nnn + v[0] as u16),
            Random { x, nn } => {
                // CXNN
                // using a fill bytes call here, as the trait RngCore does not
                // support random u8.
                let mut rand: [u8; 1] = [0];
                self.rng.fill_bytes(&mut rand);
                self.registers.v[x] = rand[0] & nn;
                Next
            }
            Draw { x, y, n } => return self.draw(x, y, n),
            SkipKeyPressed { x } => ProgramCounterStep::cond(self.keyboard.is_pressed(key(v[x]))),
            SkipKeyNotPressed { x } => {
                ProgramCounterStep::cond(!self.keyboard.is_pressed(key(v[x])))
            }
            GetDelayTimer { x } => {
                v[x] = self.timers.delay.get_value();
                Next
            }
            AwaitKeyPress { x } => {
                // FX0A
                // only presses after this point count
                self.keyboard.clear_press();
                self.state = State::WaitingForKey { x };
                log::debug!("waiting for a key press into V{:X}", x);
                return Ok((Next, Operation::Wait));
            }
            SetDelayTimer { x } => {
                self.timers.delay.set_value(v[x]);
                Next
            }
            SetSoundTimer { x } => {
                self.timers.sound.set_value(v[x]);
                Next
            }
            AddIndex { x } => {
                // FX1E
                // VF is not affected.
                self.registers.index = self.registers.index.wrapping_add(v[x] as u16);
                Next
            }
            FontGlyph { x } => {
                // FX29
                let digit = (v[x] & 0x0F) as usize;
                self.registers.index = (fontset::LOCATION + fontset::GLYPH_SIZE * digit) as u16;
                Next
            }
            StoreBcd { x } => {
                // FX33
                let r = v[x];
                let digits = self.memory.slice_mut(self.registers.index as usize, 3)?;
                digits[0] = r / 100; // 246u8 / 100 => 2
                digits[1] = r / 10 % 10; // 246u8 / 10 => 24 % 10 => 4
                digits[2] = r % 10; // 246u8 % 10 => 6
                Next
            }
            StoreRegisters { x } => {
                // FX55
                // I itself is left unmodified.
                self.memory
                    .slice_mut(self.registers.index as usize, x + 1)?
                    .copy_from_slice(&v[..=x]);
                Next
            }
            LoadRegisters { x } => {
                // FX65
                // I itself is left unmodified.
                let data = self.memory.slice(self.registers.index as usize, x + 1)?;
                v[..=x].copy_from_slice(data);
                Next
            }
        };

        Ok((step, Operation::None))
    }

    /// DXYN
    /// Draws a sprite at coordinate (VX, VY) that has a width of 8 pixels and a height of N
    /// pixels. Each row of 8 pixels is read as bit-coded starting from memory location I; I
    /// value doesn’t change after the execution of this instruction. VF is set to 1 if any
    /// screen pixels are flipped from set to unset when the sprite is drawn, and to 0 if that
    /// doesn’t happen.
    fn draw(&mut self, x: usize, y: usize, n: u8) -> Outcome {
        let coorx = self.registers.v[x] as usize;
        let coory = self.registers.v[y] as usize;

        let rows = self
            .memory
            .slice(self.registers.index as usize, n as usize)?;
        let collision = self.display.blit(coorx, coory, rows);
        self.registers.set_flag(collision);

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }
}

/// The keypad only knows 16 keys, so only the low nibble selects one.
#[inline]
fn key(value: u8) -> usize {
    (value & 0x0F) as usize
}
