//! The state dump of the [`Machine`](super::Machine), used when reporting a
//! halted machine.

use super::Machine;
use std::fmt::{self, Write};

/// Registers printed per line
const REGISTERS_PER_LINE: usize = 8;
/// Registers per visual group inside of a line
const GROUP_SIZE: usize = 4;

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regs = &self.registers;
        writeln!(
            f,
            "PC: {:#06X}   I: {:#06X}   SP: {}   State: {:?}",
            regs.pc,
            regs.index,
            regs.stack_depth(),
            self.state
        )?;

        for (line, chunk) in regs.v.chunks(REGISTERS_PER_LINE).enumerate() {
            f.write_str(if line == 0 { "V: " } else { "   " })?;
            let mut text = String::new();
            for (i, value) in chunk.iter().enumerate() {
                if i > 0 && i % GROUP_SIZE == 0 {
                    text.push_str("  ");
                }
                write!(text, "{:02X} ", value)?;
            }
            writeln!(f, "{}", text.trim_end())?;
        }

        write!(
            f,
            "DT: {:02X}   ST: {:02X}",
            self.timers.delay.get_value(),
            self.timers.sound.get_value()
        )
    }
}
