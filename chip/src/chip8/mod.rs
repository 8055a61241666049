//! The full implementation of the chip8 interpreter, from the fetch and decode
//! loop to the opcodes and a state dump.
mod machine;
mod opcodes;
mod print;

/// reexport machine structs and data for simpler usage
pub use machine::*;
