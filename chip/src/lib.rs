pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod display;
pub mod memory;
pub mod opcode;
pub mod registers;
pub mod resources;
pub mod runner;
pub mod timer;
mod error;

// reexporting for convinience
pub use error::*;
