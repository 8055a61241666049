//! The flat ram of the interpreter.
//!
//! - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
//! - `0x050-0x0A0` - Used for the built in `4x5` pixel font set (`0-F`)
//! - `0x200-0xFFF` - Program ROM and work RAM
use crate::{
    definitions::{display::fontset, memory},
    opcode::Opcode,
    MemoryError,
};

/// Byte addressable memory, every access is bounds checked.
#[derive(Clone)]
pub struct Memory {
    data: Box<[u8; memory::SIZE]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Zeroed memory with the font set in the reserved area.
    pub fn new() -> Self {
        let mut data = Box::new([0; memory::SIZE]);
        data[fontset::LOCATION..(fontset::LOCATION + fontset::FONTSET.len())]
            .copy_from_slice(&fontset::FONTSET);
        Self { data }
    }

    /// Copies the bytes into memory starting at `origin`.
    pub fn load(&mut self, bytes: &[u8], origin: usize) -> Result<(), MemoryError> {
        self.slice_mut(origin, bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    pub fn read8(&self, address: usize) -> Result<u8, MemoryError> {
        self.data
            .get(address)
            .copied()
            .ok_or(MemoryError::OutOfBounds { address, len: 1 })
    }

    pub fn write8(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let cell = self
            .data
            .get_mut(address)
            .ok_or(MemoryError::OutOfBounds { address, len: 1 })?;
        *cell = value;
        Ok(())
    }

    /// Reads a big endian word, so `address` and `address + 1` make up the opcode.
    ///
    /// # Example
    /// ```rust
    /// # use chip::memory::Memory;
    /// let mut memory = Memory::new();
    /// memory.load(&[0x1E, 0xDA], 0x300).unwrap();
    /// assert_eq!(memory.read16(0x300), Ok(0x1EDA));
    /// assert!(memory.read16(0xFFF).is_err());
    /// ```
    pub fn read16(&self, address: usize) -> Result<Opcode, MemoryError> {
        let bytes = self.slice(address, 2)?;
        Ok(Opcode::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// A view of `len` bytes starting at `address`.
    ///
    /// Instructions access memory through this and [`Memory::slice_mut`], the
    /// whole range has to lie inside the memory or nothing is accessed.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], MemoryError> {
        let end = Self::end(address, len)?;
        Ok(&self.data[address..end])
    }

    /// A mutable view of `len` bytes starting at `address`, see [`Memory::slice`].
    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8], MemoryError> {
        let end = Self::end(address, len)?;
        Ok(&mut self.data[address..end])
    }

    /// The whole memory, for inspection.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }

    fn end(address: usize, len: usize) -> Result<usize, MemoryError> {
        match address.checked_add(len) {
            Some(end) if end <= memory::SIZE => Ok(end),
            _ => Err(MemoryError::OutOfBounds { address, len }),
        }
    }
}
