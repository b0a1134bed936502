//! # Data Memory
//!
//! Five words mapped at a fixed byte-addressed window:
//!
//! ```text
//! Address   Index
//! 0x100  →  0
//! 0x104  →  1
//! 0x108  →  2
//! 0x10C  →  3
//! 0x110  →  4
//! ```
//!
//! Accesses must be word aligned and fall inside the window.

use serde::{Deserialize, Serialize};

use crate::error::{CpuError, Result};

/// Number of words in data memory.
pub const MEMORY_WORDS: usize = 5;

/// First mapped byte address.
pub const MEMORY_BASE: u32 = 0x100;

/// Last word-aligned address that can be accessed.
pub const MEMORY_END: u32 = 0x110;

const WORD_SIZE: u32 = 4;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory([u32; MEMORY_WORDS]);

impl Memory {
    /// Translates a byte address into a word index.
    pub fn index_of(address: u32) -> Result<usize> {
        if !(MEMORY_BASE..=MEMORY_END).contains(&address) || address % WORD_SIZE != 0 {
            return Err(CpuError::OutOfRange("Invalid memory address"));
        }

        let index = ((address - MEMORY_BASE) / WORD_SIZE) as usize;
        if index >= MEMORY_WORDS {
            return Err(CpuError::OutOfRange("Memory index out of bounds"));
        }

        Ok(index)
    }

    pub fn read_word(&self, address: u32) -> Result<u32> {
        Self::index_of(address).map(|index| self.0[index])
    }

    pub fn write_word(&mut self, address: u32, value: u32) -> Result<()> {
        let index = Self::index_of(address)?;
        self.0[index] = value;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn address_to_index() {
        assert_eq!(Memory::index_of(0x100), Ok(0));
        assert_eq!(Memory::index_of(0x104), Ok(1));
        assert_eq!(Memory::index_of(0x110), Ok(4));
    }

    #[test]
    fn address_outside_window() {
        assert_eq!(
            Memory::index_of(0x114),
            Err(CpuError::OutOfRange("Invalid memory address"))
        );
        assert_eq!(
            Memory::index_of(0xFC),
            Err(CpuError::OutOfRange("Invalid memory address"))
        );
    }

    #[test]
    fn misaligned_address() {
        assert_eq!(
            Memory::index_of(0x101),
            Err(CpuError::OutOfRange("Invalid memory address"))
        );
    }

    #[test]
    fn write_then_read() {
        let mut memory = Memory::default();
        memory.write_word(0x108, 0xDEAD_BEEF).unwrap();
        assert_eq!(memory.read_word(0x108), Ok(0xDEAD_BEEF));
        assert_eq!(memory.iter().collect::<Vec<_>>(), vec![0, 0, 0xDEAD_BEEF, 0, 0]);
    }

    #[test]
    fn rejected_write_leaves_memory_untouched() {
        let mut memory = Memory::default();
        assert!(memory.write_word(0x10A, 1).is_err());
        assert_eq!(memory, Memory::default());
    }
}
