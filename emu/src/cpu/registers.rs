//! # Register File
//!
//! Twelve general purpose registers, `R0`..`R11`. There is no stack pointer,
//! link register or register-mapped program counter: the program counter is an
//! instruction index kept by the [`Processor`](super::processor::Processor).

use serde::{Deserialize, Serialize};

use crate::error::{CpuError, Result};

/// Number of general purpose registers.
pub const REGISTER_COUNT: usize = 12;

/// The twelve general purpose registers visible to the CPU.
///
/// Every access goes through [`register_at`](Self::register_at) or
/// [`set_register_at`](Self::set_register_at), which reject indices outside
/// `0..REGISTER_COUNT`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers([u32; REGISTER_COUNT]);

impl Registers {
    pub fn register_at(&self, reg: usize) -> Result<u32> {
        self.0
            .get(reg)
            .copied()
            .ok_or(CpuError::OutOfRange("Invalid register"))
    }

    pub fn set_register_at(&mut self, reg: usize, new_value: u32) -> Result<()> {
        let slot = self
            .0
            .get_mut(reg)
            .ok_or(CpuError::OutOfRange("Invalid register"))?;
        *slot = new_value;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}
