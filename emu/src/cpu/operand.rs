//! # Operands
//!
//! Operands are written either as a register (`R0`..`R11`) or as an immediate
//! (`#123`, `#0x7B`, the `#` being optional). Memory operands wrap a register in
//! brackets: `[R1]`.

use std::fmt::Display;

use crate::error::{CpuError, Result};

/// A parsed operand. Only negative register indices are rejected here, the
/// upper bound is checked when the register file is accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(usize),
    Immediate(u32),
}

impl Operand {
    pub fn parse(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Ok(Self::Immediate(0));
        }

        if token.starts_with('R') {
            return parse_register(token).map(Self::Register);
        }

        parse_immediate(token.strip_prefix('#').unwrap_or(token)).map(Self::Immediate)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register(reg) => write!(f, "R{reg}"),
            Self::Immediate(value) => write!(f, "#0x{value:X}"),
        }
    }
}

/// Parses `Rn` into `n`. Non-numeric indices are invalid arguments, negative
/// ones are out of range.
pub fn parse_register(token: &str) -> Result<usize> {
    let index = token
        .strip_prefix('R')
        .ok_or_else(|| CpuError::invalid_argument(format!("Expected a register, found '{token}'")))?
        .parse::<i64>()
        .map_err(|_| CpuError::invalid_argument(format!("Invalid register '{token}'")))?;

    usize::try_from(index).map_err(|_| CpuError::OutOfRange("Invalid register"))
}

/// Parses `[Rn]` into `n`.
pub fn parse_memory_operand(token: &str) -> Result<usize> {
    let inner = token
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| {
            CpuError::invalid_argument(format!("Expected a memory operand, found '{token}'"))
        })?;

    parse_register(inner)
}

fn parse_immediate(text: &str) -> Result<u32> {
    let invalid = || CpuError::invalid_argument(format!("Invalid immediate '{text}'"));

    if let Some(hex) = text.strip_prefix("0x") {
        return u32::from_str_radix(hex, 16).map_err(|_| invalid());
    }

    // Negative decimals wrap around to their two's complement.
    if let Some(magnitude) = text.strip_prefix('-') {
        return magnitude
            .parse::<u32>()
            .map(u32::wrapping_neg)
            .map_err(|_| invalid());
    }

    text.parse::<u32>().map_err(|_| invalid())
}
