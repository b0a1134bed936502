use std::fmt::Display;

use crate::bitwise::Bits;
use crate::cpu::flags::ShiftKind;
use crate::error::{CpuError, Result};

/// Largest accepted shift amount.
pub const MAX_SHIFT_AMOUNT: u32 = 31;

/// Three-operand data processing operations: `OP Rd, Rn, Op2`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AluInstruction {
    Add,
    Sub,
    And,
    Orr,
    Eor,
}

impl Display for AluInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => f.write_str("ADD"),
            Self::Sub => f.write_str("SUB"),
            Self::And => f.write_str("AND"),
            Self::Orr => f.write_str("ORR"),
            Self::Eor => f.write_str("EOR"),
        }
    }
}

impl AluInstruction {
    /// Computes `rn OP op2` along with the flags it would set.
    ///
    /// Only SUB follows the subtraction rule, every other operation
    /// (logical ones included) reports flags with the addition rule.
    #[must_use]
    pub fn apply(self, rn: u32, op2: u32) -> ArithmeticOpResult {
        match self {
            Self::Add => ArithmeticOpResult::addition(rn, op2, rn.wrapping_add(op2)),
            Self::Sub => ArithmeticOpResult::subtraction(rn, op2, rn.wrapping_sub(op2)),
            Self::And => ArithmeticOpResult::addition(rn, op2, rn & op2),
            Self::Orr => ArithmeticOpResult::addition(rn, op2, rn | op2),
            Self::Eor => ArithmeticOpResult::addition(rn, op2, rn ^ op2),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticOpResult {
    pub result: u32,
    pub carry: bool,
    pub overflow: bool,
    pub sign: bool,
    pub zero: bool,
}

impl ArithmeticOpResult {
    #[must_use]
    pub fn addition(first_op: u32, second_op: u32, result: u32) -> Self {
        Self {
            result,
            // unsigned wraparound makes the sum smaller than the first operand
            carry: result < first_op,
            // operands with the same sign and a result with the opposite one
            overflow: (!(first_op ^ second_op) & (first_op ^ result)).get_bit(31),
            sign: result.get_bit(31),
            zero: result == 0,
        }
    }

    #[must_use]
    pub fn subtraction(first_op: u32, second_op: u32, result: u32) -> Self {
        Self {
            result,
            // carry set means no borrow
            carry: first_op >= second_op,
            overflow: ((first_op ^ second_op) & (first_op ^ result)).get_bit(31),
            sign: result.get_bit(31),
            zero: result == 0,
        }
    }
}

/// Shifts `rm` by `shift_amount`, which has to be in `0..=31`.
///
/// Flags are derived with the addition rule against a zero second operand.
pub fn shift(kind: ShiftKind, shift_amount: u32, rm: u32) -> Result<ArithmeticOpResult> {
    if shift_amount > MAX_SHIFT_AMOUNT {
        return Err(CpuError::invalid_argument("Shift amount must be 0-31"));
    }

    let result = match kind {
        ShiftKind::Lsl => rm << shift_amount,
        ShiftKind::Lsr => rm >> shift_amount,
        ShiftKind::Asr => ((rm as i32) >> shift_amount) as u32,
        ShiftKind::Ror => rm.rotate_right(shift_amount),
    };

    Ok(ArithmeticOpResult::addition(rm, 0, result))
}
