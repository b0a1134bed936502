//! # Program Status Register
//!
//! Only the condition flags are modelled, stored in the top nibble of a word
//! the same way a real CPSR keeps them.
//!
//! ```text
//! 31 30 29 28 27                    0
//! ┌──┬──┬──┬──┬───────────────────────┐
//! │N │Z │C │V │        Unused         │
//! └──┴──┴──┴──┴───────────────────────┘
//! ```
//!
//! See [`condition`](super::condition) for how these flags are tested.

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::alu_instruction::ArithmeticOpResult;
use crate::cpu::condition::Condition;

/// Program Status Register holding the NZCV flags.
///
/// # Example
///
/// ```
/// use emu::cpu::psr::Psr;
///
/// let mut cpsr = Psr::default();
///
/// cpsr.set_zero_flag(true);
/// assert!(cpsr.zero_flag());
/// assert_eq!(cpsr.nzcv(), "0100");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Psr(u32);

impl Psr {
    /// Tells whether an instruction carrying `cond` has to run.
    /// No condition means always.
    #[must_use]
    pub fn can_execute(self, cond: Option<Condition>) -> bool {
        use Condition::{EQ, GE, GT, LE, LT, NE};
        let Some(cond) = cond else {
            return true;
        };

        match cond {
            EQ => self.zero_flag(),                         // Equal (Z=1)
            NE => !self.zero_flag(),                        // Not equal (Z=0)
            GT => !self.zero_flag() && (self.sign_flag() == self.overflow_flag()), // Greater than (Z=0 and N=V)
            GE => self.sign_flag() == self.overflow_flag(), // Greater or equal (N=V)
            LT => self.sign_flag() != self.overflow_flag(), // Less than (N<>V)
            LE => self.zero_flag() || (self.sign_flag() != self.overflow_flag()), // Less or equal (Z=1 or N<>V)
        }
    }

    /// N => Bit 31, (0=Not Signed, 1=Signed)
    #[must_use]
    pub fn sign_flag(self) -> bool {
        self.0.get_bit(31)
    }

    /// Z => Bit 30, (0=Not Zero, 1=Zero)
    #[must_use]
    pub fn zero_flag(self) -> bool {
        self.0.get_bit(30)
    }

    /// C => Bit 29, (0=Borrow/No Carry, 1=Carry/No Borrow)
    #[must_use]
    pub fn carry_flag(self) -> bool {
        self.0.get_bit(29)
    }

    /// V => Bit 28, (0=No Overflow, 1=Overflow)
    #[must_use]
    pub fn overflow_flag(self) -> bool {
        self.0.get_bit(28)
    }

    pub fn set_sign_flag(&mut self, value: bool) {
        self.0.set_bit(31, value);
    }

    pub fn set_zero_flag(&mut self, value: bool) {
        self.0.set_bit(30, value);
    }

    pub fn set_carry_flag(&mut self, value: bool) {
        self.0.set_bit(29, value);
    }

    pub fn set_overflow_flag(&mut self, value: bool) {
        self.0.set_bit(28, value);
    }

    pub fn set_flags(&mut self, op_result: &ArithmeticOpResult) {
        self.set_carry_flag(op_result.carry);
        self.set_zero_flag(op_result.zero);
        self.set_sign_flag(op_result.sign);
        self.set_overflow_flag(op_result.overflow);
    }

    /// The four flags as a bit string, N first.
    #[must_use]
    pub fn nzcv(self) -> String {
        [
            self.sign_flag(),
            self.zero_flag(),
            self.carry_flag(),
            self.overflow_flag(),
        ]
        .into_iter()
        .map(|flag| if flag { '1' } else { '0' })
        .collect()
    }
}
