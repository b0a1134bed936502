//! # Conditional Execution
//!
//! Any instruction (except `BEQ`, which carries its own check) may be suffixed
//! with a two-letter condition. The suffix is tested against the current flags
//! and, when it does not hold, the instruction is skipped (acting as a NOP).
//!
//! ```text
//!     CMP R0, #0
//!     MOVNE R1, #1    ← Only executes if Z=0
//!     MOVEQ R1, #0    ← Only executes if Z=1
//! ```
//!
//! ## Condition Codes
//!
//! ```text
//! ┌────────┬─────────────────────┬─────────────────────┐
//! │ Suffix │     Meaning         │    Flags Tested     │
//! ├────────┼─────────────────────┼─────────────────────┤
//! │   EQ   │ Equal               │ Z=1                 │
//! │   NE   │ Not equal           │ Z=0                 │
//! │   GT   │ > (signed)          │ Z=0 AND N=V         │
//! │   GE   │ ≥ (signed)          │ N=V                 │
//! │   LT   │ < (signed)          │ N≠V                 │
//! │   LE   │ ≤ (signed)          │ Z=1 OR N≠V          │
//! └────────┴─────────────────────┴─────────────────────┘
//! ```
//!
//! An instruction without suffix always executes. The evaluation itself lives
//! in [`Psr::can_execute`](super::psr::Psr::can_execute).

use serde::{Deserialize, Serialize};

/// Condition suffixes accepted on a mnemonic.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum Condition {
    /// Equal (Z=1)
    EQ,

    /// Not equal (Z=0)
    NE,

    /// Signed greater than (Z=0 AND N=V)
    GT,

    /// Signed greater or equal (N=V)
    GE,

    /// Signed less than (N≠V)
    LT,

    /// Signed less than or equal (Z=1 OR N≠V)
    LE,
}

impl Condition {
    /// Suffixes in the order they are matched against a mnemonic.
    pub const ALL: [Self; 6] = [Self::EQ, Self::NE, Self::GT, Self::GE, Self::LT, Self::LE];

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::EQ => "EQ",
            Self::NE => "NE",
            Self::GT => "GT",
            Self::GE => "GE",
            Self::LT => "LT",
            Self::LE => "LE",
        }
    }

    /// Splits a trailing condition off `mnemonic`.
    ///
    /// The suffix is only stripped when something is left in front of it,
    /// so a bare `EQ` is not a condition.
    #[must_use]
    pub fn strip_suffix(mnemonic: &str) -> Option<(&str, Self)> {
        Self::ALL.into_iter().find_map(|cond| {
            if mnemonic.len() > cond.suffix().len() {
                mnemonic
                    .strip_suffix(cond.suffix())
                    .map(|base| (base, cond))
            } else {
                None
            }
        })
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}
