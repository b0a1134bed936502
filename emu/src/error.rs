//! Errors raised while decoding or executing a single instruction.
//!
//! Every variant is recoverable: the processor reports it together with the
//! offending line and moves on to the next instruction.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CpuError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpuError {
    /// A register index or a memory address outside the machine.
    #[error("{0}")]
    OutOfRange(&'static str),

    /// Unknown mnemonic, malformed operand or shift amount out of 0-31.
    #[error("{0}")]
    InvalidArgument(String),
}

impl CpuError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
