pub mod alu_instruction;
pub mod condition;
pub mod flags;
pub mod instruction;
pub mod operand;
mod operations;
pub mod processor;
pub mod psr;
pub mod registers;
