#[allow(clippy::cast_possible_truncation)]
mod bitwise;

#[allow(clippy::cast_possible_wrap)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::missing_errors_doc)]
pub mod cpu;

pub mod error;

#[allow(clippy::missing_errors_doc)]
pub mod memory;

#[allow(clippy::missing_errors_doc)]
pub mod program;

pub mod report;
