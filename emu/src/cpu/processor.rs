use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cpu::instruction::{Instruction, Mnemonic, tokenize};
use crate::cpu::psr::Psr;
use crate::cpu::registers::Registers;
use crate::error::Result;
use crate::memory::Memory;
use crate::report::Reporter;

/// The program counter is an index into the instruction list, a completed
/// instruction moves it to the next slot.
pub const INSTRUCTION_STEP: usize = 1;

/// What happened to a line handed to [`Processor::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    /// Blank line or stray label marker, nothing to report.
    Ignored,
    /// The condition suffix did not hold.
    Skipped,
    /// Executed. Carries how far the program counter has to move,
    /// `None` when the instruction already moved it.
    Executed(Option<usize>),
}

/// The whole machine: registers, flags, data memory, program counter and
/// the label table of the running program.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Processor {
    pub registers: Registers,
    pub memory: Memory,
    pub cpsr: Psr,
    pub pc: usize,
    pub labels: HashMap<String, usize>,
}

impl Processor {
    #[must_use]
    pub fn with_labels(labels: HashMap<String, usize>) -> Self {
        Self {
            labels,
            ..Default::default()
        }
    }

    /// Runs `instructions` from the current program counter until it walks
    /// past the last one.
    pub fn run<R: Reporter>(&mut self, instructions: &[String], reporter: &mut R) {
        while let Some(line) = instructions.get(self.pc) {
            let advance = self.step(line, reporter);
            self.pc += advance.unwrap_or(0);
        }

        tracing::debug!("program finished, pc={}", self.pc);
    }

    /// Executes one instruction line and reports the resulting state.
    ///
    /// Failures are reported and swallowed, the processor is left as it was
    /// before the failing instruction. Returns how far the program counter has
    /// to advance, `None` when a branch already moved it.
    pub fn step<R: Reporter>(&mut self, line: &str, reporter: &mut R) -> Option<usize> {
        let advance = match self.dispatch(line) {
            Ok(Dispatch::Ignored) => return Some(INSTRUCTION_STEP),
            Ok(Dispatch::Skipped) => {
                tracing::debug!("[{}] skipped: {line}", self.pc);
                Some(INSTRUCTION_STEP)
            }
            Ok(Dispatch::Executed(advance)) => advance,
            Err(e) => {
                tracing::warn!("[{}] '{line}' failed: {e}", self.pc);
                reporter.report_error(line, &e);
                Some(INSTRUCTION_STEP)
            }
        };

        reporter.report_state(self, line);

        advance
    }

    fn dispatch(&mut self, line: &str) -> Result<Dispatch> {
        let tokens = tokenize(line);
        let Some((first, operands)) = tokens.split_first() else {
            return Ok(Dispatch::Ignored);
        };

        if first.ends_with(':') {
            return Ok(Dispatch::Ignored);
        }

        let mnemonic = Mnemonic::parse(first);
        if !self.cpsr.can_execute(mnemonic.condition) {
            return Ok(Dispatch::Skipped);
        }

        let instruction = Instruction::decode(mnemonic.base, operands)?;
        tracing::debug!("[{}] {instruction}", self.pc);

        self.execute(&instruction, mnemonic.set_conditions)
            .map(Dispatch::Executed)
    }

    /// Executes a decoded instruction. Instruction functions tell whether the
    /// program counter has to be advanced afterwards.
    pub fn execute(
        &mut self,
        instruction: &Instruction,
        set_conditions: bool,
    ) -> Result<Option<usize>> {
        use Instruction::{Branch, Cmp, DataProcessing, Mov, Mvn, Nop, Shift, SingleDataTransfer};

        match instruction {
            Mov {
                destination,
                source,
            } => self.mov(*destination, *source)?,
            Mvn {
                destination,
                source,
            } => self.mvn(*destination, *source, set_conditions)?,
            Cmp { first, second } => self.cmp(*first, *second)?,
            DataProcessing {
                alu_instruction,
                destination,
                rn,
                op2,
            } => self.data_processing(*alu_instruction, *destination, *rn, *op2, set_conditions)?,
            Shift {
                shift_kind,
                destination,
                rm,
                amount,
            } => self.shift(*shift_kind, *destination, *rm, *amount, set_conditions)?,
            SingleDataTransfer {
                kind,
                register,
                base_register,
            } => self.single_data_transfer(*kind, *register, *base_register)?,
            Branch { label } => return Ok(self.branch(label)),
            Nop => {}
        }

        Ok(Some(INSTRUCTION_STEP))
    }
}
