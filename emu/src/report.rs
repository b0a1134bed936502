//! Human-readable dump of the processor after every instruction.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::cpu::processor::Processor;
use crate::error::CpuError;

/// Receives the processor state after each instruction, and every
/// instruction failure the processor recovered from.
pub trait Reporter {
    fn report_state(&mut self, processor: &Processor, line: &str);

    fn report_error(&mut self, line: &str, error: &CpuError);
}

/// Formats the register bank, the flags and the memory words after `line`.
///
/// ```text
/// MOV R0, #5
/// Register array:
/// R0=0x5 R1=0x0 R2=0x0 R3=0x0 R4=0x0 R5=0x0
/// R6=0x0 R7=0x0 R8=0x0 R9=0x0 R10=0x0 R11=0x0
/// NZCV: 0000
/// Memory array:
/// ___,___,___,___,___
/// ```
///
/// Each register is followed by a space and the dump ends with a blank line.
#[must_use]
pub fn format_state(processor: &Processor, line: &str) -> String {
    let mut out = String::new();

    // Writing into a String never fails.
    let _ = writeln!(out, "{line}");
    let _ = writeln!(out, "Register array:");
    for (idx, value) in processor.registers.iter().enumerate() {
        let _ = write!(out, "R{idx}=0x{value:x} ");
        if idx == 5 {
            out.push('\n');
        }
    }
    out.push('\n');

    let _ = writeln!(out, "NZCV: {}", processor.cpsr.nzcv());
    let _ = writeln!(out, "Memory array:");
    let words = processor
        .memory
        .iter()
        .map(|word| {
            if word == 0 {
                "___".to_owned()
            } else {
                format!("0x{word:x}")
            }
        })
        .collect::<Vec<_>>();
    let _ = writeln!(out, "{}", words.join(","));
    out.push('\n');

    out
}

/// Writes state dumps to `out` and errors to `err`.
pub struct TextReporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> TextReporter<O, E> {
    pub const fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_state(&mut self, processor: &Processor, line: &str) -> io::Result<()> {
        self.out
            .write_all(format_state(processor, line).as_bytes())?;
        self.out.flush()
    }

    fn write_error(&mut self, line: &str, error: &CpuError) -> io::Result<()> {
        writeln!(self.err, "[ERROR] In instruction '{line}': {error}")?;
        self.err.flush()
    }
}

impl<O: Write, E: Write> Reporter for TextReporter<O, E> {
    fn report_state(&mut self, processor: &Processor, line: &str) {
        if let Err(e) = self.write_state(processor, line) {
            tracing::error!("cannot write state dump: {e}");
        }
    }

    fn report_error(&mut self, line: &str, error: &CpuError) {
        if let Err(e) = self.write_error(line, error) {
            tracing::error!("cannot write error report: {e}");
        }
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub states: Vec<String>,
    pub errors: Vec<(String, CpuError)>,
}

impl Reporter for RecordingReporter {
    fn report_state(&mut self, _processor: &Processor, line: &str) {
        self.states.push(line.to_owned());
    }

    fn report_error(&mut self, line: &str, error: &CpuError) {
        self.errors.push((line.to_owned(), error.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn format_initial_state() {
        let processor = Processor::default();
        let expected = "NOP\n\
            Register array:\n\
            R0=0x0 R1=0x0 R2=0x0 R3=0x0 R4=0x0 R5=0x0 \n\
            R6=0x0 R7=0x0 R8=0x0 R9=0x0 R10=0x0 R11=0x0 \n\
            NZCV: 0000\n\
            Memory array:\n\
            ___,___,___,___,___\n\
            \n";

        assert_eq!(format_state(&processor, "NOP"), expected);
    }

    #[test]
    fn format_registers_flags_and_memory() {
        let mut processor = Processor::default();
        processor.registers.set_register_at(0, 0xAB).unwrap();
        processor.registers.set_register_at(11, 0xFFFF_FFFF).unwrap();
        processor.memory.write_word(0x108, 0x5).unwrap();
        processor.cpsr.set_sign_flag(true);
        processor.cpsr.set_carry_flag(true);

        let dump = format_state(&processor, "STR R0, [R1]");
        let lines = dump.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "STR R0, [R1]");
        assert_eq!(lines[2], "R0=0xab R1=0x0 R2=0x0 R3=0x0 R4=0x0 R5=0x0 ");
        assert_eq!(lines[3], "R6=0x0 R7=0x0 R8=0x0 R9=0x0 R10=0x0 R11=0xffffffff ");
        assert_eq!(lines[4], "NZCV: 1010");
        assert_eq!(lines[6], "___,___,0x5,___,___");
    }

    #[test]
    fn text_reporter_writes_both_channels() {
        let mut reporter = TextReporter::new(Vec::new(), Vec::new());
        let processor = Processor::default();

        reporter.report_error("FOO R1", &CpuError::invalid_argument("Unknown instruction"));
        reporter.report_state(&processor, "FOO R1");

        let (out, err) = reporter.into_inner();
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "[ERROR] In instruction 'FOO R1': Unknown instruction\n"
        );
        assert!(String::from_utf8(out).unwrap().starts_with("FOO R1\nRegister array:\n"));
    }
}
