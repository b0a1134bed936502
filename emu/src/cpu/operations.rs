use crate::bitwise::Bits;
use crate::cpu::alu_instruction::{self, AluInstruction};
use crate::cpu::flags::{LoadStoreKind, ShiftKind};
use crate::cpu::operand::Operand;
use crate::cpu::processor::{Processor, INSTRUCTION_STEP};
use crate::error::Result;

impl Processor {
    /// Reads the value behind an operand.
    pub fn resolve(&self, operand: Operand) -> Result<u32> {
        match operand {
            Operand::Register(reg) => self.registers.register_at(reg),
            Operand::Immediate(value) => Ok(value),
        }
    }

    /// MOV never touches the flags, with or without S.
    pub fn mov(&mut self, rd: usize, source: Operand) -> Result<()> {
        let value = self.resolve(source)?;
        self.registers.set_register_at(rd, value)
    }

    /// MVN only updates N and Z, C and V are left as they are.
    pub fn mvn(&mut self, rd: usize, source: Operand, s: bool) -> Result<()> {
        let result = !self.resolve(source)?;

        self.registers.set_register_at(rd, result)?;

        if s {
            self.cpsr.set_sign_flag(result.get_bit(31));
            self.cpsr.set_zero_flag(result == 0);
        }

        Ok(())
    }

    /// CMP always updates the flags, as a subtraction.
    pub fn cmp(&mut self, first: Operand, second: Operand) -> Result<()> {
        let op1 = self.resolve(first)?;
        let op2 = self.resolve(second)?;

        let sub_result = AluInstruction::Sub.apply(op1, op2);
        self.cpsr.set_flags(&sub_result);

        Ok(())
    }

    pub fn data_processing(
        &mut self,
        alu_instruction: AluInstruction,
        rd: usize,
        rn: Operand,
        op2: Operand,
        s: bool,
    ) -> Result<()> {
        let rn = self.resolve(rn)?;
        let op2 = self.resolve(op2)?;

        let op_result = alu_instruction.apply(rn, op2);

        self.registers.set_register_at(rd, op_result.result)?;

        if s {
            self.cpsr.set_flags(&op_result);
        }

        Ok(())
    }

    pub fn shift(
        &mut self,
        shift_kind: ShiftKind,
        rd: usize,
        rm: Operand,
        amount: Operand,
        s: bool,
    ) -> Result<()> {
        let rm = self.resolve(rm)?;
        let amount = self.resolve(amount)?;

        let op_result = alu_instruction::shift(shift_kind, amount, rm)?;

        self.registers.set_register_at(rd, op_result.result)?;

        if s {
            self.cpsr.set_flags(&op_result);
        }

        Ok(())
    }

    /// LDR/STR with the address taken from the value of `base_register`.
    pub fn single_data_transfer(
        &mut self,
        kind: LoadStoreKind,
        rd: usize,
        base_register: usize,
    ) -> Result<()> {
        let address = self.registers.register_at(base_register)?;

        match kind {
            LoadStoreKind::Load => {
                let value = self.memory.read_word(address)?;
                self.registers.set_register_at(rd, value)
            }
            LoadStoreKind::Store => {
                let value = self.registers.register_at(rd)?;
                self.memory.write_word(address, value)
            }
        }
    }

    /// BEQ: jumps to `label` when Z is set and the label exists.
    ///
    /// Returns `None` when the program counter has been moved, otherwise the
    /// amount it still has to advance.
    pub fn branch(&mut self, label: &str) -> Option<usize> {
        if !self.cpsr.zero_flag() {
            return Some(INSTRUCTION_STEP);
        }

        match self.labels.get(label) {
            Some(&target) => {
                tracing::debug!("branch taken to '{label}' ({} -> {target})", self.pc);
                self.pc = target;
                None
            }
            None => {
                tracing::debug!("branch to unknown label '{label}' ignored");
                Some(INSTRUCTION_STEP)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CpuError;
    use crate::report::RecordingReporter;
    use pretty_assertions::assert_eq;

    fn cpu_with(source: &[&str]) -> Processor {
        let mut cpu = Processor::default();
        let mut reporter = RecordingReporter::default();
        for line in source {
            cpu.step(line, &mut reporter);
        }
        cpu
    }

    #[test]
    fn check_mov_immediate() {
        let cpu = cpu_with(&["MOV R0, #0x7B", "MOV R1, #123", "MOV R2, R1"]);

        assert_eq!(cpu.registers.register_at(0), Ok(0x7B));
        assert_eq!(cpu.registers.register_at(1), Ok(123));
        assert_eq!(cpu.registers.register_at(2), Ok(123));
        assert_eq!(cpu.cpsr.nzcv(), "0000");
    }

    #[test]
    fn check_mvn() {
        let mut cpu = Processor::default();
        cpu.cpsr.set_carry_flag(true);
        cpu.cpsr.set_overflow_flag(true);

        cpu.mvn(0, Operand::Immediate(0), true).unwrap();

        assert_eq!(cpu.registers.register_at(0), Ok(0xFFFF_FFFF));
        assert!(cpu.cpsr.sign_flag());
        assert!(!cpu.cpsr.zero_flag());
        assert!(cpu.cpsr.carry_flag());
        assert!(cpu.cpsr.overflow_flag());

        cpu.mvn(1, Operand::Immediate(0xFFFF_FFFF), true).unwrap();
        assert!(cpu.cpsr.zero_flag());
        assert!(!cpu.cpsr.sign_flag());
    }

    #[test]
    fn check_mvn_without_s() {
        let mut cpu = Processor::default();
        cpu.mvn(0, Operand::Immediate(0), false).unwrap();
        assert_eq!(cpu.cpsr.nzcv(), "0000");
    }

    #[test]
    fn check_cmp() {
        let mut cpu = Processor::default();

        cpu.cmp(Operand::Immediate(4), Operand::Immediate(4)).unwrap();
        assert_eq!(cpu.cpsr.nzcv(), "0110");

        cpu.cmp(Operand::Immediate(0x8000_0000), Operand::Immediate(1))
            .unwrap();
        assert_eq!(cpu.cpsr.nzcv(), "0011");
    }

    #[test]
    fn check_add_carry_bit() {
        let cpu = cpu_with(&["MOV R0, #0xFFFFFFFF", "MOV R1, #1", "ADDS R2, R0, R1"]);

        assert_eq!(cpu.registers.register_at(2), Ok(0));
        assert!(cpu.cpsr.zero_flag());
        assert!(cpu.cpsr.carry_flag());
        assert!(!cpu.cpsr.overflow_flag());
        assert!(!cpu.cpsr.sign_flag());
    }

    #[test]
    fn check_add_overflow() {
        let cpu = cpu_with(&["MOV R0, #0x7FFFFFFF", "ADDS R1, R0, #1"]);

        assert_eq!(cpu.registers.register_at(1), Ok(0x8000_0000));
        assert_eq!(cpu.cpsr.nzcv(), "1001");
    }

    #[test]
    fn check_add_without_s() {
        let cpu = cpu_with(&["MOV R0, #0xFFFFFFFF", "ADD R1, R0, #1"]);

        assert_eq!(cpu.registers.register_at(1), Ok(0));
        assert_eq!(cpu.cpsr.nzcv(), "0000");
    }

    #[test]
    fn check_sub() {
        let cpu = cpu_with(&["MOV R0, #10", "SUBS R1, R0, #10"]);
        assert_eq!(cpu.registers.register_at(1), Ok(0));
        assert_eq!(cpu.cpsr.nzcv(), "0110");

        let cpu = cpu_with(&["MOV R0, #1", "SUBS R1, R0, #2"]);
        assert_eq!(cpu.registers.register_at(1), Ok(0xFFFF_FFFF));
        assert_eq!(cpu.cpsr.nzcv(), "1000");
    }

    #[test]
    fn check_and_orr_eor() {
        let cpu = cpu_with(&[
            "MOV R0, #0xF0",
            "MOV R1, #0x3C",
            "AND R2, R0, R1",
            "ORR R3, R0, R1",
            "EOR R4, R0, R1",
        ]);

        assert_eq!(cpu.registers.register_at(2), Ok(0x30));
        assert_eq!(cpu.registers.register_at(3), Ok(0xFC));
        assert_eq!(cpu.registers.register_at(4), Ok(0xCC));
    }

    #[test]
    fn check_eors_zero() {
        let cpu = cpu_with(&["MOV R0, #0x55", "EORS R1, R0, R0"]);
        assert_eq!(cpu.registers.register_at(1), Ok(0));
        assert!(cpu.cpsr.zero_flag());
        assert!(cpu.cpsr.carry_flag());
    }

    #[test]
    fn check_shifts() {
        let cpu = cpu_with(&[
            "MOV R0, #0x80000001",
            "LSL R1, R0, #1",
            "LSR R2, R0, #1",
            "ASR R3, R0, #1",
            "ROR R4, R0, #1",
        ]);

        assert_eq!(cpu.registers.register_at(1), Ok(0x2));
        assert_eq!(cpu.registers.register_at(2), Ok(0x4000_0000));
        assert_eq!(cpu.registers.register_at(3), Ok(0xC000_0000));
        assert_eq!(cpu.registers.register_at(4), Ok(0xC000_0000));
    }

    #[test]
    fn check_shift_amount_from_register() {
        let cpu = cpu_with(&["MOV R0, #1", "MOV R1, #31", "LSLS R2, R0, R1"]);

        assert_eq!(cpu.registers.register_at(2), Ok(0x8000_0000));
        assert!(cpu.cpsr.sign_flag());
        assert!(!cpu.cpsr.carry_flag());
    }

    #[test]
    fn check_shift_out_of_range() {
        let mut cpu = Processor::default();
        cpu.registers.set_register_at(0, 1).unwrap();

        let result = cpu.shift(
            ShiftKind::Lsl,
            1,
            Operand::Register(0),
            Operand::Immediate(32),
            true,
        );

        assert_eq!(
            result,
            Err(CpuError::invalid_argument("Shift amount must be 0-31"))
        );
        assert_eq!(cpu.registers.register_at(1), Ok(0));
    }

    #[test]
    fn check_str_then_ldr() {
        let cpu = cpu_with(&[
            "MOV R0, #0xBEEF",
            "MOV R1, #0x104",
            "STR R0, [R1]",
            "LDR R2, [R1]",
        ]);

        assert_eq!(cpu.registers.register_at(2), Ok(0xBEEF));
        assert_eq!(cpu.memory.read_word(0x104), Ok(0xBEEF));
    }

    #[test]
    fn check_data_transfer_bad_address() {
        let mut cpu = Processor::default();
        cpu.registers.set_register_at(1, 0x114).unwrap();
        assert_eq!(
            cpu.single_data_transfer(LoadStoreKind::Store, 0, 1),
            Err(CpuError::OutOfRange("Invalid memory address"))
        );

        cpu.registers.set_register_at(1, 0x101).unwrap();
        assert_eq!(
            cpu.single_data_transfer(LoadStoreKind::Load, 0, 1),
            Err(CpuError::OutOfRange("Invalid memory address"))
        );
    }

    #[test]
    fn check_branch() {
        let mut cpu = Processor::with_labels([("done".to_owned(), 7)].into());

        assert_eq!(cpu.branch("done"), Some(INSTRUCTION_STEP));
        assert_eq!(cpu.pc, 0);

        cpu.cpsr.set_zero_flag(true);
        assert_eq!(cpu.branch("missing"), Some(INSTRUCTION_STEP));
        assert_eq!(cpu.branch("done"), None);
        assert_eq!(cpu.pc, 7);
    }
}
