use std::fmt::Display;

use crate::cpu::alu_instruction::AluInstruction;
use crate::cpu::condition::Condition;
use crate::cpu::flags::{LoadStoreKind, ShiftKind};
use crate::cpu::operand::{Operand, parse_memory_operand, parse_register};
use crate::error::{CpuError, Result};

/// The only branch. It tests Z on its own and never goes through
/// condition suffix stripping.
pub const BRANCH_MNEMONIC: &str = "BEQ";

/// Splits an instruction line into tokens, commas acting as whitespace.
#[must_use]
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

/// First token of an instruction with its suffixes split off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mnemonic<'a> {
    pub base: &'a str,
    pub condition: Option<Condition>,
    pub set_conditions: bool,
}

impl<'a> Mnemonic<'a> {
    #[must_use]
    pub fn parse(token: &'a str) -> Self {
        if token == BRANCH_MNEMONIC {
            return Self {
                base: token,
                condition: None,
                set_conditions: false,
            };
        }

        let (base, condition) = match Condition::strip_suffix(token) {
            Some((base, condition)) => (base, Some(condition)),
            None => (token, None),
        };

        let (base, set_conditions) = match base.strip_suffix('S') {
            Some(base) => (base, true),
            None => (base, false),
        };

        Self {
            base,
            condition,
            set_conditions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Mov {
        destination: usize,
        source: Operand,
    },
    Mvn {
        destination: usize,
        source: Operand,
    },
    Cmp {
        first: Operand,
        second: Operand,
    },
    DataProcessing {
        alu_instruction: AluInstruction,
        destination: usize,
        rn: Operand,
        op2: Operand,
    },
    Shift {
        shift_kind: ShiftKind,
        destination: usize,
        rm: Operand,
        amount: Operand,
    },
    SingleDataTransfer {
        kind: LoadStoreKind,
        register: usize,
        base_register: usize,
    },
    Branch {
        label: String,
    },
    Nop,
}

impl Instruction {
    /// Decodes `base` (a mnemonic without suffixes) and its operand tokens.
    pub fn decode(base: &str, operands: &[&str]) -> Result<Self> {
        let operand = |idx: usize| {
            operands.get(idx).copied().ok_or_else(|| {
                CpuError::invalid_argument(format!("Missing operand {} for {base}", idx + 1))
            })
        };

        let instruction = match base {
            "MOV" => Self::Mov {
                destination: parse_register(operand(0)?)?,
                source: Operand::parse(operand(1)?)?,
            },
            "MVN" => Self::Mvn {
                destination: parse_register(operand(0)?)?,
                source: Operand::parse(operand(1)?)?,
            },
            "CMP" => Self::Cmp {
                first: Operand::parse(operand(0)?)?,
                second: Operand::parse(operand(1)?)?,
            },
            "ADD" | "SUB" | "AND" | "ORR" | "EOR" => Self::DataProcessing {
                alu_instruction: match base {
                    "ADD" => AluInstruction::Add,
                    "SUB" => AluInstruction::Sub,
                    "AND" => AluInstruction::And,
                    "ORR" => AluInstruction::Orr,
                    _ => AluInstruction::Eor,
                },
                destination: parse_register(operand(0)?)?,
                rn: Operand::parse(operand(1)?)?,
                op2: Operand::parse(operand(2)?)?,
            },
            "LSL" | "LSR" | "ASR" | "ROR" => Self::Shift {
                shift_kind: match base {
                    "LSL" => ShiftKind::Lsl,
                    "LSR" => ShiftKind::Lsr,
                    "ASR" => ShiftKind::Asr,
                    _ => ShiftKind::Ror,
                },
                destination: parse_register(operand(0)?)?,
                rm: Operand::parse(operand(1)?)?,
                amount: Operand::parse(operand(2)?)?,
            },
            "LDR" | "STR" => Self::SingleDataTransfer {
                kind: if base == "LDR" {
                    LoadStoreKind::Load
                } else {
                    LoadStoreKind::Store
                },
                register: parse_register(operand(0)?)?,
                base_register: parse_memory_operand(operand(1)?)?,
            },
            BRANCH_MNEMONIC => Self::Branch {
                label: operand(0)?.to_owned(),
            },
            "NOP" => Self::Nop,
            _ => return Err(CpuError::invalid_argument("Unknown instruction")),
        };

        Ok(instruction)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mov {
                destination,
                source,
            } => write!(f, "MOV R{destination}, {source}"),
            Self::Mvn {
                destination,
                source,
            } => write!(f, "MVN R{destination}, {source}"),
            Self::Cmp { first, second } => write!(f, "CMP {first}, {second}"),
            Self::DataProcessing {
                alu_instruction,
                destination,
                rn,
                op2,
            } => write!(f, "{alu_instruction} R{destination}, {rn}, {op2}"),
            Self::Shift {
                shift_kind,
                destination,
                rm,
                amount,
            } => write!(f, "{shift_kind} R{destination}, {rm}, {amount}"),
            Self::SingleDataTransfer {
                kind,
                register,
                base_register,
            } => write!(f, "{kind} R{register}, [R{base_register}]"),
            Self::Branch { label } => write!(f, "{BRANCH_MNEMONIC} {label}"),
            Self::Nop => f.write_str("NOP"),
        }
    }
}
