//! # Jump Instructions
//!
//! This module implements JMP and its conditional forms:
//! - JNZ / JZ: Zero flag
//! - JNC / JC: Carry flag
//! - JPO / JPE: Parity flag (odd / even)
//! - JP / JM: Sign flag (plus / minus)
//!
//! The target is the 16-bit address following the opcode, low byte first.
//! A jump not taken falls through to the next instruction (3 bytes on).

use super::Flow;
use crate::{ExecutionError, MemoryBus, CPU};

/// Condition selected by opcode bits 3-5 of the conditional jump, call and
/// return columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    pub(crate) fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }

    pub(crate) fn holds<M: MemoryBus>(self, cpu: &CPU<M>) -> bool {
        match self {
            Condition::NotZero => !cpu.flag_z,
            Condition::Zero => cpu.flag_z,
            Condition::NoCarry => !cpu.flag_cy,
            Condition::Carry => cpu.flag_cy,
            Condition::ParityOdd => !cpu.flag_p,
            Condition::ParityEven => cpu.flag_p,
            Condition::Plus => !cpu.flag_s,
            Condition::Minus => cpu.flag_s,
        }
    }
}

/// Returns true when the conditional instruction `opcode` should transfer
/// control. `unconditional` is the opcode of the always-taken form.
pub(crate) fn taken<M: MemoryBus>(cpu: &CPU<M>, opcode: u8, unconditional: u8) -> bool {
    opcode == unconditional || Condition::from_opcode(opcode).holds(cpu)
}

/// Executes JMP (0xC3) or a conditional jump (0xC2 + 8n).
///
/// No flags are affected.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte
/// * `target` - The 16-bit destination address
pub(crate) fn execute_jump<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    target: u16,
) -> Result<Flow, ExecutionError> {
    if taken(cpu, opcode, 0xC3) {
        Ok(Flow::Jump(target))
    } else {
        Ok(Flow::Next)
    }
}
