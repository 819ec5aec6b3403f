//! # Data Transfer Instructions
//!
//! This module implements data transfer operations:
//! - MOV: Move register, register to memory, memory to register
//! - LXI: Load register pair immediate
//!
//! None of them affect the condition codes.

use super::Flow;
use crate::{ExecutionError, MemoryBus, Register, RegisterPair, CPU};

/// Executes the MOV instruction (0x40-0x7F, except 0x76 which is HLT).
///
/// Copies the source operand into the destination operand. Either side may
/// be `M`, the byte at the address held in H/L.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte; bits 3-5 name the destination, bits 0-2 the source
pub(crate) fn execute_mov<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<Flow, ExecutionError> {
    let value = cpu.read_register(Register::source(opcode))?;
    cpu.write_register(Register::destination(opcode), value)?;
    Ok(Flow::Next)
}

/// Executes the LXI (Load register pair Immediate) instruction.
///
/// The operand arrives low byte first in the instruction stream; `operand`
/// is the already assembled 16-bit value.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - 0x01 (B), 0x11 (D), 0x21 (H) or 0x31 (SP)
/// * `operand` - The 16-bit immediate value
pub(crate) fn execute_lxi<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    operand: u16,
) -> Result<Flow, ExecutionError> {
    cpu.set_pair(RegisterPair::from_opcode(opcode), operand);
    Ok(Flow::Next)
}
