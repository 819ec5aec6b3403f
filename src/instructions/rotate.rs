//! # Rotate Instructions
//!
//! - RRC: Rotate accumulator right, bit 0 goes to both bit 7 and carry
//! - RAR: Rotate accumulator right through carry

use super::Flow;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the RRC (Rotate Right) instruction (0x0F).
///
/// Only the carry flag is affected.
pub(crate) fn execute_rrc<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<Flow, ExecutionError> {
    let value = cpu.a;
    cpu.flag_cy = value & 0x01 != 0;
    cpu.a = value.rotate_right(1);
    Ok(Flow::Next)
}

/// Executes the RAR (Rotate Right through Carry) instruction (0x1F).
///
/// The old carry fills bit 7; the bit shifted out of bit 0 becomes the new carry.
pub(crate) fn execute_rar<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<Flow, ExecutionError> {
    let value = cpu.a;
    let carry_in = if cpu.flag_cy { 0x80 } else { 0x00 };
    cpu.flag_cy = value & 0x01 != 0;
    cpu.a = (value >> 1) | carry_in;
    Ok(Flow::Next)
}
