//! # Increment and Decrement Instructions
//!
//! This module implements increment and decrement operations:
//! - INR / DCR: 8-bit register or memory, updates Z, S and P
//! - INX / DCX: 16-bit register pair, no flags

use super::Flow;
use crate::{ExecutionError, MemoryBus, Register, RegisterPair, CPU};

/// Executes INR (0x04 + 8n) or DCR (0x05 + 8n).
///
/// Adds or subtracts one (wrapping) and sets Z, S and P from the result.
/// Carry is not touched.
pub(crate) fn execute_inr_dcr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<Flow, ExecutionError> {
    let register = Register::destination(opcode);
    let value = cpu.read_register(register)?;

    // Bit 0 distinguishes DCR from INR
    let result = if opcode & 0x01 == 0 {
        value.wrapping_add(1)
    } else {
        value.wrapping_sub(1)
    };

    cpu.write_register(register, result)?;
    cpu.set_zsp(result);

    Ok(Flow::Next)
}

/// Executes INX (0x03 + 16n) or DCX (0x0B + 16n).
pub(crate) fn execute_inx_dcx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<Flow, ExecutionError> {
    let pair = RegisterPair::from_opcode(opcode);
    let value = cpu.pair(pair);

    let result = if opcode & 0x08 == 0 {
        value.wrapping_add(1)
    } else {
        value.wrapping_sub(1)
    };
    cpu.set_pair(pair, result);

    Ok(Flow::Next)
}
