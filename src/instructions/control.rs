//! # Call, Return and Reset Instructions
//!
//! This module implements subroutine control flow:
//! - CALL and CNZ / CZ / CNC / CC / CPO / CPE / CP / CM
//! - RET and RNZ / RZ / RNC / RC / RPO / RPE / RP / RM
//! - RST 0-7: call to the fixed address 8 * n
//! - PCHL: jump to the address in H/L
//!
//! The stack grows toward lower addresses. A push writes the high byte at
//! `sp-1` and the low byte at `sp-2`, then subtracts 2 from `sp`. A pop reads
//! the low byte at `sp` and the high byte at `sp+1`.
//!
//! Which return address is pushed, where transfers land and whether RET moves
//! `sp` are governed by the CPU's `Quirks`.

use super::branches::taken;
use super::Flow;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes CALL (0xCD) or a conditional call (0xC4 + 8n).
///
/// When taken, pushes the address following the 3-byte instruction and
/// transfers to `target`. No flags are affected.
pub(crate) fn execute_call<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    target: u16,
) -> Result<Flow, ExecutionError> {
    if !taken(cpu, opcode, 0xCD) {
        return Ok(Flow::Next);
    }

    let return_address = cpu.pc.wrapping_add(cpu.quirks.return_offset(3));
    cpu.push_word(return_address)?;

    Ok(Flow::Jump(target))
}

/// Executes RET (0xC9) or a conditional return (0xC0 + 8n).
///
/// When taken, pops the return address and adds 2 to `sp` unless
/// `Quirks::ret_keeps_sp` is set.
pub(crate) fn execute_ret<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<Flow, ExecutionError> {
    if !taken(cpu, opcode, 0xC9) {
        return Ok(Flow::Next);
    }

    let return_address = cpu.peek_word()?;
    if !cpu.quirks.ret_keeps_sp {
        cpu.sp = cpu.sp.wrapping_add(2);
    }

    Ok(Flow::Jump(return_address))
}

/// Executes RST n (0xC7 + 8n).
///
/// Pushes the return address like a 1-byte call and transfers to `8 * n`.
pub(crate) fn execute_rst<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<Flow, ExecutionError> {
    let vector = (opcode & 0x38) as u16;

    let return_address = cpu.pc.wrapping_add(cpu.quirks.return_offset(1));
    cpu.push_word(return_address)?;

    Ok(Flow::Jump(vector))
}

/// Executes the PCHL instruction (0xE9): transfer to the address in H/L.
pub(crate) fn execute_pchl<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<Flow, ExecutionError> {
    Ok(Flow::Jump(cpu.hl()))
}
