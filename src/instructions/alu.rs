//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADD / ADC / SUB / SBB / ANA / XRA / ORA against a register or `M`
//! - ADI / ACI / SUI: immediate forms
//! - CPI: Compare immediate
//! - CMA: Complement accumulator
//! - DAD: Add register pair to H/L
//!
//! ## Carry rule
//!
//! Every operation is evaluated in 16 bits and carry is set when that widened
//! result exceeds 0xFF. Subtraction is a wrapping 16-bit difference, so a
//! borrow shows up as a large value. AND, OR and XOR never exceed 0xFF and
//! always clear carry. CPI is the one exception and compares directly.

use super::Flow;
use crate::{ExecutionError, MemoryBus, Register, RegisterPair, CPU};

/// Operation selected by opcode bits 3-5 in the 0x80-0xBF block and the
/// 0xC6 + 8n immediate column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AluOp {
    Add,
    AddWithCarry,
    Sub,
    SubWithBorrow,
    And,
    Xor,
    Or,
    Compare,
}

impl AluOp {
    fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::AddWithCarry,
            2 => AluOp::Sub,
            3 => AluOp::SubWithBorrow,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Compare,
        }
    }
}

/// Computes the widened result of `a op value`.
fn widened(op: AluOp, a: u8, value: u8, carry: bool) -> u16 {
    let a = a as u16;
    let value = value as u16;
    let carry = carry as u16;

    match op {
        AluOp::Add => a + value,
        AluOp::AddWithCarry => a + value + carry,
        AluOp::Sub | AluOp::Compare => a.wrapping_sub(value),
        AluOp::SubWithBorrow => a.wrapping_sub(value).wrapping_sub(carry),
        AluOp::And => a & value,
        AluOp::Xor => a ^ value,
        AluOp::Or => a | value,
    }
}

/// Applies `op` to the accumulator and stores the low byte back into it.
///
/// Z, S, P come from the low byte; CY is set when the widened result
/// exceeds 0xFF.
fn accumulate<M: MemoryBus>(cpu: &mut CPU<M>, op: AluOp, value: u8) {
    let result = widened(op, cpu.a, value, cpu.flag_cy);
    let low = (result & 0xFF) as u8;

    cpu.set_zsp(low);
    cpu.flag_cy = result > 0xFF;
    cpu.a = low;
}

/// Executes the register/memory ALU block (0x80-0xB7).
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - Bits 3-5 select the operation, bits 0-2 the source operand
pub(crate) fn execute_register<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<Flow, ExecutionError> {
    let value = cpu.read_register(Register::source(opcode))?;
    accumulate(cpu, AluOp::from_opcode(opcode), value);
    Ok(Flow::Next)
}

/// Executes ADI (0xC6), ACI (0xCE) or SUI (0xD6).
pub(crate) fn execute_immediate<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    value: u8,
) -> Result<Flow, ExecutionError> {
    accumulate(cpu, AluOp::from_opcode(opcode), value);
    Ok(Flow::Next)
}

/// Executes the CPI (Compare Immediate) instruction (0xFE).
///
/// Z, S and P come from `A - value`; carry is set when `A < value`. The
/// accumulator is unchanged.
pub(crate) fn execute_cpi<M: MemoryBus>(
    cpu: &mut CPU<M>,
    value: u8,
) -> Result<Flow, ExecutionError> {
    let difference = cpu.a.wrapping_sub(value);
    cpu.set_zsp(difference);
    cpu.flag_cy = cpu.a < value;
    Ok(Flow::Next)
}

/// Executes the CMA (Complement Accumulator) instruction (0x2F). No flags.
pub(crate) fn execute_cma<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<Flow, ExecutionError> {
    cpu.a = !cpu.a;
    Ok(Flow::Next)
}

/// Executes the DAD (Double Add) instruction (0x09 + 16n).
///
/// H/L receives the 16-bit wrapping sum. Carry follows the same widened-sum
/// rule as the 8-bit operations: HL = 0x00FF plus BC = 0x0001 gives 0x0100
/// with carry set, because 0x0100 > 0xFF. Z, S and P are untouched.
pub(crate) fn execute_dad<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<Flow, ExecutionError> {
    let addend = cpu.pair(RegisterPair::from_opcode(opcode));
    let sum = cpu.hl() as u32 + addend as u32;

    cpu.flag_cy = sum > 0xFF;
    cpu.set_hl(sum as u16);

    Ok(Flow::Next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alu_op_decoding() {
        assert_eq!(AluOp::from_opcode(0x80), AluOp::Add);
        assert_eq!(AluOp::from_opcode(0x8E), AluOp::AddWithCarry);
        assert_eq!(AluOp::from_opcode(0x97), AluOp::Sub);
        assert_eq!(AluOp::from_opcode(0x9A), AluOp::SubWithBorrow);
        assert_eq!(AluOp::from_opcode(0xA0), AluOp::And);
        assert_eq!(AluOp::from_opcode(0xAF), AluOp::Xor);
        assert_eq!(AluOp::from_opcode(0xB1), AluOp::Or);
        assert_eq!(AluOp::from_opcode(0xC6), AluOp::Add);
        assert_eq!(AluOp::from_opcode(0xCE), AluOp::AddWithCarry);
        assert_eq!(AluOp::from_opcode(0xD6), AluOp::Sub);
        assert_eq!(AluOp::from_opcode(0xFE), AluOp::Compare);
    }

    #[test]
    fn test_widened_results() {
        assert_eq!(widened(AluOp::Add, 0xFF, 0x01, false), 0x0100);
        assert_eq!(widened(AluOp::AddWithCarry, 0xFF, 0xFF, true), 0x01FF);
        assert_eq!(widened(AluOp::Sub, 0x05, 0x03, true), 0x0002);
        assert_eq!(widened(AluOp::Sub, 0x03, 0x05, false), 0xFFFE);
        assert_eq!(widened(AluOp::SubWithBorrow, 0x05, 0x05, true), 0xFFFF);
        assert_eq!(widened(AluOp::And, 0xF0, 0x3C, true), 0x0030);
        assert_eq!(widened(AluOp::Xor, 0xFF, 0x0F, false), 0x00F0);
        assert_eq!(widened(AluOp::Or, 0x80, 0x01, false), 0x0081);
    }
}
