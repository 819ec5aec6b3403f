//! # 8080 Instruction Implementations
//!
//! This module contains the implementations of the executed 8080 instructions,
//! organized by category. Each instruction is a standalone function that takes
//! a mutable reference to the CPU plus the opcode (and operand, if any) and
//! tells the step loop where execution continues.
//!
//! ## Categories
//!
//! - **transfer**: Data transfer (MOV, LXI)
//! - **inc_dec**: Increment and decrement (INR, DCR, INX, DCX)
//! - **alu**: Arithmetic and logic (ADD..ORA, ADI, ACI, SUI, CPI, CMA, DAD)
//! - **flags**: Parity and carry manipulation (CMC, STC)
//! - **rotate**: Accumulator rotates (RRC, RAR)
//! - **branches**: Jumps (JMP and its eight conditional forms)
//! - **control**: Calls, returns, resets and PCHL

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod rotate;
pub mod transfer;

/// Where execution continues after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Fall through to the next instruction.
    Next,

    /// Transfer control to this address.
    Jump(u16),

    /// HLT.
    Halt,
}
