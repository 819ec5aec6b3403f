//! # Addressing Modes
//!
//! This module defines how each 8080 opcode finds its operand. The mode also
//! fixes how many operand bytes follow the opcode in the instruction stream.

/// 8080 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Register, RegisterIndirect
/// - **1 byte**: Immediate
/// - **2 bytes**: ImmediateWord, Direct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CMA, STC, RET, HLT
    Implied,

    /// Operates on registers named inside the opcode bits.
    ///
    /// Examples: MOV B,C / ADD D / INX H
    Register,

    /// Operates on the byte at the address held in H/L (the `M` operand).
    ///
    /// Examples: MOV A,M / INR M / ADD M
    RegisterIndirect,

    /// 8-bit constant following the opcode.
    ///
    /// Example: ADI #$10 (add 0x10 to the accumulator)
    Immediate,

    /// 16-bit constant following the opcode, low byte first.
    ///
    /// Example: LXI H,#$2000
    ImmediateWord,

    /// 16-bit address following the opcode, low byte first.
    ///
    /// Example: JMP $0100
    Direct,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied
            | AddressingMode::Register
            | AddressingMode::RegisterIndirect => 0,
            AddressingMode::Immediate => 1,
            AddressingMode::ImmediateWord | AddressingMode::Direct => 2,
        }
    }
}
