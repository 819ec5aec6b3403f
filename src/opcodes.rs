//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that serves as the single
//! source of truth for all 8080 instruction information. The disassembler
//! reads mnemonics and sizes from it; the CPU dispatches on the `operation`
//! each executed entry carries.
//!
//! The table covers:
//! - **244 documented opcodes**, 197 of them executed by this interpreter
//! - **12 undocumented opcodes**, marked with the "???" mnemonic

use crate::addressing::AddressingMode;
use crate::addressing::AddressingMode::*;

use Operation::*;

/// Handler family of an executed opcode.
///
/// Opcodes of one family share a handler that decodes the remaining opcode
/// bits (register, pair, condition or ALU operation) itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// MOV r,r' including M
    Mov,
    /// LXI
    LoadPair,
    /// INR / DCR
    IncDec,
    /// INX / DCX
    IncDecPair,
    /// DAD
    AddPair,
    /// ADD ADC SUB SBB ANA XRA ORA
    AluRegister,
    /// ADI ACI SUI
    AluImmediate,
    /// CPI
    CompareImmediate,
    /// CMA
    ComplementA,
    /// CMC
    ComplementCarry,
    /// STC
    SetCarry,
    /// RRC
    RotateRight,
    /// RAR
    RotateRightCarry,
    /// JMP and the conditional jumps
    Jump,
    /// CALL and the conditional calls
    Call,
    /// RET and the conditional returns
    Return,
    /// RST n
    Restart,
    /// PCHL
    JumpHl,
    /// HLT
    Halt,
}

/// Metadata for a single 8080 opcode.
///
/// # Fields
///
/// - `mnemonic`: Instruction name (e.g., "MOV", "LXI", "???")
/// - `operands`: Register operands encoded in the opcode itself (e.g., "B,C", "SP", "3")
/// - `addressing_mode`: How the instruction finds its operand
/// - `size_bytes`: Total instruction size including opcode and operands (1-3 bytes)
/// - `implemented`: Whether the interpreter executes this opcode
/// - `operation`: Handler family, `None` exactly when not implemented
///
/// # Examples
///
/// ```
/// use lib8080::{AddressingMode, OPCODE_TABLE};
///
/// // LXI H,d16 (opcode 0x21)
/// let lxi = &OPCODE_TABLE[0x21];
/// assert_eq!(lxi.mnemonic, "LXI");
/// assert_eq!(lxi.operands, "H");
/// assert_eq!(lxi.addressing_mode, AddressingMode::ImmediateWord);
/// assert_eq!(lxi.size_bytes, 3);
/// assert!(lxi.implemented);
///
/// // STAX B is documented but not executed
/// assert!(!OPCODE_TABLE[0x02].implemented);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "MOV", "JNZ", "???" for undocumented opcodes).
    pub mnemonic: &'static str,

    /// Register operands baked into the opcode, empty when there are none.
    pub operands: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// Whether this instruction is executed by the interpreter.
    ///
    /// Stepping onto an opcode with `implemented: false` reports
    /// `StepResult::Unimplemented` and leaves the CPU untouched.
    pub implemented: bool,

    /// Handler family the CPU dispatches to.
    pub operation: Option<Operation>,
}

impl OpcodeMetadata {
    /// Returns true for the undocumented opcodes.
    pub fn is_illegal(&self) -> bool {
        self.mnemonic == "???"
    }
}

const fn entry(
    mnemonic: &'static str,
    operands: &'static str,
    addressing_mode: AddressingMode,
    operation: Option<Operation>,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        operands,
        addressing_mode,
        size_bytes: 1 + addressing_mode.operand_bytes(),
        implemented: operation.is_some(),
        operation,
    }
}

const fn implemented(
    mnemonic: &'static str,
    operands: &'static str,
    addressing_mode: AddressingMode,
    operation: Operation,
) -> OpcodeMetadata {
    entry(mnemonic, operands, addressing_mode, Some(operation))
}

const fn unimplemented(
    mnemonic: &'static str,
    operands: &'static str,
    addressing_mode: AddressingMode,
) -> OpcodeMetadata {
    entry(mnemonic, operands, addressing_mode, None)
}

const ILLEGAL: OpcodeMetadata = entry("???", "", Implied, None);

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use lib8080::OPCODE_TABLE;
///
/// let hlt = &OPCODE_TABLE[0x76];
/// assert_eq!(hlt.mnemonic, "HLT");
/// assert_eq!(hlt.size_bytes, 1);
///
/// // 0x08 is an undocumented alias
/// assert!(OPCODE_TABLE[0x08].is_illegal());
/// ```
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    /* 0x00 */ unimplemented("NOP", "", Implied),
    /* 0x01 */ implemented("LXI", "B", ImmediateWord, LoadPair),
    /* 0x02 */ unimplemented("STAX", "B", Register),
    /* 0x03 */ implemented("INX", "B", Register, IncDecPair),
    /* 0x04 */ implemented("INR", "B", Register, IncDec),
    /* 0x05 */ implemented("DCR", "B", Register, IncDec),
    /* 0x06 */ unimplemented("MVI", "B", Immediate),
    /* 0x07 */ unimplemented("RLC", "", Implied),
    /* 0x08 */ ILLEGAL,
    /* 0x09 */ implemented("DAD", "B", Register, AddPair),
    /* 0x0A */ unimplemented("LDAX", "B", Register),
    /* 0x0B */ implemented("DCX", "B", Register, IncDecPair),
    /* 0x0C */ implemented("INR", "C", Register, IncDec),
    /* 0x0D */ implemented("DCR", "C", Register, IncDec),
    /* 0x0E */ unimplemented("MVI", "C", Immediate),
    /* 0x0F */ implemented("RRC", "", Implied, RotateRight),
    /* 0x10 */ ILLEGAL,
    /* 0x11 */ implemented("LXI", "D", ImmediateWord, LoadPair),
    /* 0x12 */ unimplemented("STAX", "D", Register),
    /* 0x13 */ implemented("INX", "D", Register, IncDecPair),
    /* 0x14 */ implemented("INR", "D", Register, IncDec),
    /* 0x15 */ implemented("DCR", "D", Register, IncDec),
    /* 0x16 */ unimplemented("MVI", "D", Immediate),
    /* 0x17 */ unimplemented("RAL", "", Implied),
    /* 0x18 */ ILLEGAL,
    /* 0x19 */ implemented("DAD", "D", Register, AddPair),
    /* 0x1A */ unimplemented("LDAX", "D", Register),
    /* 0x1B */ implemented("DCX", "D", Register, IncDecPair),
    /* 0x1C */ implemented("INR", "E", Register, IncDec),
    /* 0x1D */ implemented("DCR", "E", Register, IncDec),
    /* 0x1E */ unimplemented("MVI", "E", Immediate),
    /* 0x1F */ implemented("RAR", "", Implied, RotateRightCarry),
    /* 0x20 */ ILLEGAL,
    /* 0x21 */ implemented("LXI", "H", ImmediateWord, LoadPair),
    /* 0x22 */ unimplemented("SHLD", "", Direct),
    /* 0x23 */ implemented("INX", "H", Register, IncDecPair),
    /* 0x24 */ implemented("INR", "H", Register, IncDec),
    /* 0x25 */ implemented("DCR", "H", Register, IncDec),
    /* 0x26 */ unimplemented("MVI", "H", Immediate),
    /* 0x27 */ unimplemented("DAA", "", Implied),
    /* 0x28 */ ILLEGAL,
    /* 0x29 */ implemented("DAD", "H", Register, AddPair),
    /* 0x2A */ unimplemented("LHLD", "", Direct),
    /* 0x2B */ implemented("DCX", "H", Register, IncDecPair),
    /* 0x2C */ implemented("INR", "L", Register, IncDec),
    /* 0x2D */ implemented("DCR", "L", Register, IncDec),
    /* 0x2E */ unimplemented("MVI", "L", Immediate),
    /* 0x2F */ implemented("CMA", "", Implied, ComplementA),
    /* 0x30 */ ILLEGAL,
    /* 0x31 */ implemented("LXI", "SP", ImmediateWord, LoadPair),
    /* 0x32 */ unimplemented("STA", "", Direct),
    /* 0x33 */ implemented("INX", "SP", Register, IncDecPair),
    /* 0x34 */ implemented("INR", "M", RegisterIndirect, IncDec),
    /* 0x35 */ implemented("DCR", "M", RegisterIndirect, IncDec),
    /* 0x36 */ unimplemented("MVI", "M", Immediate),
    /* 0x37 */ implemented("STC", "", Implied, SetCarry),
    /* 0x38 */ ILLEGAL,
    /* 0x39 */ implemented("DAD", "SP", Register, AddPair),
    /* 0x3A */ unimplemented("LDA", "", Direct),
    /* 0x3B */ implemented("DCX", "SP", Register, IncDecPair),
    /* 0x3C */ implemented("INR", "A", Register, IncDec),
    /* 0x3D */ implemented("DCR", "A", Register, IncDec),
    /* 0x3E */ unimplemented("MVI", "A", Immediate),
    /* 0x3F */ implemented("CMC", "", Implied, ComplementCarry),
    /* 0x40 */ implemented("MOV", "B,B", Register, Mov),
    /* 0x41 */ implemented("MOV", "B,C", Register, Mov),
    /* 0x42 */ implemented("MOV", "B,D", Register, Mov),
    /* 0x43 */ implemented("MOV", "B,E", Register, Mov),
    /* 0x44 */ implemented("MOV", "B,H", Register, Mov),
    /* 0x45 */ implemented("MOV", "B,L", Register, Mov),
    /* 0x46 */ implemented("MOV", "B,M", RegisterIndirect, Mov),
    /* 0x47 */ implemented("MOV", "B,A", Register, Mov),
    /* 0x48 */ implemented("MOV", "C,B", Register, Mov),
    /* 0x49 */ implemented("MOV", "C,C", Register, Mov),
    /* 0x4A */ implemented("MOV", "C,D", Register, Mov),
    /* 0x4B */ implemented("MOV", "C,E", Register, Mov),
    /* 0x4C */ implemented("MOV", "C,H", Register, Mov),
    /* 0x4D */ implemented("MOV", "C,L", Register, Mov),
    /* 0x4E */ implemented("MOV", "C,M", RegisterIndirect, Mov),
    /* 0x4F */ implemented("MOV", "C,A", Register, Mov),
    /* 0x50 */ implemented("MOV", "D,B", Register, Mov),
    /* 0x51 */ implemented("MOV", "D,C", Register, Mov),
    /* 0x52 */ implemented("MOV", "D,D", Register, Mov),
    /* 0x53 */ implemented("MOV", "D,E", Register, Mov),
    /* 0x54 */ implemented("MOV", "D,H", Register, Mov),
    /* 0x55 */ implemented("MOV", "D,L", Register, Mov),
    /* 0x56 */ implemented("MOV", "D,M", RegisterIndirect, Mov),
    /* 0x57 */ implemented("MOV", "D,A", Register, Mov),
    /* 0x58 */ implemented("MOV", "E,B", Register, Mov),
    /* 0x59 */ implemented("MOV", "E,C", Register, Mov),
    /* 0x5A */ implemented("MOV", "E,D", Register, Mov),
    /* 0x5B */ implemented("MOV", "E,E", Register, Mov),
    /* 0x5C */ implemented("MOV", "E,H", Register, Mov),
    /* 0x5D */ implemented("MOV", "E,L", Register, Mov),
    /* 0x5E */ implemented("MOV", "E,M", RegisterIndirect, Mov),
    /* 0x5F */ implemented("MOV", "E,A", Register, Mov),
    /* 0x60 */ implemented("MOV", "H,B", Register, Mov),
    /* 0x61 */ implemented("MOV", "H,C", Register, Mov),
    /* 0x62 */ implemented("MOV", "H,D", Register, Mov),
    /* 0x63 */ implemented("MOV", "H,E", Register, Mov),
    /* 0x64 */ implemented("MOV", "H,H", Register, Mov),
    /* 0x65 */ implemented("MOV", "H,L", Register, Mov),
    /* 0x66 */ implemented("MOV", "H,M", RegisterIndirect, Mov),
    /* 0x67 */ implemented("MOV", "H,A", Register, Mov),
    /* 0x68 */ implemented("MOV", "L,B", Register, Mov),
    /* 0x69 */ implemented("MOV", "L,C", Register, Mov),
    /* 0x6A */ implemented("MOV", "L,D", Register, Mov),
    /* 0x6B */ implemented("MOV", "L,E", Register, Mov),
    /* 0x6C */ implemented("MOV", "L,H", Register, Mov),
    /* 0x6D */ implemented("MOV", "L,L", Register, Mov),
    /* 0x6E */ implemented("MOV", "L,M", RegisterIndirect, Mov),
    /* 0x6F */ implemented("MOV", "L,A", Register, Mov),
    /* 0x70 */ implemented("MOV", "M,B", RegisterIndirect, Mov),
    /* 0x71 */ implemented("MOV", "M,C", RegisterIndirect, Mov),
    /* 0x72 */ implemented("MOV", "M,D", RegisterIndirect, Mov),
    /* 0x73 */ implemented("MOV", "M,E", RegisterIndirect, Mov),
    /* 0x74 */ implemented("MOV", "M,H", RegisterIndirect, Mov),
    /* 0x75 */ implemented("MOV", "M,L", RegisterIndirect, Mov),
    /* 0x76 */ implemented("HLT", "", Implied, Halt),
    /* 0x77 */ implemented("MOV", "M,A", RegisterIndirect, Mov),
    /* 0x78 */ implemented("MOV", "A,B", Register, Mov),
    /* 0x79 */ implemented("MOV", "A,C", Register, Mov),
    /* 0x7A */ implemented("MOV", "A,D", Register, Mov),
    /* 0x7B */ implemented("MOV", "A,E", Register, Mov),
    /* 0x7C */ implemented("MOV", "A,H", Register, Mov),
    /* 0x7D */ implemented("MOV", "A,L", Register, Mov),
    /* 0x7E */ implemented("MOV", "A,M", RegisterIndirect, Mov),
    /* 0x7F */ implemented("MOV", "A,A", Register, Mov),
    /* 0x80 */ implemented("ADD", "B", Register, AluRegister),
    /* 0x81 */ implemented("ADD", "C", Register, AluRegister),
    /* 0x82 */ implemented("ADD", "D", Register, AluRegister),
    /* 0x83 */ implemented("ADD", "E", Register, AluRegister),
    /* 0x84 */ implemented("ADD", "H", Register, AluRegister),
    /* 0x85 */ implemented("ADD", "L", Register, AluRegister),
    /* 0x86 */ implemented("ADD", "M", RegisterIndirect, AluRegister),
    /* 0x87 */ implemented("ADD", "A", Register, AluRegister),
    /* 0x88 */ implemented("ADC", "B", Register, AluRegister),
    /* 0x89 */ implemented("ADC", "C", Register, AluRegister),
    /* 0x8A */ implemented("ADC", "D", Register, AluRegister),
    /* 0x8B */ implemented("ADC", "E", Register, AluRegister),
    /* 0x8C */ implemented("ADC", "H", Register, AluRegister),
    /* 0x8D */ implemented("ADC", "L", Register, AluRegister),
    /* 0x8E */ implemented("ADC", "M", RegisterIndirect, AluRegister),
    /* 0x8F */ implemented("ADC", "A", Register, AluRegister),
    /* 0x90 */ implemented("SUB", "B", Register, AluRegister),
    /* 0x91 */ implemented("SUB", "C", Register, AluRegister),
    /* 0x92 */ implemented("SUB", "D", Register, AluRegister),
    /* 0x93 */ implemented("SUB", "E", Register, AluRegister),
    /* 0x94 */ implemented("SUB", "H", Register, AluRegister),
    /* 0x95 */ implemented("SUB", "L", Register, AluRegister),
    /* 0x96 */ implemented("SUB", "M", RegisterIndirect, AluRegister),
    /* 0x97 */ implemented("SUB", "A", Register, AluRegister),
    /* 0x98 */ implemented("SBB", "B", Register, AluRegister),
    /* 0x99 */ implemented("SBB", "C", Register, AluRegister),
    /* 0x9A */ implemented("SBB", "D", Register, AluRegister),
    /* 0x9B */ implemented("SBB", "E", Register, AluRegister),
    /* 0x9C */ implemented("SBB", "H", Register, AluRegister),
    /* 0x9D */ implemented("SBB", "L", Register, AluRegister),
    /* 0x9E */ implemented("SBB", "M", RegisterIndirect, AluRegister),
    /* 0x9F */ implemented("SBB", "A", Register, AluRegister),
    /* 0xA0 */ implemented("ANA", "B", Register, AluRegister),
    /* 0xA1 */ implemented("ANA", "C", Register, AluRegister),
    /* 0xA2 */ implemented("ANA", "D", Register, AluRegister),
    /* 0xA3 */ implemented("ANA", "E", Register, AluRegister),
    /* 0xA4 */ implemented("ANA", "H", Register, AluRegister),
    /* 0xA5 */ implemented("ANA", "L", Register, AluRegister),
    /* 0xA6 */ implemented("ANA", "M", RegisterIndirect, AluRegister),
    /* 0xA7 */ implemented("ANA", "A", Register, AluRegister),
    /* 0xA8 */ implemented("XRA", "B", Register, AluRegister),
    /* 0xA9 */ implemented("XRA", "C", Register, AluRegister),
    /* 0xAA */ implemented("XRA", "D", Register, AluRegister),
    /* 0xAB */ implemented("XRA", "E", Register, AluRegister),
    /* 0xAC */ implemented("XRA", "H", Register, AluRegister),
    /* 0xAD */ implemented("XRA", "L", Register, AluRegister),
    /* 0xAE */ implemented("XRA", "M", RegisterIndirect, AluRegister),
    /* 0xAF */ implemented("XRA", "A", Register, AluRegister),
    /* 0xB0 */ implemented("ORA", "B", Register, AluRegister),
    /* 0xB1 */ implemented("ORA", "C", Register, AluRegister),
    /* 0xB2 */ implemented("ORA", "D", Register, AluRegister),
    /* 0xB3 */ implemented("ORA", "E", Register, AluRegister),
    /* 0xB4 */ implemented("ORA", "H", Register, AluRegister),
    /* 0xB5 */ implemented("ORA", "L", Register, AluRegister),
    /* 0xB6 */ implemented("ORA", "M", RegisterIndirect, AluRegister),
    /* 0xB7 */ implemented("ORA", "A", Register, AluRegister),
    /* 0xB8 */ unimplemented("CMP", "B", Register),
    /* 0xB9 */ unimplemented("CMP", "C", Register),
    /* 0xBA */ unimplemented("CMP", "D", Register),
    /* 0xBB */ unimplemented("CMP", "E", Register),
    /* 0xBC */ unimplemented("CMP", "H", Register),
    /* 0xBD */ unimplemented("CMP", "L", Register),
    /* 0xBE */ unimplemented("CMP", "M", RegisterIndirect),
    /* 0xBF */ unimplemented("CMP", "A", Register),
    /* 0xC0 */ implemented("RNZ", "", Implied, Return),
    /* 0xC1 */ unimplemented("POP", "B", Register),
    /* 0xC2 */ implemented("JNZ", "", Direct, Jump),
    /* 0xC3 */ implemented("JMP", "", Direct, Jump),
    /* 0xC4 */ implemented("CNZ", "", Direct, Call),
    /* 0xC5 */ unimplemented("PUSH", "B", Register),
    /* 0xC6 */ implemented("ADI", "", Immediate, AluImmediate),
    /* 0xC7 */ implemented("RST", "0", Implied, Restart),
    /* 0xC8 */ implemented("RZ", "", Implied, Return),
    /* 0xC9 */ implemented("RET", "", Implied, Return),
    /* 0xCA */ implemented("JZ", "", Direct, Jump),
    /* 0xCB */ ILLEGAL,
    /* 0xCC */ implemented("CZ", "", Direct, Call),
    /* 0xCD */ implemented("CALL", "", Direct, Call),
    /* 0xCE */ implemented("ACI", "", Immediate, AluImmediate),
    /* 0xCF */ implemented("RST", "1", Implied, Restart),
    /* 0xD0 */ implemented("RNC", "", Implied, Return),
    /* 0xD1 */ unimplemented("POP", "D", Register),
    /* 0xD2 */ implemented("JNC", "", Direct, Jump),
    /* 0xD3 */ unimplemented("OUT", "", Immediate),
    /* 0xD4 */ implemented("CNC", "", Direct, Call),
    /* 0xD5 */ unimplemented("PUSH", "D", Register),
    /* 0xD6 */ implemented("SUI", "", Immediate, AluImmediate),
    /* 0xD7 */ implemented("RST", "2", Implied, Restart),
    /* 0xD8 */ implemented("RC", "", Implied, Return),
    /* 0xD9 */ ILLEGAL,
    /* 0xDA */ implemented("JC", "", Direct, Jump),
    /* 0xDB */ unimplemented("IN", "", Immediate),
    /* 0xDC */ implemented("CC", "", Direct, Call),
    /* 0xDD */ ILLEGAL,
    /* 0xDE */ unimplemented("SBI", "", Immediate),
    /* 0xDF */ implemented("RST", "3", Implied, Restart),
    /* 0xE0 */ implemented("RPO", "", Implied, Return),
    /* 0xE1 */ unimplemented("POP", "H", Register),
    /* 0xE2 */ implemented("JPO", "", Direct, Jump),
    /* 0xE3 */ unimplemented("XTHL", "", Implied),
    /* 0xE4 */ implemented("CPO", "", Direct, Call),
    /* 0xE5 */ unimplemented("PUSH", "H", Register),
    /* 0xE6 */ unimplemented("ANI", "", Immediate),
    /* 0xE7 */ implemented("RST", "4", Implied, Restart),
    /* 0xE8 */ implemented("RPE", "", Implied, Return),
    /* 0xE9 */ implemented("PCHL", "", Implied, JumpHl),
    /* 0xEA */ implemented("JPE", "", Direct, Jump),
    /* 0xEB */ unimplemented("XCHG", "", Implied),
    /* 0xEC */ implemented("CPE", "", Direct, Call),
    /* 0xED */ ILLEGAL,
    /* 0xEE */ unimplemented("XRI", "", Immediate),
    /* 0xEF */ implemented("RST", "5", Implied, Restart),
    /* 0xF0 */ implemented("RP", "", Implied, Return),
    /* 0xF1 */ unimplemented("POP", "PSW", Register),
    /* 0xF2 */ implemented("JP", "", Direct, Jump),
    /* 0xF3 */ unimplemented("DI", "", Implied),
    /* 0xF4 */ implemented("CP", "", Direct, Call),
    /* 0xF5 */ unimplemented("PUSH", "PSW", Register),
    /* 0xF6 */ unimplemented("ORI", "", Immediate),
    /* 0xF7 */ implemented("RST", "6", Implied, Restart),
    /* 0xF8 */ implemented("RM", "", Implied, Return),
    /* 0xF9 */ unimplemented("SPHL", "", Implied),
    /* 0xFA */ implemented("JM", "", Direct, Jump),
    /* 0xFB */ unimplemented("EI", "", Implied),
    /* 0xFC */ implemented("CM", "", Direct, Call),
    /* 0xFD */ ILLEGAL,
    /* 0xFE */ implemented("CPI", "", Immediate, CompareImmediate),
    /* 0xFF */ implemented("RST", "7", Implied, Restart),
];
