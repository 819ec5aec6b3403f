//! 8080 Disassembler Module
//!
//! Converts binary machine code into human-readable assembly mnemonics using
//! the same opcode table the CPU executes from.

pub mod decoder;
pub mod formatter;

pub use formatter::{format_instruction, format_listing};

use crate::addressing::AddressingMode;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "MOV", "LXI", "JNZ"), or ".byte"
    pub mnemonic: &'static str,

    /// Register operands encoded in the opcode (e.g., "B,C", "SP")
    pub operands: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Whether the interpreter executes this opcode
    pub implemented: bool,
}

impl Instruction {
    /// All bytes of the instruction, opcode first.
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size_bytes as usize);
        bytes.push(self.opcode);
        if self.mnemonic != ".byte" {
            bytes.extend_from_slice(&self.operand_bytes);
        }
        bytes
    }
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy, Default)]
pub struct DisassemblyOptions {
    /// Starting address for disassembly (affects address display)
    pub start_address: u16,

    /// Whether to include the raw instruction bytes in listings
    pub hex_dump: bool,

    /// Whether to mark opcodes the interpreter does not execute
    pub mark_unimplemented: bool,
}

/// Disassemble a byte slice into a vector of instructions
///
/// Undocumented opcodes and instructions cut off by the end of the buffer
/// become one-byte `.byte` entries.
///
/// # Examples
///
/// ```
/// use lib8080::{disassemble, format_instruction, DisassemblyOptions};
///
/// let listing = disassemble(&[0x21, 0x00, 0x20, 0x7E, 0x76], DisassemblyOptions::default());
/// let text: Vec<String> = listing.iter().map(format_instruction).collect();
///
/// assert_eq!(text, vec!["LXI H,#$2000", "MOV A,M", "HLT"]);
/// ```
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    let mut address = options.start_address;

    while pc < bytes.len() {
        match decoder::decode_instruction(&bytes[pc..], address) {
            Some(instr) => {
                pc += instr.size_bytes as usize;
                address = address.wrapping_add(instr.size_bytes as u16);
                instructions.push(instr);
            }
            None => {
                instructions.push(Instruction {
                    address,
                    opcode: bytes[pc],
                    mnemonic: ".byte",
                    operands: "",
                    addressing_mode: AddressingMode::Implied,
                    operand_bytes: vec![bytes[pc]],
                    size_bytes: 1,
                    implemented: false,
                });
                pc += 1;
                address = address.wrapping_add(1);
            }
        }
    }

    instructions
}
