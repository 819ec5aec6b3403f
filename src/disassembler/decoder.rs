//! Instruction decoder for the 8080 disassembler

use crate::disassembler::Instruction;
use crate::opcodes::OPCODE_TABLE;

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
///
/// # Returns
///
/// Some(Instruction) if the opcode is documented and all its operand bytes
/// are present, None otherwise
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let opcode = *bytes.first()?;
    let metadata = &OPCODE_TABLE[opcode as usize];

    if metadata.is_illegal() {
        return None;
    }

    let size = metadata.size_bytes as usize;
    let operand_bytes = bytes.get(1..size)?.to_vec();

    Some(Instruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        operands: metadata.operands,
        addressing_mode: metadata.addressing_mode,
        operand_bytes,
        size_bytes: metadata.size_bytes,
        implemented: metadata.implemented,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::AddressingMode;

    #[test]
    fn test_decode_mvi() {
        let bytes = &[0x3E, 0x42];
        let instr = decode_instruction(bytes, 0x0100).unwrap();

        assert_eq!(instr.address, 0x0100);
        assert_eq!(instr.opcode, 0x3E);
        assert_eq!(instr.mnemonic, "MVI");
        assert_eq!(instr.operands, "A");
        assert_eq!(instr.addressing_mode, AddressingMode::Immediate);
        assert_eq!(instr.operand_bytes, vec![0x42]);
        assert_eq!(instr.size_bytes, 2);
        assert!(!instr.implemented);
    }

    #[test]
    fn test_decode_jmp() {
        let bytes = &[0xC3, 0x00, 0x80];
        let instr = decode_instruction(bytes, 0x0000).unwrap();

        assert_eq!(instr.mnemonic, "JMP");
        assert_eq!(instr.addressing_mode, AddressingMode::Direct);
        assert_eq!(instr.operand_bytes, vec![0x00, 0x80]);
        assert_eq!(instr.size_bytes, 3);
        assert!(instr.implemented);
    }

    #[test]
    fn test_decode_mov() {
        let instr = decode_instruction(&[0x41], 0x1000).unwrap();

        assert_eq!(instr.mnemonic, "MOV");
        assert_eq!(instr.operands, "B,C");
        assert_eq!(instr.operand_bytes.len(), 0);
        assert_eq!(instr.size_bytes, 1);
    }

    #[test]
    fn test_decode_rejects_illegal_and_truncated() {
        assert!(decode_instruction(&[], 0).is_none());
        assert!(decode_instruction(&[0xCB], 0).is_none());
        assert!(decode_instruction(&[0xCD, 0x34], 0).is_none());
    }
}
