//! Formatting functions for disassembled instructions

use crate::addressing::AddressingMode;
use crate::disassembler::{DisassemblyOptions, Instruction};

/// Format a single instruction as assembly text
///
/// # Arguments
///
/// * `instr` - The instruction to format
///
/// # Returns
///
/// A string such as `MOV A,M`, `MVI B,#$10` or `CALL $0200`
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Format a whole listing, one instruction per line
///
/// Each line starts with the 4-digit address. With `hex_dump` the raw bytes
/// follow in a fixed-width column; with `mark_unimplemented` opcodes the
/// interpreter does not execute get a trailing comment.
pub fn format_listing(instructions: &[Instruction], options: &DisassemblyOptions) -> String {
    let mut out = String::new();

    for instr in instructions {
        out.push_str(&format!("{:04X}  ", instr.address));

        if options.hex_dump {
            let hex: Vec<String> = instr.bytes().iter().map(|b| format!("{:02X}", b)).collect();
            out.push_str(&format!("{:<10}", hex.join(" ")));
        }

        out.push_str(&format_instruction(instr));

        if options.mark_unimplemented && !instr.implemented && instr.mnemonic != ".byte" {
            out.push_str("  ; unimplemented");
        }
        out.push('\n');
    }

    out
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    // Special case for .byte directive (undocumented or truncated)
    if instr.mnemonic == ".byte" {
        return format!("${:02X}", instr.opcode);
    }

    let value = match instr.addressing_mode {
        Implied | Register | RegisterIndirect => return instr.operands.to_string(),
        Immediate => match instr.operand_bytes.first() {
            Some(byte) => format!("#${:02X}", byte),
            None => "#$??".to_string(),
        },
        ImmediateWord => match word(instr) {
            Some(word) => format!("#${:04X}", word),
            None => "#$????".to_string(),
        },
        Direct => match word(instr) {
            Some(addr) => format!("${:04X}", addr),
            None => "$????".to_string(),
        },
    };

    if instr.operands.is_empty() {
        value
    } else {
        format!("{},{}", instr.operands, value)
    }
}

fn word(instr: &Instruction) -> Option<u16> {
    match instr.operand_bytes.as_slice() {
        [low, high, ..] => Some(u16::from_le_bytes([*low, *high])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instruction(
        opcode: u8,
        mnemonic: &'static str,
        operands: &'static str,
        addressing_mode: AddressingMode,
        operand_bytes: Vec<u8>,
    ) -> Instruction {
        Instruction {
            address: 0x0100,
            opcode,
            mnemonic,
            operands,
            addressing_mode,
            size_bytes: 1 + operand_bytes.len() as u8,
            operand_bytes,
            implemented: true,
        }
    }

    #[test]
    fn test_format_immediate() {
        let adi = instruction(0xC6, "ADI", "", AddressingMode::Immediate, vec![0x42]);
        assert_eq!(format_instruction(&adi), "ADI #$42");

        let mvi = instruction(0x06, "MVI", "B", AddressingMode::Immediate, vec![0x10]);
        assert_eq!(format_instruction(&mvi), "MVI B,#$10");
    }

    #[test]
    fn test_format_immediate_word() {
        let lxi = instruction(
            0x31,
            "LXI",
            "SP",
            AddressingMode::ImmediateWord,
            vec![0x00, 0x24],
        );
        assert_eq!(format_instruction(&lxi), "LXI SP,#$2400");
    }

    #[test]
    fn test_format_direct() {
        let call = instruction(0xCD, "CALL", "", AddressingMode::Direct, vec![0x00, 0x80]);
        assert_eq!(format_instruction(&call), "CALL $8000");
    }

    #[test]
    fn test_format_register_and_implied() {
        let mov = instruction(0x7E, "MOV", "A,M", AddressingMode::RegisterIndirect, vec![]);
        assert_eq!(format_instruction(&mov), "MOV A,M");

        let rst = instruction(0xFF, "RST", "7", AddressingMode::Implied, vec![]);
        assert_eq!(format_instruction(&rst), "RST 7");

        let hlt = instruction(0x76, "HLT", "", AddressingMode::Implied, vec![]);
        assert_eq!(format_instruction(&hlt), "HLT");
    }

    #[test]
    fn test_format_illegal_opcode() {
        let instr = Instruction {
            address: 0x2000,
            opcode: 0xCB,
            mnemonic: ".byte",
            operands: "",
            addressing_mode: AddressingMode::Implied,
            operand_bytes: vec![0xCB],
            size_bytes: 1,
            implemented: false,
        };

        assert_eq!(format_instruction(&instr), ".byte $CB");
    }

    #[test]
    fn test_format_listing() {
        let mut mvi = instruction(0x3E, "MVI", "A", AddressingMode::Immediate, vec![0x07]);
        mvi.implemented = false;
        let mut hlt = instruction(0x76, "HLT", "", AddressingMode::Implied, vec![]);
        hlt.address = 0x0102;

        let options = DisassemblyOptions {
            hex_dump: true,
            mark_unimplemented: true,
            ..Default::default()
        };
        let listing = format_listing(&[mvi, hlt], &options);

        assert_eq!(
            listing,
            "0100  3E 07     MVI A,#$07  ; unimplemented\n0102  76        HLT\n"
        );
    }
}
