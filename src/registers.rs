//! # Register Operands
//!
//! 8080 opcodes name their register operands in three-bit (`Register`) and
//! two-bit (`RegisterPair`) fields. These enums decode those fields.

/// An 8-bit operand named by a three-bit register code.
///
/// Code 6 is `M`: the byte in memory at the address held in H/L.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    B,
    C,
    D,
    E,
    H,
    L,
    M,
    A,
}

impl Register {
    /// Decodes the low three bits of `code`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8080::Register;
    ///
    /// assert_eq!(Register::from_code(0), Register::B);
    /// assert_eq!(Register::from_code(6), Register::M);
    /// assert_eq!(Register::from_code(0x0F), Register::A);
    /// ```
    pub const fn from_code(code: u8) -> Self {
        match code & 0x07 {
            0 => Register::B,
            1 => Register::C,
            2 => Register::D,
            3 => Register::E,
            4 => Register::H,
            5 => Register::L,
            6 => Register::M,
            _ => Register::A,
        }
    }

    /// Destination register of MOV/INR/DCR (opcode bits 3-5).
    pub const fn destination(opcode: u8) -> Self {
        Self::from_code(opcode >> 3)
    }

    /// Source register of MOV and the ALU register forms (opcode bits 0-2).
    pub const fn source(opcode: u8) -> Self {
        Self::from_code(opcode)
    }
}

/// A 16-bit register pair named by opcode bits 4-5.
///
/// Slot 3 is the stack pointer for LXI, DAD, INX and DCX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterPair {
    BC,
    DE,
    HL,
    SP,
}

impl RegisterPair {
    /// Decodes opcode bits 4-5.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8080::RegisterPair;
    ///
    /// assert_eq!(RegisterPair::from_opcode(0x01), RegisterPair::BC); // LXI B
    /// assert_eq!(RegisterPair::from_opcode(0x29), RegisterPair::HL); // DAD H
    /// assert_eq!(RegisterPair::from_opcode(0x3B), RegisterPair::SP); // DCX SP
    /// ```
    pub const fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 4) & 0x03 {
            0 => RegisterPair::BC,
            1 => RegisterPair::DE,
            2 => RegisterPair::HL,
            _ => RegisterPair::SP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mov_fields() {
        // MOV D,M = 0x56
        assert_eq!(Register::destination(0x56), Register::D);
        assert_eq!(Register::source(0x56), Register::M);
        // MOV M,A = 0x77
        assert_eq!(Register::destination(0x77), Register::M);
        assert_eq!(Register::source(0x77), Register::A);
    }

    #[test]
    fn test_inr_dcr_fields() {
        assert_eq!(Register::destination(0x3C), Register::A); // INR A
        assert_eq!(Register::destination(0x35), Register::M); // DCR M
        assert_eq!(Register::destination(0x0C), Register::C); // INR C
    }

    #[test]
    fn test_pair_fields() {
        assert_eq!(RegisterPair::from_opcode(0x13), RegisterPair::DE); // INX D
        assert_eq!(RegisterPair::from_opcode(0x39), RegisterPair::SP); // DAD SP
    }
}
