//! # Intel 8080 Interpreter Core
//!
//! An instruction-set interpreter for the Intel 8080, with a table-driven
//! disassembler and optional WebAssembly bindings.
//!
//! The interpreter fetches one opcode at a time from a flat program image,
//! decodes it through a 256-entry opcode table, and mutates the machine state
//! until the program halts or reaches an opcode it does not implement.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib8080::{CPU, ImageMemory};
//!
//! // INR A; INR A; HLT; padding
//! let memory = ImageMemory::from_image(vec![0x3C, 0x3C, 0x76, 0x00]).unwrap();
//! let mut cpu = CPU::new(memory);
//!
//! cpu.run().unwrap();
//! assert_eq!(cpu.a(), 0x02);
//! assert!(cpu.is_halted());
//! ```
//!
//! ## Modules
//!
//! - `cpu` - Machine state and the fetch-decode-execute loop
//! - `memory` - MemoryBus trait and the flat image memory
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumeration
//! - `registers` - Register and register-pair operand decoding
//! - `quirks` - Control-transfer compatibility switches
//! - `disassembler` - Byte buffer to assembly listing

pub mod addressing;
pub mod cpu;
pub mod disassembler;
pub mod memory;
pub mod opcodes;
pub mod quirks;
pub mod registers;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

use thiserror::Error;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{StepResult, CPU};
pub use disassembler::{
    disassemble, format_instruction, format_listing, DisassemblyOptions, Instruction,
};
pub use instructions::flags::parity;
pub use memory::{BusError, ImageError, ImageMemory, MemoryBus, MAX_IMAGE_SIZE};
pub use opcodes::{OpcodeMetadata, Operation, OPCODE_TABLE};
pub use quirks::Quirks;
pub use registers::{Register, RegisterPair};

/// Errors that can occur during CPU execution.
///
/// All of them are fatal for the program being run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The opcode at `pc` has no handler in this interpreter.
    #[error("unimplemented instruction 0x{opcode:02X} at 0x{pc:04X}")]
    UnimplementedInstruction { opcode: u8, pc: u16 },

    /// An opcode or operand byte lies past the end of memory.
    #[error("instruction fetch at 0x{address:04X} is past the end of memory ({size} bytes)")]
    OutOfBoundsFetch { address: u16, size: usize },

    /// An instruction read or wrote data outside memory.
    #[error("data access at 0x{address:04X} is outside memory ({size} bytes)")]
    OutOfBoundsAccess { address: u16, size: usize },
}

impl From<BusError> for ExecutionError {
    fn from(err: BusError) -> Self {
        ExecutionError::OutOfBoundsAccess {
            address: err.address,
            size: err.size,
        }
    }
}
