//! WASM API for the 8080 interpreter.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection
//! and disassembly.

use crate::{
    disassemble, format_instruction, DisassemblyOptions, ImageMemory, Quirks, StepResult, CPU,
};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// One line of disassembly
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
    implemented: bool,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn implemented(&self) -> bool {
        self.implemented
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator8080 {
    cpu: CPU<ImageMemory>,
    image: Vec<u8>,
}

#[wasm_bindgen]
impl Emulator8080 {
    /// Create an interpreter over a program image loaded at address 0
    #[wasm_bindgen(constructor)]
    pub fn new(image: &[u8], legacy: bool) -> Result<Emulator8080, JsError> {
        let memory =
            ImageMemory::from_slice(image).map_err(|e| JsError::new(&e.to_string()))?;
        let quirks = if legacy {
            Quirks::legacy()
        } else {
            Quirks::exact()
        };

        Ok(Emulator8080 {
            cpu: CPU::with_quirks(memory, quirks),
            image: image.to_vec(),
        })
    }

    /// Execute a single instruction.
    ///
    /// Returns "continued", "halted" or an "unimplemented ..." description.
    pub fn step(&mut self) -> Result<String, JsError> {
        self.cpu
            .step()
            .map(describe)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Execute up to `budget` instructions, stopping early on HLT or an
    /// unimplemented opcode
    pub fn run_for_steps(&mut self, budget: u32) -> Result<String, JsError> {
        self.cpu
            .run_for_steps(budget as u64)
            .map(describe)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Restore the original image and zero the machine state
    pub fn reset(&mut self) -> Result<(), JsError> {
        let memory =
            ImageMemory::from_slice(&self.image).map_err(|e| JsError::new(&e.to_string()))?;
        self.cpu = CPU::with_quirks(memory, self.cpu.quirks());
        Ok(())
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn bc(&self) -> u16 {
        self.cpu.bc()
    }

    #[wasm_bindgen(getter)]
    pub fn de(&self) -> u16 {
        self.cpu.de()
    }

    #[wasm_bindgen(getter)]
    pub fn hl(&self) -> u16 {
        self.cpu.hl()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u16 {
        self.cpu.sp()
    }

    /// Packed condition codes (S Z 0 AC 0 P 1 CY)
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn steps(&self) -> f64 {
        self.cpu.steps() as f64 // Convert u64 to f64 for JavaScript
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    /// Copy of the whole memory image
    pub fn memory(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.cpu.memory().as_slice())
    }

    /// Disassemble the loaded image
    pub fn disassemble(&self) -> Vec<JsValue> {
        disassemble(self.cpu.memory().as_slice(), DisassemblyOptions::default())
            .iter()
            .map(|instr| {
                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes: instr.bytes(),
                    text: format_instruction(instr),
                    implemented: instr.implemented,
                })
            })
            .collect()
    }
}

fn describe(result: StepResult) -> String {
    match result {
        StepResult::Continued => "continued".to_string(),
        StepResult::Halted => "halted".to_string(),
        StepResult::Unimplemented { opcode, pc } => {
            format!("unimplemented 0x{:02X} at 0x{:04X}", opcode, pc)
        }
    }
}
