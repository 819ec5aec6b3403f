//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary CPU states and memory contents,
//! then executes a few instructions to find edge cases and crashes.

#![no_main]

use arbitrary::Arbitrary;
use lib8080::{ImageMemory, MemoryBus, Quirks, StepResult, CPU};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    bc: u16,
    de: u16,
    hl: u16,
    sp: u16,
    pc: u16,
    flag_z: bool,
    flag_s: bool,
    flag_p: bool,
    flag_cy: bool,
    /// Use the legacy control-transfer quirks
    legacy: bool,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Program image; empty images are rejected by the loader
    image: Vec<u8>,
    /// Number of instructions to execute
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(memory) = ImageMemory::from_image(input.image) else {
        return;
    };
    let size = memory.size();

    let quirks = if input.cpu_state.legacy {
        Quirks::legacy()
    } else {
        Quirks::exact()
    };
    let mut cpu = CPU::with_quirks(memory, quirks);

    cpu.set_a(input.cpu_state.a);
    cpu.set_bc(input.cpu_state.bc);
    cpu.set_de(input.cpu_state.de);
    cpu.set_hl(input.cpu_state.hl);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_pc(input.cpu_state.pc);
    cpu.set_flag_z(input.cpu_state.flag_z);
    cpu.set_flag_s(input.cpu_state.flag_s);
    cpu.set_flag_p(input.cpu_state.flag_p);
    cpu.set_flag_cy(input.cpu_state.flag_cy);

    for _ in 0..input.steps {
        let before = (cpu.pc(), cpu.sp(), cpu.status(), cpu.steps());
        match cpu.step() {
            Ok(StepResult::Continued) => {}
            Ok(StepResult::Halted) => break,
            Ok(StepResult::Unimplemented { pc, .. }) => {
                // Nothing may change on an unimplemented opcode
                assert_eq!(pc, before.0);
                assert_eq!((cpu.pc(), cpu.sp(), cpu.status(), cpu.steps()), before);
                break;
            }
            Err(_) => {
                // Errors are reported before any state is committed
                assert_eq!((cpu.pc(), cpu.sp(), cpu.steps()), (before.0, before.1, before.3));
                break;
            }
        }
    }

    // Memory never grows or shrinks
    assert_eq!(cpu.memory().size(), size);
    assert!(!cpu.flag_ac());
});
