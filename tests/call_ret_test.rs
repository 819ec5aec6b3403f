//! Tests for CALL, RET, RST and PCHL.
//!
//! Tests cover:
//! - Stack layout of a pushed return address
//! - CALL / RET round trips with exact and legacy quirks
//! - Conditional calls and returns
//! - RST vectors and the address they push
//! - PCHL
//! - Stack overflow past the image

use lib8080::{ExecutionError, ImageMemory, MemoryBus, Quirks, CPU};

/// Helper function to create a CPU over a 256-byte image starting with `program`
fn setup_cpu(program: &[u8]) -> CPU<ImageMemory> {
    let mut image = vec![0u8; 0x100];
    image[..program.len()].copy_from_slice(program);
    CPU::new(ImageMemory::from_image(image).unwrap())
}

/// Places `bytes` at `address`.
fn poke(cpu: &mut CPU<ImageMemory>, address: u16, bytes: &[u8]) {
    for (offset, byte) in bytes.iter().enumerate() {
        cpu.memory_mut().write(address + offset as u16, *byte).unwrap();
    }
}

// ========== CALL ==========

#[test]
fn test_call_pushes_return_address() {
    let mut cpu = setup_cpu(&[0xCD, 0x10, 0x00]); // CALL $0010
    cpu.set_sp(0x00F0);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0010);
    assert_eq!(cpu.sp(), 0x00EE);
    assert_eq!(cpu.memory().read(0x00EF), Ok(0x00)); // high
    assert_eq!(cpu.memory().read(0x00EE), Ok(0x03)); // low
}

#[test]
fn test_call_ret_round_trip() {
    let mut cpu = setup_cpu(&[0xCD, 0x10, 0x00, 0x76]); // CALL $0010; HLT
    poke(&mut cpu, 0x0010, &[0x3C, 0xC9]); // INR A; RET
    cpu.set_sp(0x00F0);

    cpu.run().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert_eq!(cpu.sp(), 0x00F0);
    assert_eq!(cpu.pc(), 0x0004);
}

#[test]
fn test_legacy_call_ret() {
    let mut cpu = setup_cpu(&[0xCD, 0x10, 0x00]); // CALL $0010
    poke(&mut cpu, 0x0011, &[0xC9]); // RET, one past the target
    cpu.set_quirks(Quirks::legacy());
    cpu.set_sp(0x00F0);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0011);
    assert_eq!(cpu.sp(), 0x00EE);
    assert_eq!(cpu.memory().read(0x00EE), Ok(0x02));

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0003);
    // RET read the return address without popping it
    assert_eq!(cpu.sp(), 0x00EE);
}

#[test]
fn test_conditional_call_not_taken() {
    let mut cpu = setup_cpu(&[0xCC, 0x10, 0x00]); // CZ $0010
    cpu.set_sp(0x00F0);
    cpu.set_flag_z(false);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0003);
    assert_eq!(cpu.sp(), 0x00F0);
}

#[test]
fn test_conditional_call_taken() {
    let mut cpu = setup_cpu(&[0xDC, 0x20, 0x00]); // CC $0020
    cpu.set_sp(0x00F0);
    cpu.set_flag_cy(true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0020);
    assert_eq!(cpu.sp(), 0x00EE);
}

#[test]
fn test_call_with_stack_at_zero_is_out_of_bounds() {
    let mut cpu = setup_cpu(&[0xCD, 0x10, 0x00]); // CALL $0010

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::OutOfBoundsAccess {
            address: 0xFFFF,
            size: 0x100
        })
    );
    assert_eq!(cpu.pc(), 0x0000);
    assert_eq!(cpu.sp(), 0x0000);
}

// ========== RET ==========

#[test]
fn test_conditional_return_not_taken() {
    let mut cpu = setup_cpu(&[0xC0]); // RNZ
    cpu.set_sp(0x00F0);
    cpu.set_flag_z(true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0001);
    assert_eq!(cpu.sp(), 0x00F0);
}

#[test]
fn test_conditional_return_taken() {
    let mut cpu = setup_cpu(&[0xF8]); // RM
    poke(&mut cpu, 0x00F0, &[0x34, 0x00]);
    cpu.set_sp(0x00F0);
    cpu.set_flag_s(true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0034);
    assert_eq!(cpu.sp(), 0x00F2);
}

#[test]
fn test_ret_past_end_is_out_of_bounds() {
    let mut cpu = setup_cpu(&[0xC9]); // RET
    cpu.set_sp(0x00FF);

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::OutOfBoundsAccess {
            address: 0x0100,
            size: 0x100
        })
    );
}

// ========== RST ==========

#[test]
fn test_rst_vectors() {
    let opcodes = [0xC7, 0xCF, 0xD7, 0xDF, 0xE7, 0xEF, 0xF7, 0xFF];

    for (n, opcode) in opcodes.into_iter().enumerate() {
        let mut cpu = setup_cpu(&[]);
        poke(&mut cpu, 0x0080, &[opcode]);
        cpu.set_pc(0x0080);
        cpu.set_sp(0x00F0);

        cpu.step().unwrap();

        assert_eq!(cpu.pc(), 8 * n as u16, "RST {}", n);
        assert_eq!(cpu.sp(), 0x00EE);
        assert_eq!(cpu.memory().read(0x00EE), Ok(0x81));
    }
}

#[test]
fn test_legacy_rst_and_return() {
    let mut cpu = setup_cpu(&[]);
    poke(&mut cpu, 0x0009, &[0xC9]); // RET one past vector 1
    poke(&mut cpu, 0x0020, &[0xCF]); // RST 1
    cpu.set_quirks(Quirks::legacy());
    cpu.set_pc(0x0020);
    cpu.set_sp(0x00F0);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0009);
    assert_eq!(cpu.memory().read(0x00EE), Ok(0x20));

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0021);
}

// ========== PCHL ==========

#[test]
fn test_pchl() {
    let mut cpu = setup_cpu(&[0xE9]); // PCHL
    cpu.set_hl(0x0040);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0040);
}

#[test]
fn test_legacy_pchl() {
    let mut cpu = setup_cpu(&[0xE9]); // PCHL
    cpu.set_quirks(Quirks::legacy());
    cpu.set_hl(0x0040);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0041);
}
