//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 8080 machine state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A) and B, C, D, E, H, L, also read as the
//!   pairs BC, DE and HL (first register is the high byte)
//! - **Program counter** (PC) and **stack pointer** (SP), both byte offsets
//!   into the memory image
//! - **Condition codes**: Z, S, P, CY and an inert auxiliary carry (AC)
//! - **Interrupt enable**: persisted, never consulted
//!
//! ## Execution Model
//!
//! - `step()`: Execute one instruction
//! - `run()`: Execute until HLT or an unimplemented opcode
//! - `run_for_steps()`: Execute at most a fixed number of instructions

use log::{debug, trace};

use crate::instructions::{self, Flow};
use crate::memory::BusError;
use crate::opcodes::Operation;
use crate::{ExecutionError, MemoryBus, Quirks, Register, RegisterPair, OPCODE_TABLE};

/// Outcome of a single `step()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// An instruction executed; the CPU is ready for the next one.
    Continued,

    /// HLT executed (now or earlier). Further steps do nothing.
    Halted,

    /// The opcode at `pc` has no handler. `pc` still points at it.
    Unimplemented { opcode: u8, pc: u16 },
}

/// 8080 CPU state and execution context.
///
/// The CPU owns its memory. It is generic over the memory implementation via
/// the `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use lib8080::{CPU, ImageMemory, StepResult};
///
/// // INR A; INR A; HLT
/// let memory = ImageMemory::from_image(vec![0x3C, 0x3C, 0x76, 0x00]).unwrap();
/// let mut cpu = CPU::new(memory);
///
/// assert_eq!(cpu.step(), Ok(StepResult::Continued));
/// assert_eq!(cpu.step(), Ok(StepResult::Continued));
/// assert_eq!(cpu.step(), Ok(StepResult::Halted));
/// assert_eq!(cpu.a(), 0x02);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator
    pub(crate) a: u8,
    pub(crate) b: u8,
    pub(crate) c: u8,
    pub(crate) d: u8,
    pub(crate) e: u8,
    pub(crate) h: u8,
    pub(crate) l: u8,

    /// Program counter (offset of next opcode)
    pub(crate) pc: u16,

    /// Stack pointer, grows toward lower addresses
    pub(crate) sp: u16,

    /// Zero flag (set if low byte of result is 0)
    pub(crate) flag_z: bool,

    /// Sign flag (set if bit 7 of result is 1)
    pub(crate) flag_s: bool,

    /// Parity flag (set if result has an even number of 1 bits)
    pub(crate) flag_p: bool,

    /// Carry flag
    pub(crate) flag_cy: bool,

    /// Auxiliary carry. Always false: no instruction writes it.
    pub(crate) flag_ac: bool,

    /// Interrupt enable. Persisted only.
    pub(crate) int_enable: bool,

    /// Latched by HLT.
    pub(crate) halted: bool,

    /// Instructions executed since creation
    pub(crate) steps: u64,

    pub(crate) quirks: Quirks,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU over `memory` with every register, flag and pointer
    /// zeroed, using exact control-transfer behaviour.
    pub fn new(memory: M) -> Self {
        Self::with_quirks(memory, Quirks::default())
    }

    /// Creates a new CPU with the given control-transfer quirks.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8080::{CPU, ImageMemory, Quirks};
    ///
    /// // JMP $0003
    /// let memory = ImageMemory::from_image(vec![0xC3, 0x03, 0x00, 0x76, 0x76]).unwrap();
    /// let mut cpu = CPU::with_quirks(memory, Quirks::legacy());
    /// cpu.step().unwrap();
    ///
    /// // Lands one byte past the target
    /// assert_eq!(cpu.pc(), 0x0004);
    /// ```
    pub fn with_quirks(memory: M, quirks: Quirks) -> Self {
        Self {
            a: 0,
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            pc: 0,
            sp: 0,
            flag_z: false,
            flag_s: false,
            flag_p: false,
            flag_cy: false,
            flag_ac: false,
            int_enable: false,
            halted: false,
            steps: 0,
            quirks,
            memory,
        }
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Fetch opcode byte at current PC
    /// 2. Look up instruction metadata in opcode table
    /// 3. Report opcodes with no handler family without touching any state
    /// 4. Fetch the operand bytes the addressing mode calls for
    /// 5. Execute, then either advance PC past the instruction or land on the
    ///    transfer target
    ///
    /// # Errors
    ///
    /// - `OutOfBoundsFetch` if the opcode or an operand byte lies past the
    ///   end of memory
    /// - `OutOfBoundsAccess` if the instruction reads or writes data outside
    ///   memory; the CPU is left as it was before the step
    pub fn step(&mut self) -> Result<StepResult, ExecutionError> {
        if self.halted {
            return Ok(StepResult::Halted);
        }

        let pc = self.pc;
        let opcode = self.fetch(pc)?;
        let metadata = &OPCODE_TABLE[opcode as usize];

        let Some(operation) = metadata.operation else {
            return Ok(self.trap(opcode));
        };

        let operand = match metadata.size_bytes {
            2 => self.fetch(pc.wrapping_add(1))? as u16,
            3 => {
                let low = self.fetch(pc.wrapping_add(1))?;
                let high = self.fetch(pc.wrapping_add(2))?;
                u16::from_le_bytes([low, high])
            }
            _ => 0,
        };

        trace!(
            "{:04X}: {:02X} {} {} operand={:04X}",
            pc,
            opcode,
            metadata.mnemonic,
            metadata.operands,
            operand
        );

        let flow = match operation {
            Operation::Mov => instructions::transfer::execute_mov(self, opcode)?,
            Operation::LoadPair => instructions::transfer::execute_lxi(self, opcode, operand)?,
            Operation::IncDec => instructions::inc_dec::execute_inr_dcr(self, opcode)?,
            Operation::IncDecPair => instructions::inc_dec::execute_inx_dcx(self, opcode)?,
            Operation::AddPair => instructions::alu::execute_dad(self, opcode)?,
            Operation::AluRegister => instructions::alu::execute_register(self, opcode)?,
            Operation::AluImmediate => {
                instructions::alu::execute_immediate(self, opcode, operand as u8)?
            }
            Operation::CompareImmediate => instructions::alu::execute_cpi(self, operand as u8)?,
            Operation::ComplementA => instructions::alu::execute_cma(self)?,
            Operation::ComplementCarry => instructions::flags::execute_cmc(self)?,
            Operation::SetCarry => instructions::flags::execute_stc(self)?,
            Operation::RotateRight => instructions::rotate::execute_rrc(self)?,
            Operation::RotateRightCarry => instructions::rotate::execute_rar(self)?,
            Operation::Jump => instructions::branches::execute_jump(self, opcode, operand)?,
            Operation::Call => instructions::control::execute_call(self, opcode, operand)?,
            Operation::Return => instructions::control::execute_ret(self, opcode)?,
            Operation::Restart => instructions::control::execute_rst(self, opcode)?,
            Operation::JumpHl => instructions::control::execute_pchl(self)?,
            Operation::Halt => Flow::Halt,
        };

        self.steps += 1;

        match flow {
            Flow::Next => {
                self.pc = pc.wrapping_add(metadata.size_bytes as u16);
                Ok(StepResult::Continued)
            }
            Flow::Jump(target) => {
                self.pc = self.quirks.landing(target);
                Ok(StepResult::Continued)
            }
            Flow::Halt => {
                self.pc = pc.wrapping_add(1);
                self.halted = true;
                debug!("HLT at {:04X} after {} instructions", pc, self.steps);
                Ok(StepResult::Halted)
            }
        }
    }

    /// Runs until HLT.
    ///
    /// # Errors
    ///
    /// Returns `UnimplementedInstruction` when an opcode without a handler is
    /// reached, or any error `step()` reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8080::{CPU, ExecutionError, ImageMemory};
    ///
    /// // INR A; STAX B (not executed by this interpreter)
    /// let memory = ImageMemory::from_image(vec![0x3C, 0x02]).unwrap();
    /// let mut cpu = CPU::new(memory);
    ///
    /// assert_eq!(
    ///     cpu.run(),
    ///     Err(ExecutionError::UnimplementedInstruction { opcode: 0x02, pc: 0x0001 })
    /// );
    /// ```
    pub fn run(&mut self) -> Result<(), ExecutionError> {
        loop {
            match self.step()? {
                StepResult::Continued => {}
                StepResult::Halted => return Ok(()),
                StepResult::Unimplemented { opcode, pc } => {
                    return Err(ExecutionError::UnimplementedInstruction { opcode, pc })
                }
            }
        }
    }

    /// Executes at most `budget` instructions.
    ///
    /// Returns the first `Halted` or `Unimplemented` result, or `Continued`
    /// if the budget ran out first.
    pub fn run_for_steps(&mut self, budget: u64) -> Result<StepResult, ExecutionError> {
        for _ in 0..budget {
            match self.step()? {
                StepResult::Continued => {}
                terminal => return Ok(terminal),
            }
        }
        Ok(StepResult::Continued)
    }

    fn fetch(&self, address: u16) -> Result<u8, ExecutionError> {
        self.memory
            .read(address)
            .map_err(|BusError { address, size }| {
                ExecutionError::OutOfBoundsFetch { address, size }
            })
    }

    fn trap(&self, opcode: u8) -> StepResult {
        debug!(
            "unimplemented opcode {:02X} ({}) at {:04X}",
            opcode, OPCODE_TABLE[opcode as usize].mnemonic, self.pc
        );
        StepResult::Unimplemented {
            opcode,
            pc: self.pc,
        }
    }

    // ========== Operand Access ==========

    /// Reads an 8-bit operand. `M` reads memory at H/L.
    pub(crate) fn read_register(&self, register: Register) -> Result<u8, ExecutionError> {
        Ok(match register {
            Register::B => self.b,
            Register::C => self.c,
            Register::D => self.d,
            Register::E => self.e,
            Register::H => self.h,
            Register::L => self.l,
            Register::M => self.read_data(self.hl())?,
            Register::A => self.a,
        })
    }

    /// Writes an 8-bit operand. `M` writes memory at H/L.
    pub(crate) fn write_register(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<(), ExecutionError> {
        match register {
            Register::B => self.b = value,
            Register::C => self.c = value,
            Register::D => self.d = value,
            Register::E => self.e = value,
            Register::H => self.h = value,
            Register::L => self.l = value,
            Register::M => self.write_data(self.hl(), value)?,
            Register::A => self.a = value,
        }
        Ok(())
    }

    pub(crate) fn pair(&self, pair: RegisterPair) -> u16 {
        match pair {
            RegisterPair::BC => self.bc(),
            RegisterPair::DE => self.de(),
            RegisterPair::HL => self.hl(),
            RegisterPair::SP => self.sp,
        }
    }

    pub(crate) fn set_pair(&mut self, pair: RegisterPair, value: u16) {
        match pair {
            RegisterPair::BC => self.set_bc(value),
            RegisterPair::DE => self.set_de(value),
            RegisterPair::HL => self.set_hl(value),
            RegisterPair::SP => self.sp = value,
        }
    }

    pub(crate) fn read_data(&self, address: u16) -> Result<u8, ExecutionError> {
        self.memory.read(address).map_err(ExecutionError::from)
    }

    pub(crate) fn write_data(&mut self, address: u16, value: u8) -> Result<(), ExecutionError> {
        self.memory.write(address, value).map_err(ExecutionError::from)
    }

    /// Pushes `value`: high byte at `sp-1`, low byte at `sp-2`, then `sp -= 2`.
    ///
    /// Both slots are checked before either is written.
    pub(crate) fn push_word(&mut self, value: u16) -> Result<(), ExecutionError> {
        let high_addr = self.sp.wrapping_sub(1);
        let low_addr = self.sp.wrapping_sub(2);
        for address in [high_addr, low_addr] {
            if !self.memory.contains(address) {
                return Err(ExecutionError::OutOfBoundsAccess {
                    address,
                    size: self.memory.size(),
                });
            }
        }

        let [low, high] = value.to_le_bytes();
        self.write_data(high_addr, high)?;
        self.write_data(low_addr, low)?;
        self.sp = low_addr;
        Ok(())
    }

    /// Reads the word at `sp` (low byte) and `sp+1` (high byte).
    ///
    /// `sp` is left alone; the caller decides whether to move it.
    pub(crate) fn peek_word(&self) -> Result<u16, ExecutionError> {
        let low = self.read_data(self.sp)?;
        let high = self.read_data(self.sp.wrapping_add(1))?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Sets Z, S and P from the low byte of a result.
    pub(crate) fn set_zsp(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_s = value & 0x80 != 0;
        self.flag_p = instructions::flags::parity(value);
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn c(&self) -> u8 {
        self.c
    }

    pub fn d(&self) -> u8 {
        self.d
    }

    pub fn e(&self) -> u8 {
        self.e
    }

    pub fn h(&self) -> u8 {
        self.h
    }

    pub fn l(&self) -> u8 {
        self.l
    }

    /// Returns the B/C pair as `(B << 8) | C`.
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    /// Returns the D/E pair as `(D << 8) | E`.
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    /// Returns the H/L pair as `(H << 8) | L`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8080::{CPU, ImageMemory};
    ///
    /// let mut cpu = CPU::new(ImageMemory::from_image(vec![0x76]).unwrap());
    /// cpu.set_h(0x12);
    /// cpu.set_l(0x34);
    /// assert_eq!(cpu.hl(), 0x1234);
    /// ```
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    pub fn sp(&self) -> u16 {
        self.sp
    }

    /// Returns the condition codes packed as the 8080 flag byte.
    ///
    /// Bit layout (S Z 0 AC 0 P 1 CY):
    /// - Bit 7: S (Sign)
    /// - Bit 6: Z (Zero)
    /// - Bit 4: AC (Auxiliary carry, always 0 here)
    /// - Bit 2: P (Parity)
    /// - Bit 1: always 1
    /// - Bit 0: CY (Carry)
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b0000_0010;

        if self.flag_s {
            status |= 0b1000_0000;
        }
        if self.flag_z {
            status |= 0b0100_0000;
        }
        if self.flag_ac {
            status |= 0b0001_0000;
        }
        if self.flag_p {
            status |= 0b0000_0100;
        }
        if self.flag_cy {
            status |= 0b0000_0001;
        }

        status
    }

    /// Returns the number of instructions executed since creation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns true once HLT has executed.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.int_enable
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// Returns an immutable reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and returns its memory.
    pub fn into_memory(self) -> M {
        self.memory
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Sign flag is set.
    pub fn flag_s(&self) -> bool {
        self.flag_s
    }

    /// Returns true if the Parity flag is set (even parity).
    pub fn flag_p(&self) -> bool {
        self.flag_p
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_cy(&self) -> bool {
        self.flag_cy
    }

    /// Returns the Auxiliary Carry flag. No instruction writes it.
    pub fn flag_ac(&self) -> bool {
        self.flag_ac
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_b(&mut self, value: u8) {
        self.b = value;
    }

    pub fn set_c(&mut self, value: u8) {
        self.c = value;
    }

    pub fn set_d(&mut self, value: u8) {
        self.d = value;
    }

    pub fn set_e(&mut self, value: u8) {
        self.e = value;
    }

    pub fn set_h(&mut self, value: u8) {
        self.h = value;
    }

    pub fn set_l(&mut self, value: u8) {
        self.l = value;
    }

    pub fn set_bc(&mut self, value: u16) {
        [self.b, self.c] = value.to_be_bytes();
    }

    pub fn set_de(&mut self, value: u16) {
        [self.d, self.e] = value.to_be_bytes();
    }

    pub fn set_hl(&mut self, value: u16) {
        [self.h, self.l] = value.to_be_bytes();
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u16) {
        self.sp = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    pub fn set_flag_s(&mut self, value: bool) {
        self.flag_s = value;
    }

    pub fn set_flag_p(&mut self, value: bool) {
        self.flag_p = value;
    }

    pub fn set_flag_cy(&mut self, value: bool) {
        self.flag_cy = value;
    }

    /// Sets the Auxiliary Carry bit. Instructions neither read nor write it.
    pub fn set_flag_ac(&mut self, value: bool) {
        self.flag_ac = value;
    }

    pub fn set_interrupts_enabled(&mut self, value: bool) {
        self.int_enable = value;
    }

    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.quirks = quirks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageMemory;

    fn cpu_with(program: &[u8]) -> CPU<ImageMemory> {
        CPU::new(ImageMemory::from_slice(program).unwrap())
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = cpu_with(&[0x76]);

        assert_eq!(cpu.pc(), 0x0000);
        assert_eq!(cpu.sp(), 0x0000);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.bc(), 0x0000);
        assert_eq!(cpu.de(), 0x0000);
        assert_eq!(cpu.hl(), 0x0000);
        assert_eq!(cpu.steps(), 0);

        assert!(!cpu.flag_z());
        assert!(!cpu.flag_s());
        assert!(!cpu.flag_p());
        assert!(!cpu.flag_cy());
        assert!(!cpu.flag_ac());
        assert!(!cpu.interrupts_enabled());
        assert!(!cpu.is_halted());
        assert_eq!(cpu.quirks(), Quirks::exact());
    }

    #[test]
    fn test_status_register_packing() {
        let mut cpu = cpu_with(&[0x76]);
        assert_eq!(cpu.status(), 0b0000_0010);

        cpu.set_flag_s(true);
        cpu.set_flag_z(true);
        cpu.set_flag_p(true);
        cpu.set_flag_cy(true);
        assert_eq!(cpu.status(), 0b1100_0111);
    }

    #[test]
    fn test_pairs_are_composed_from_registers() {
        let mut cpu = cpu_with(&[0x76]);
        cpu.set_bc(0xBEEF);
        assert_eq!(cpu.b(), 0xBE);
        assert_eq!(cpu.c(), 0xEF);

        cpu.set_d(0x12);
        cpu.set_e(0x34);
        assert_eq!(cpu.de(), 0x1234);
    }

    #[test]
    fn test_step_unimplemented_leaves_pc() {
        let mut cpu = cpu_with(&[0x02]);

        assert_eq!(
            cpu.step(),
            Ok(StepResult::Unimplemented {
                opcode: 0x02,
                pc: 0x0000
            })
        );
        assert_eq!(cpu.pc(), 0x0000);
        assert_eq!(cpu.steps(), 0);
    }

    #[test]
    fn test_fetch_past_end_is_reported() {
        // INR A, then nothing
        let mut cpu = cpu_with(&[0x3C]);
        cpu.step().unwrap();

        assert_eq!(
            cpu.step(),
            Err(ExecutionError::OutOfBoundsFetch {
                address: 0x0001,
                size: 1
            })
        );
    }

    #[test]
    fn test_truncated_operand_is_reported() {
        // ADI with its operand byte missing
        let mut cpu = cpu_with(&[0xC6]);

        assert_eq!(
            cpu.step(),
            Err(ExecutionError::OutOfBoundsFetch {
                address: 0x0001,
                size: 1
            })
        );
        assert_eq!(cpu.pc(), 0x0000);
    }

    #[test]
    fn test_halt_latches() {
        let mut cpu = cpu_with(&[0x76, 0x3C]);

        assert_eq!(cpu.step(), Ok(StepResult::Halted));
        assert_eq!(cpu.pc(), 0x0001);
        assert!(cpu.is_halted());

        // INR A after the HLT never runs
        assert_eq!(cpu.step(), Ok(StepResult::Halted));
        assert_eq!(cpu.a(), 0x00);
    }

    #[test]
    fn test_run_for_steps_budget() {
        let mut cpu = cpu_with(&[0x3C, 0x3C, 0x3C, 0x76]);

        assert_eq!(cpu.run_for_steps(2), Ok(StepResult::Continued));
        assert_eq!(cpu.a(), 0x02);
        assert_eq!(cpu.run_for_steps(10), Ok(StepResult::Halted));
        assert_eq!(cpu.a(), 0x03);
        assert_eq!(cpu.steps(), 4);
    }

    #[test]
    fn test_push_checks_both_slots() {
        let mut cpu = cpu_with(&[0x00; 4]);
        cpu.set_sp(0x0005);

        // sp-1 = 4 is outside a 4-byte image
        assert_eq!(
            cpu.push_word(0x1234),
            Err(ExecutionError::OutOfBoundsAccess {
                address: 0x0004,
                size: 4
            })
        );
        assert_eq!(cpu.sp(), 0x0005);
        assert_eq!(cpu.memory().as_slice(), &[0x00; 4]);
    }

    #[test]
    fn test_push_and_peek() {
        let mut cpu = cpu_with(&[0x00; 8]);
        cpu.set_sp(0x0008);

        cpu.push_word(0xABCD).unwrap();
        assert_eq!(cpu.sp(), 0x0006);
        assert_eq!(cpu.memory().as_slice()[7], 0xAB);
        assert_eq!(cpu.memory().as_slice()[6], 0xCD);
        assert_eq!(cpu.peek_word(), Ok(0xABCD));
    }
}
