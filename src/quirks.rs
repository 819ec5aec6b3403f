//! # Control-Transfer Quirks
//!
//! Some 8080 tooling advances the program counter by one after *every*
//! instruction, including jumps, calls, returns and resets. Ordinary
//! instructions compensate for that; control transfers do not, so they land
//! one byte past their destination. The RET family of that convention also
//! reads the return address without moving the stack pointer.
//!
//! `Quirks` selects between that legacy convention and exact 8080 behaviour.
//! The default is exact.

/// Behavioural switches for control-transfer instructions.
///
/// # Examples
///
/// ```
/// use lib8080::Quirks;
///
/// let exact = Quirks::default();
/// assert!(!exact.trailing_increment);
///
/// let legacy = Quirks::legacy();
/// assert!(legacy.trailing_increment && legacy.ret_keeps_sp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quirks {
    /// Control transfers also receive the trailing +1 advance.
    ///
    /// JMP, CALL, RST and PCHL land one byte past their target. To keep
    /// returns working, CALL pushes `pc + 2` and RST pushes `pc`, so a RET
    /// (which lands one past the popped address) resumes after the call.
    pub trailing_increment: bool,

    /// RET and its conditional variants pop the return address without
    /// adding 2 to `sp`.
    pub ret_keeps_sp: bool,
}

impl Quirks {
    /// Exact 8080 control-transfer behaviour.
    pub const fn exact() -> Self {
        Self {
            trailing_increment: false,
            ret_keeps_sp: false,
        }
    }

    /// The legacy convention: trailing increment and RET leaving `sp` alone.
    pub const fn legacy() -> Self {
        Self {
            trailing_increment: true,
            ret_keeps_sp: true,
        }
    }

    /// Bytes between the start of an instruction of `size_bytes` and the
    /// return address it pushes.
    pub(crate) fn return_offset(&self, size_bytes: u8) -> u16 {
        if self.trailing_increment {
            size_bytes as u16 - 1
        } else {
            size_bytes as u16
        }
    }

    /// Where `pc` ends up after a transfer to `target`.
    pub(crate) fn landing(&self, target: u16) -> u16 {
        if self.trailing_increment {
            target.wrapping_add(1)
        } else {
            target
        }
    }
}
