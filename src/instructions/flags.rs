//! # Condition Code Helpers and Carry Instructions
//!
//! This module holds the parity computation shared by every flag-setting
//! instruction, and the two instructions that manipulate carry directly:
//! - CMC: Complement Carry
//! - STC: Set Carry

use super::Flow;
use crate::{ExecutionError, MemoryBus, CPU};

/// Returns true when `value` has an even number of set bits.
///
/// # Examples
///
/// ```
/// use lib8080::parity;
///
/// assert!(parity(0x00));
/// assert!(!parity(0x01));
/// assert!(parity(0x03));
/// assert!(parity(0xFF));
/// ```
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

/// Executes the CMC (Complement Carry) instruction (0x3F).
pub(crate) fn execute_cmc<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<Flow, ExecutionError> {
    cpu.flag_cy = !cpu.flag_cy;
    Ok(Flow::Next)
}

/// Executes the STC (Set Carry) instruction (0x37).
pub(crate) fn execute_stc<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<Flow, ExecutionError> {
    cpu.flag_cy = true;
    Ok(Flow::Next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_matches_popcount() {
        for value in 0..=u8::MAX {
            let mut bits = 0;
            for bit in 0..8 {
                bits += (value >> bit) & 1;
            }
            assert_eq!(parity(value), bits % 2 == 0, "value 0x{:02X}", value);
        }
    }
}
