//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from the
//! memory implementation, and `ImageMemory`, the flat buffer the interpreter
//! runs programs from.
//!
//! ## Design Principles
//!
//! - The address space is exactly as large as the loaded image. Nothing is
//!   reserved past its end, so the stack lives inside the program image too.
//! - Accesses outside the buffer are reported as `BusError` instead of reading
//!   or writing whatever lies past the end.
//! - The CPU never holds a reference into memory across steps.

use thiserror::Error;

/// Largest image the 16-bit address space can hold.
pub const MAX_IMAGE_SIZE: usize = 0x1_0000;

/// An access fell outside the memory buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("address 0x{address:04X} is outside memory of {size} bytes")]
pub struct BusError {
    /// Address that was accessed.
    pub address: u16,
    /// Size of the memory buffer in bytes.
    pub size: usize,
}

/// A program image could not be turned into memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// The image holds no bytes, so there is nothing to fetch.
    #[error("program image is empty")]
    Empty,

    /// The image does not fit in the 16-bit address space.
    #[error("program image of {len} bytes exceeds the 65536-byte address space")]
    TooLarge { len: usize },
}

/// Memory bus trait for CPU to read/write bytes.
///
/// # Design
///
/// - `read(&self)`: Immutable reference allows shared reads
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - Both report addresses outside the backing store with `BusError`
///
/// # Examples
///
/// ```
/// use lib8080::{ImageMemory, MemoryBus};
///
/// let mut mem = ImageMemory::from_image(vec![0x00; 16]).unwrap();
///
/// mem.write(0x000A, 0x42).unwrap();
/// assert_eq!(mem.read(0x000A), Ok(0x42));
///
/// // Past the end of the image
/// assert!(mem.read(0x0010).is_err());
/// ```
pub trait MemoryBus {
    /// Number of addressable bytes.
    fn size(&self) -> usize;

    /// Reads a byte from the specified 16-bit address.
    fn read(&self, addr: u16) -> Result<u8, BusError>;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// A failed write leaves memory untouched.
    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError>;

    /// Returns true if `addr` can be read and written.
    fn contains(&self, addr: u16) -> bool {
        (addr as usize) < self.size()
    }
}

/// Flat memory holding exactly one loaded program image.
///
/// # Examples
///
/// ```
/// use lib8080::{ImageMemory, MemoryBus};
///
/// let mem = ImageMemory::from_image(vec![0x3C, 0x76]).unwrap();
/// assert_eq!(mem.size(), 2);
/// assert_eq!(mem.read(0x0000), Ok(0x3C));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMemory {
    data: Vec<u8>,
}

impl ImageMemory {
    /// Wraps a program image, rejecting empty images and images larger than
    /// the 64 KiB address space.
    pub fn from_image(image: Vec<u8>) -> Result<Self, ImageError> {
        if image.is_empty() {
            return Err(ImageError::Empty);
        }
        if image.len() > MAX_IMAGE_SIZE {
            return Err(ImageError::TooLarge { len: image.len() });
        }
        Ok(Self { data: image })
    }

    /// Copies a program image out of a slice.
    pub fn from_slice(image: &[u8]) -> Result<Self, ImageError> {
        Self::from_image(image.to_vec())
    }

    /// Returns the whole buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the memory and returns the buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    fn out_of_bounds(&self, address: u16) -> BusError {
        BusError {
            address,
            size: self.data.len(),
        }
    }
}

impl MemoryBus for ImageMemory {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn read(&self, addr: u16) -> Result<u8, BusError> {
        self.data
            .get(addr as usize)
            .copied()
            .ok_or_else(|| self.out_of_bounds(addr))
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        let size = self.data.len();
        match self.data.get_mut(addr as usize) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(BusError {
                address: addr,
                size,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_memory_read_write() {
        let mut mem = ImageMemory::from_image(vec![0; 0x100]).unwrap();

        assert_eq!(mem.read(0x0000), Ok(0x00));
        assert_eq!(mem.read(0x00FF), Ok(0x00));

        mem.write(0x0042, 0x42).unwrap();
        assert_eq!(mem.read(0x0042), Ok(0x42));

        // Neighbours unchanged
        assert_eq!(mem.read(0x0041), Ok(0x00));
        assert_eq!(mem.read(0x0043), Ok(0x00));
    }

    #[test]
    fn test_image_memory_bounds() {
        let mut mem = ImageMemory::from_image(vec![0xAA; 4]).unwrap();

        assert_eq!(
            mem.read(0x0004),
            Err(BusError {
                address: 0x0004,
                size: 4
            })
        );
        assert!(mem.write(0xFFFF, 0x01).is_err());
        assert_eq!(mem.as_slice(), &[0xAA; 4]);
        assert!(mem.contains(0x0003));
        assert!(!mem.contains(0x0004));
    }

    #[test]
    fn test_image_rejects_empty_and_oversized() {
        assert_eq!(ImageMemory::from_image(Vec::new()), Err(ImageError::Empty));
        assert_eq!(
            ImageMemory::from_image(vec![0; MAX_IMAGE_SIZE + 1]),
            Err(ImageError::TooLarge {
                len: MAX_IMAGE_SIZE + 1
            })
        );
        assert!(ImageMemory::from_image(vec![0; MAX_IMAGE_SIZE]).is_ok());
    }
}
