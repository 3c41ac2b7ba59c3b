//! Memory bus contract consumed by the SM83 core.

use crate::logging::{log, LogCategory, LogLevel};

/// Number of addressable locations (0x0000..=0xFFFF).
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Memory interface trait for the SM83 CPU.
///
/// Both operations are total over the 16-bit address range. Mapping an
/// address to ROM, RAM or I/O is the implementor's business.
pub trait MemorySm83 {
    /// Read a byte from memory
    fn read(&self, addr: u16) -> u8;

    /// Write a byte to memory
    fn write(&mut self, addr: u16, val: u8);
}

/// Flat 64 KiB RAM, useful for tests and headless runs.
#[derive(Clone)]
pub struct FlatMemory {
    data: Vec<u8>,
}

impl FlatMemory {
    pub fn new() -> Self {
        Self {
            data: vec![0; ADDRESS_SPACE],
        }
    }

    /// Copy `bytes` into memory starting at `addr`.
    ///
    /// Anything that would run past 0xFFFF is dropped; returns the number of
    /// bytes actually copied so the caller can report truncation.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) -> usize {
        let start = addr as usize;
        let len = bytes.len().min(ADDRESS_SPACE - start);
        self.data[start..start + len].copy_from_slice(&bytes[..len]);
        log(LogCategory::Bus, LogLevel::Debug, || {
            format!("Bus: loaded {} bytes at {:04X}", len, addr)
        });
        len
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory")
            .field("len", &self.data.len())
            .finish()
    }
}

impl MemorySm83 for FlatMemory {
    #[inline]
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    #[inline]
    fn write(&mut self, addr: u16, val: u8) {
        self.data[addr as usize] = val;
    }
}
