// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Register backend traits.

use crate::LoanError;
use loanio_abi::Paddr;

/// A mapped window of physical register space.
///
/// Offsets are byte offsets from the start of the window and must be 4-byte
/// aligned and in bounds. Dropping the window unmaps it and closes the device
/// handle it was created from.
pub trait RegisterWindow {
    /// Volatile 32-bit load at `offset`.
    fn read32(&self, offset: u64) -> u32;

    /// Volatile 32-bit store at `offset`.
    fn write32(&mut self, offset: u64, value: u32);

    /// Size of the window in bytes.
    fn len(&self) -> u64;

    /// Whether the window has no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Access to physical memory.
///
/// Production code uses `/dev/mem`; tests use an in-memory fake.
pub trait PhysMemory {
    /// The window type produced by [`PhysMemory::map`].
    type Window: RegisterWindow;

    /// Open the memory device and map `len` bytes at physical `base`.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::DeviceUnavailable`] if the device cannot be
    /// opened and [`LoanError::MappingFailed`] if the mapping call fails. On
    /// either error nothing stays open.
    fn map(&mut self, base: Paddr, len: u64) -> Result<Self::Window, LoanError>;
}

/// Check that a 32-bit access at `offset` fits a window of `len` bytes.
///
/// Returns the offset as `usize` for indexing.
#[cfg(any(test, feature = "mock", all(unix, feature = "devmem")))]
pub(crate) fn check_access(offset: u64, len: u64) -> usize {
    assert!(
        offset % 4 == 0,
        "register offset {offset:#x} is not 4-byte aligned"
    );
    assert!(
        offset.checked_add(4).is_some_and(|end| end <= len),
        "register offset {offset:#x} is outside the {len:#x}-byte window"
    );
    usize::try_from(offset)
        .unwrap_or_else(|_| panic!("register offset {offset:#x} exceeds usize::MAX"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_bounds_access_is_accepted() {
        assert_eq!(check_access(0x784, 0x1000), 0x784);
        assert_eq!(check_access(0xFFC, 0x1000), 0xFFC);
    }

    #[test]
    #[should_panic(expected = "not 4-byte aligned")]
    fn misaligned_access_panics() {
        check_access(0x786, 0x1000);
    }

    #[test]
    #[should_panic(expected = "outside the")]
    fn out_of_bounds_access_panics() {
        check_access(0x1000, 0x1000);
    }
}
