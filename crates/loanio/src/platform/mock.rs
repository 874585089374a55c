// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mock physical memory for testing.
//!
//! This module provides a fake register page backed by a heap buffer, with
//! failure injection and counters for every open, map, unmap and register
//! access, so LoanIO can be tested without `/dev/mem`.

#![allow(clippy::panic)] // Test infrastructure - panicking on invalid input is correct

use std::cell::RefCell;
use std::rc::Rc;

use loanio_abi::{GENERALIO_OFFSET, IOMGR_BASE, IOMGR_PAGE_SIZE, Paddr};

use super::traits::{PhysMemory, RegisterWindow, check_access};
use crate::LoanError;

/// Which step of [`PhysMemory::map`] the mock should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockFailure {
    /// Open and map succeed.
    #[default]
    None,
    /// Opening the device fails with the given errno.
    Open(Option<i32>),
    /// Opening succeeds but mapping fails with the given errno.
    Map(Option<i32>),
}

/// Counters of everything done to the mock device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MockCounters {
    /// Device open attempts, successful or not.
    pub open_attempts: usize,
    /// Device handles successfully opened.
    pub opens: usize,
    /// Device handles closed.
    pub closes: usize,
    /// Successful mappings.
    pub maps: usize,
    /// Mappings released.
    pub unmaps: usize,
    /// 32-bit loads through a window.
    pub reads: usize,
    /// 32-bit stores through a window.
    pub writes: usize,
}

impl MockCounters {
    /// Handles opened but not yet closed.
    #[inline]
    #[must_use]
    pub const fn open_handles(&self) -> usize {
        self.opens - self.closes
    }

    /// Mappings created but not yet released.
    #[inline]
    #[must_use]
    pub const fn live_mappings(&self) -> usize {
        self.maps - self.unmaps
    }
}

/// Shared state of the fake device.
#[derive(Debug)]
struct MockDevice {
    memory: Box<[u8]>,
    base: Paddr,
    failure: MockFailure,
    counters: MockCounters,
}

impl MockDevice {
    fn read32(&mut self, offset: usize) -> u32 {
        self.counters.reads += 1;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.memory[offset..offset + 4]);
        u32::from_le_bytes(bytes)
    }

    fn write32(&mut self, offset: usize, value: u32) {
        self.counters.writes += 1;
        self.memory[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Convert a physical address to an offset into the backing buffer.
    fn offset(&self, paddr: Paddr) -> usize {
        assert!(
            paddr >= self.base,
            "physical address {paddr} is below base {}",
            self.base
        );
        let offset = paddr.as_u64().wrapping_sub(self.base.as_u64());
        check_access(offset, self.memory.len() as u64)
    }
}

/// A fake physical register page.
///
/// Clones share the same device, so a test can keep one handle to inspect
/// while the code under test owns another.
#[derive(Debug, Clone)]
pub struct MockPhysMemory {
    device: Rc<RefCell<MockDevice>>,
}

impl MockPhysMemory {
    /// Create a zeroed fake IOMGR page at its real physical address.
    #[must_use]
    pub fn new() -> Self {
        Self::with_page(IOMGR_BASE, IOMGR_PAGE_SIZE)
    }

    /// Create a zeroed fake page of `size` bytes at `base`.
    #[must_use]
    pub fn with_page(base: Paddr, size: u64) -> Self {
        let size = usize::try_from(size)
            .unwrap_or_else(|_| panic!("mock page size {size:#x} exceeds usize::MAX"));
        Self {
            device: Rc::new(RefCell::new(MockDevice {
                memory: vec![0u8; size].into_boxed_slice(),
                base,
                failure: MockFailure::None,
                counters: MockCounters::default(),
            })),
        }
    }

    /// Create a fake IOMGR page with `GENERALIO` preset to `value`.
    #[must_use]
    pub fn with_generalio(value: u32) -> Self {
        let phys = Self::new();
        phys.set_generalio(value);
        phys
    }

    /// Current `GENERALIO` value, read without touching the counters.
    #[must_use]
    pub fn generalio(&self) -> u32 {
        self.peek32(IOMGR_BASE.add(GENERALIO_OFFSET))
    }

    /// Overwrite `GENERALIO`, as another bus master would.
    pub fn set_generalio(&self, value: u32) {
        self.poke32(IOMGR_BASE.add(GENERALIO_OFFSET), value);
    }

    /// Read any register of the page without touching the counters.
    #[must_use]
    pub fn peek32(&self, paddr: Paddr) -> u32 {
        let device = self.device.borrow();
        let offset = device.offset(paddr);
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&device.memory[offset..offset + 4]);
        u32::from_le_bytes(bytes)
    }

    /// Write any register of the page without touching the counters.
    pub fn poke32(&self, paddr: Paddr, value: u32) {
        let mut device = self.device.borrow_mut();
        let offset = device.offset(paddr);
        device.memory[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Make subsequent [`PhysMemory::map`] calls fail.
    pub fn fail(&self, failure: MockFailure) {
        self.device.borrow_mut().failure = failure;
    }

    /// Snapshot of the device counters.
    #[must_use]
    pub fn counters(&self) -> MockCounters {
        self.device.borrow().counters
    }

    /// Whether any window onto the page is currently alive.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.counters().live_mappings() > 0
    }
}

impl Default for MockPhysMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysMemory for MockPhysMemory {
    type Window = MockWindow;

    fn map(&mut self, base: Paddr, len: u64) -> Result<Self::Window, LoanError> {
        let mut device = self.device.borrow_mut();
        device.counters.open_attempts += 1;

        if let MockFailure::Open(errno) = device.failure {
            return Err(LoanError::DeviceUnavailable { errno });
        }
        device.counters.opens += 1;

        let page_end = device.base.add(device.memory.len() as u64);
        let in_page = base >= device.base && base.add(len) <= page_end;
        let failure = device.failure;
        if let MockFailure::Map(errno) = failure {
            device.counters.closes += 1;
            return Err(LoanError::MappingFailed { errno });
        }
        if !in_page {
            device.counters.closes += 1;
            return Err(LoanError::MappingFailed { errno: None });
        }

        device.counters.maps += 1;
        Ok(MockWindow {
            device: Rc::clone(&self.device),
            start: base.as_u64().wrapping_sub(device.base.as_u64()),
            len,
        })
    }
}

/// A live mapping of the mock page.
#[derive(Debug)]
pub struct MockWindow {
    device: Rc<RefCell<MockDevice>>,
    start: u64,
    len: u64,
}

impl RegisterWindow for MockWindow {
    fn read32(&self, offset: u64) -> u32 {
        check_access(offset, self.len);
        let mut device = self.device.borrow_mut();
        let index = check_access(self.start + offset, device.memory.len() as u64);
        device.read32(index)
    }

    fn write32(&mut self, offset: u64, value: u32) {
        check_access(offset, self.len);
        let mut device = self.device.borrow_mut();
        let index = check_access(self.start + offset, device.memory.len() as u64);
        device.write32(index, value);
    }

    fn len(&self) -> u64 {
        self.len
    }
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        let mut device = self.device.borrow_mut();
        device.counters.unmaps += 1;
        device.counters.closes += 1;
    }
}
