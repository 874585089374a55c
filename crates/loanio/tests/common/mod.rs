// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared test infrastructure for integration tests.
//!
//! This module is **not** a test file, so it must comply with full clippy rules.
//! Test-specific allowances (like `unwrap_used`) are only permitted in `*_test.rs` files.

use loanio::{LoanIo, MockPhysMemory};

/// A manager over a fake IOMGR page, plus a handle to inspect that page.
pub struct Rig {
    /// Manager under test, printing into a buffer.
    pub io: LoanIo<MockPhysMemory, Vec<u8>>,
    /// Second handle onto the same fake page.
    pub phys: MockPhysMemory,
}

impl Rig {
    /// Build a rig with `GENERALIO` preset to `generalio`.
    #[must_use]
    pub fn new(generalio: u32) -> Self {
        let phys = MockPhysMemory::with_generalio(generalio);
        Self {
            io: LoanIo::new(phys.clone(), Vec::new()),
            phys,
        }
    }

    /// Operator output so far, lossily decoded.
    #[must_use]
    pub fn output(&self) -> String {
        String::from_utf8_lossy(self.io.out()).into_owned()
    }
}
