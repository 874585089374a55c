// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Scoped mapping of the IOMGR page.

use std::io::Write;

use loanio_abi::PinSet;
use tracing::debug;

use super::LoanIo;
use crate::LoanError;
use crate::platform::PhysMemory;
use crate::report::{Action, GpioStatus, Transition};

/// A borrow of [`LoanIo`] that keeps the IOMGR page mapped between calls.
///
/// The page is mapped by the first operation and released when the session
/// is dropped or [closed](Session::close). A failed mapping leaves the
/// session unmapped; the next operation tries again.
pub struct Session<'a, P: PhysMemory, W: Write> {
    io: &'a mut LoanIo<P, W>,
}

impl<'a, P: PhysMemory, W: Write> Session<'a, P, W> {
    pub(super) const fn new(io: &'a mut LoanIo<P, W>) -> Self {
        Self { io }
    }

    /// Set the `GENERALIO` bits of `pins`, loaning them to the FPGA.
    ///
    /// # Errors
    ///
    /// Returns the device or output error after printing it.
    pub fn loan(&mut self, pins: PinSet) -> Result<Transition, LoanError> {
        self.io
            .reported(|io| io.update_generalio(Action::Loan, pins))
    }

    /// Clear the `GENERALIO` bits of `pins`, returning them to the HPS.
    ///
    /// # Errors
    ///
    /// Returns the device or output error after printing it.
    pub fn restore(&mut self, pins: PinSet) -> Result<Transition, LoanError> {
        self.io
            .reported(|io| io.update_generalio(Action::Restore, pins))
    }

    /// Read `GENERALIO` and print the per-pin loan table.
    ///
    /// # Errors
    ///
    /// Returns the device or output error after printing it.
    pub fn status(&mut self) -> Result<GpioStatus, LoanError> {
        self.io.reported(|io| {
            io.read_generalio()
                .map(GpioStatus::new)
                .inspect(|status| debug!(loaned = %status.loaned(), "read GPIO loan status"))
        })
    }

    /// Read the raw `GENERALIO` value without printing anything.
    ///
    /// # Errors
    ///
    /// Returns the device error; nothing is reported to the operator.
    pub fn generalio(&mut self) -> Result<u32, LoanError> {
        self.io.read_generalio()
    }

    /// Whether the page is currently mapped.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.io.is_mapped()
    }

    /// Release the mapping now.
    pub fn close(self) {
        drop(self);
    }
}

impl<P: PhysMemory, W: Write> Drop for Session<'_, P, W> {
    fn drop(&mut self) {
        self.io.unmap();
    }
}
