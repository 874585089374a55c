// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Register access manager for the IOMGR `GENERALIO` register.
//!
//! [`LoanIo`] owns the physical memory backend, the operator output sink and
//! at most one mapping of the IOMGR page. The mapping is created lazily by
//! the first access of a [`Session`] and released when that session ends, so
//! after every top-level operation the page is unmapped again:
//!
//! ```text
//!   Unmapped ──ensure_mapped()──▶ Mapped
//!      ▲  │                          │
//!      │  └── open/map failure ──┐   │
//!      └─────────────────────────┴───┘  session dropped / closed
//! ```
//!
//! The read-modify-write of `GENERALIO` is not atomic. Another process or the
//! fabric writing between our load and store loses its update.

mod session;


pub use session::Session;

use std::io::Write;

use loanio_abi::{GENERALIO_OFFSET, IOMGR_BASE, IOMGR_PAGE_SIZE, PinSet};
use tracing::{debug, warn};

use crate::LoanError;
use crate::platform::{PhysMemory, RegisterWindow};
use crate::report::{Action, GpioStatus, Transition};

/// Loans and restores HPS GPIO pins through the IOMGR register page.
pub struct LoanIo<P: PhysMemory, W: Write> {
    phys: P,
    out: W,
    window: Option<P::Window>,
}

impl<P: PhysMemory, W: Write> LoanIo<P, W> {
    /// Create a manager over `phys` printing operator text to `out`.
    ///
    /// Nothing is opened until the first operation.
    pub const fn new(phys: P, out: W) -> Self {
        Self {
            phys,
            out,
            window: None,
        }
    }

    /// Start a session that keeps the IOMGR page mapped until it is dropped.
    pub fn session(&mut self) -> Session<'_, P, W> {
        Session::new(self)
    }

    /// Loan `pins` to the FPGA and print the register change.
    ///
    /// The page is unmapped again before this returns.
    ///
    /// # Errors
    ///
    /// Returns the device or output error after it has been reported to the
    /// operator. The register is not touched on a device error.
    pub fn loan(&mut self, pins: PinSet) -> Result<Transition, LoanError> {
        self.session().loan(pins)
    }

    /// Return `pins` to HPS control and print the register change.
    ///
    /// The page is unmapped again before this returns.
    ///
    /// # Errors
    ///
    /// Same as [`LoanIo::loan`].
    pub fn restore(&mut self, pins: PinSet) -> Result<Transition, LoanError> {
        self.session().restore(pins)
    }

    /// Print the loan state of GPIO 48-53.
    ///
    /// The page is unmapped again before this returns, whether or not the
    /// report could be printed.
    ///
    /// # Errors
    ///
    /// Same as [`LoanIo::loan`].
    pub fn status(&mut self) -> Result<GpioStatus, LoanError> {
        self.session().status()
    }

    /// Whether the IOMGR page is currently mapped.
    #[must_use]
    pub const fn is_mapped(&self) -> bool {
        self.window.is_some()
    }

    /// The physical memory backend.
    pub const fn phys(&self) -> &P {
        &self.phys
    }

    /// The operator output sink.
    pub const fn out(&self) -> &W {
        &self.out
    }

    /// Print a line of free-form operator text.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::Output`] if the sink fails.
    pub fn say(&mut self, line: &str) -> Result<(), LoanError> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    /// Release the mapping and hand back the backend and sink.
    pub fn into_parts(mut self) -> (P, W) {
        self.unmap();
        (self.phys, self.out)
    }

    /// Map the IOMGR page unless it already is.
    fn ensure_mapped(&mut self) -> Result<&mut P::Window, LoanError> {
        let window = match self.window.take() {
            Some(window) => window,
            None => {
                debug!(base = %IOMGR_BASE, len = IOMGR_PAGE_SIZE, "mapping IOMGR register page");
                self.phys
                    .map(IOMGR_BASE, IOMGR_PAGE_SIZE)
                    .inspect_err(|err| warn!(%err, errno = ?err.errno(), "IOMGR mapping failed"))?
            }
        };
        Ok(self.window.insert(window))
    }

    /// Drop the mapping, if any. Closes the device handle as well.
    fn unmap(&mut self) {
        if self.window.take().is_some() {
            debug!("released IOMGR register page");
        }
    }

    fn read_generalio(&mut self) -> Result<u32, LoanError> {
        let value = self.ensure_mapped()?.read32(GENERALIO_OFFSET);
        debug!(generalio = format_args!("{value:#010x}"), "read GENERALIO");
        Ok(value)
    }

    fn update_generalio(&mut self, action: Action, pins: PinSet) -> Result<Transition, LoanError> {
        let window = self.ensure_mapped()?;
        let transition = Transition::new(action, pins, window.read32(GENERALIO_OFFSET));
        window.write32(GENERALIO_OFFSET, transition.after());
        debug!(
            ?action,
            %pins,
            before = format_args!("{:#010x}", transition.before()),
            after = format_args!("{:#010x}", transition.after()),
            "updated GENERALIO"
        );
        Ok(transition)
    }

    /// Run `op`, then print its report or its error to the operator.
    fn reported<T: core::fmt::Display>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, LoanError>,
    ) -> Result<T, LoanError> {
        match op(self) {
            Ok(report) => {
                write!(self.out, "{report}")?;
                Ok(report)
            }
            Err(err) => {
                if let Err(out_err) = writeln!(self.out, "Error: {err}") {
                    warn!(%out_err, "cannot report error to operator");
                }
                Err(err)
            }
        }
    }
}

impl<P: PhysMemory + core::fmt::Debug, W: Write> core::fmt::Debug for LoanIo<P, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoanIo")
            .field("phys", &self.phys)
            .field("mapped", &self.is_mapped())
            .finish_non_exhaustive()
    }
}
