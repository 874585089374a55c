// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Register transitions and operator-facing status text.
//!
//! The bit arithmetic of loaning and restoring lives here as pure functions
//! on register values; the `Display` impls produce the text printed to the
//! operator.


use core::fmt;

use loanio_abi::{Pin, PinSet};

/// Direction of a `GENERALIO` update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Hand pins to the FPGA (set their bits).
    Loan,
    /// Return pins to the HPS (clear their bits).
    Restore,
}

impl Action {
    /// Register value after applying this action for `pins` to `current`.
    ///
    /// Only the bits of `pins` change; all other bits are carried over.
    #[inline]
    #[must_use]
    pub const fn apply(self, pins: PinSet, current: u32) -> u32 {
        match self {
            Self::Loan => current | pins.mask(),
            Self::Restore => current & !pins.mask(),
        }
    }
}

/// One read-modify-write of `GENERALIO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    action: Action,
    pins: PinSet,
    before: u32,
    after: u32,
}

impl Transition {
    /// Compute the transition for `action` on `pins` from the value `before`.
    #[must_use]
    pub const fn new(action: Action, pins: PinSet, before: u32) -> Self {
        Self {
            action,
            pins,
            before,
            after: action.apply(pins, before),
        }
    }

    /// The pins affected.
    #[inline]
    #[must_use]
    pub const fn pins(&self) -> PinSet {
        self.pins
    }

    /// Register value read before the update.
    #[inline]
    #[must_use]
    pub const fn before(&self) -> u32 {
        self.before
    }

    /// Register value written by the update.
    #[inline]
    #[must_use]
    pub const fn after(&self) -> u32 {
        self.after
    }

    /// Whether the write changed anything.
    #[inline]
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.before != self.after
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Loan => writeln!(f, "LoanIO: Loaned GPIO pins {} to FPGA", self.pins)?,
            Action::Restore => {
                writeln!(f, "LoanIO: Restored GPIO pins {} to HPS control", self.pins)?;
            }
        }
        writeln!(
            f,
            "GENERALIO register: 0x{:08X} -> 0x{:08X}",
            self.before, self.after
        )?;
        if self.action == Action::Loan {
            writeln!(f, "Loaned pins can now be controlled by FPGA logic")?;
        }
        Ok(())
    }
}

/// Who drives a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinState {
    /// The FPGA fabric drives the pin.
    Loaned,
    /// The HPS drives the pin.
    HostControlled,
}

impl fmt::Display for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaned => write!(f, "LOANED to FPGA"),
            Self::HostControlled => write!(f, "HPS control"),
        }
    }
}

/// Snapshot of `GENERALIO` and the loan state of every managed pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioStatus {
    generalio: u32,
}

impl GpioStatus {
    /// Interpret a raw `GENERALIO` value.
    #[inline]
    #[must_use]
    pub const fn new(generalio: u32) -> Self {
        Self { generalio }
    }

    /// The raw register value.
    #[inline]
    #[must_use]
    pub const fn generalio(&self) -> u32 {
        self.generalio
    }

    /// State of a single pin.
    #[inline]
    #[must_use]
    pub const fn state(&self, pin: Pin) -> PinState {
        if pin.is_loaned_in(self.generalio) {
            PinState::Loaned
        } else {
            PinState::HostControlled
        }
    }

    /// All managed pins that are loaned.
    #[inline]
    #[must_use]
    pub const fn loaned(&self) -> PinSet {
        PinSet::loaned_in(self.generalio)
    }

    /// Every managed pin with its state, in GPIO order.
    pub fn pins(&self) -> impl Iterator<Item = (Pin, PinState)> + '_ {
        Pin::ALL.into_iter().map(|pin| (pin, self.state(pin)))
    }
}

impl fmt::Display for GpioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IOMGR GENERALIO Status: 0x{:08X}", self.generalio)?;
        writeln!(f, "GPIO Loan Status:")?;
        for (pin, state) in self.pins() {
            writeln!(f, "  {pin}: {state}")?;
        }
        Ok(())
    }
}
