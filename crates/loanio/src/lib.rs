// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # LoanIO
//!
//! Loans Cyclone V HPS GPIO pins 48-53 to the FPGA fabric and hands them back.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          LoanIo / Session (loan, restore, status)        │
//! └─────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │              Platform Traits                             │
//! │  (`PhysMemory`, `RegisterWindow`)                        │
//! └─────────────────────────────────────────────────────────┘
//!            │                              │
//!            ▼                              ▼
//! ┌─────────────────────┐      ┌─────────────────────────────┐
//! │  `MockPhysMemory`   │      │     `DevMem`                │
//! │   (for testing)     │      │     (/dev/mem on the HPS)   │
//! └─────────────────────┘      └─────────────────────────────┘
//! ```
//!
//! Every operation maps the IOMGR page on first use and releases it when its
//! [`Session`] ends. Nothing guards the read-modify-write of `GENERALIO`
//! against other writers; the hardware has no compare-and-swap for it.


pub mod demo;
pub mod error;
pub mod iomgr;
pub mod platform;
pub mod report;

pub use error::LoanError;
pub use iomgr::{LoanIo, Session};
pub use loanio_abi::{Paddr, Pin, PinSet};
#[cfg(all(unix, feature = "devmem"))]
pub use platform::DevMem;
#[cfg(any(test, feature = "mock"))]
pub use platform::MockPhysMemory;
pub use platform::{PhysMemory, RegisterWindow};
pub use report::{Action, GpioStatus, PinState, Transition};

/// Crate version for runtime queries.
///
/// Uses the release version from the `LOANIO_VERSION` environment variable when
/// available at build time, falling back to "unknown" otherwise.
pub const VERSION: &str = match option_env!("LOANIO_VERSION") {
    Some(v) => v,
    None => "unknown",
};
