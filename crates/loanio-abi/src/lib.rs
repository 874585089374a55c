// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hardware contract for loaning HPS GPIO pins to the FPGA fabric.
//!
//! This crate describes the one register LoanIO touches and the pins it
//! manages:
//! - Physical address type for the IOMGR register page
//! - IOMGR layout constants (page base, `GENERALIO` offset, loan mask)
//! - Validated pin numbers and pin sets whose mask never leaves the loan bits
//!
//! # Design Principles
//!
//! - **No dependencies**: Pure data types, 100% host-testable
//! - **One chip**: Cyclone V HPS only, no register-layout abstraction
//! - **Mask-bounded**: every [`PinSet`] mask is a subset of [`layout::LOAN_MASK`]
//!
//! # Modules
//!
//! - [`types`]: `Paddr`, `Pin`, `PinSet`
//! - [`layout`]: IOMGR register page and `GENERALIO` bit layout

#![cfg_attr(not(test), no_std)]

pub mod layout;
pub mod types;

// Re-export commonly used types at crate root
pub use layout::{GENERALIO_OFFSET, IOMGR_BASE, IOMGR_PAGE_SIZE, LOAN_MASK};
pub use types::{Paddr, Pin, PinSet};
