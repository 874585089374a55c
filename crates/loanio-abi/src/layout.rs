// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! IOMGR register page layout for the Cyclone V HPS.
//!
//! ```text
//! 0xFFD0_5000  IOMGR register page (4 KB)
//! 0xFFD0_5784    GENERALIO (32 bit)
//!                  bits 16..=21  loan GPIO 48..=53 to the FPGA
//! ```
//!
//! A set bit hands the pin to the fabric; a clear bit leaves it under HPS
//! control. All other `GENERALIO` bits belong to other pins and must survive
//! every read-modify-write untouched.

use crate::types::Paddr;

/// One kilobyte in bytes.
const KB: u64 = 1024;

/// Size of the mapped IOMGR register page (4 KB).
pub const IOMGR_PAGE_SIZE: u64 = 4 * KB;

/// Physical base address of the IOMGR register page.
pub const IOMGR_BASE: Paddr = Paddr::new(0xFFD0_5000);

/// Byte offset of the `GENERALIO` register inside the IOMGR page.
pub const GENERALIO_OFFSET: u64 = 0x784;

/// Physical address of the `GENERALIO` register.
pub const GENERALIO_PADDR: Paddr = IOMGR_BASE.add(GENERALIO_OFFSET);

// =============================================================================
// GENERALIO Loan Bits
// =============================================================================

/// First GPIO number that can be loaned.
pub const FIRST_LOAN_PIN: u8 = 48;

/// Last GPIO number that can be loaned.
pub const LAST_LOAN_PIN: u8 = 53;

/// Number of loanable pins.
pub const LOAN_PIN_COUNT: u8 = LAST_LOAN_PIN - FIRST_LOAN_PIN + 1;

/// Subtracted from a GPIO number to get its `GENERALIO` bit (GPIO 48 = bit 16).
pub const PIN_BIT_BASE: u8 = 32;

/// Bit position of the first loan bit.
pub const LOAN_SHIFT: u32 = (FIRST_LOAN_PIN - PIN_BIT_BASE) as u32;

/// `GENERALIO` bits that loan GPIO 48-53 to the FPGA (bits 16-21).
pub const LOAN_MASK: u32 = 0x003F_0000;

// Compile-time verification of the register layout
const _: () = {
    assert!(IOMGR_PAGE_SIZE.is_power_of_two());
    assert!(GENERALIO_OFFSET < IOMGR_PAGE_SIZE);
    assert!(GENERALIO_OFFSET % 4 == 0);
    assert!(IOMGR_BASE.as_u64() % IOMGR_PAGE_SIZE == 0);
    assert!(LOAN_MASK == ((1_u32 << LOAN_PIN_COUNT as u32) - 1) << LOAN_SHIFT);
    assert!(LOAN_SHIFT == 16);
};
