// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! End-to-end behaviour of loan, restore and status over a fake IOMGR page.

// Test code prioritizes clarity over defensive programming
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

mod common;

use common::Rig;
use loanio::platform::MockFailure;
use loanio::{LoanError, Pin, PinSet, PinState};
use loanio_abi::LOAN_MASK;
use proptest::prelude::*;

// ============================================================================
// Worked Example
// ============================================================================

#[test]
fn zero_loan_restore_example() {
    let mut rig = Rig::new(0x0000_0000);

    rig.io.loan(PinSet::ALL).unwrap();
    assert_eq!(rig.phys.generalio(), 0x003F_0000);

    rig.io.restore(PinSet::ALL).unwrap();
    assert_eq!(rig.phys.generalio(), 0x0000_0000);

    assert_eq!(
        rig.output(),
        "LoanIO: Loaned GPIO pins 48-53 to FPGA\n\
         GENERALIO register: 0x00000000 -> 0x003F0000\n\
         Loaned pins can now be controlled by FPGA logic\n\
         LoanIO: Restored GPIO pins 48-53 to HPS control\n\
         GENERALIO register: 0x003F0000 -> 0x00000000\n"
    );
}

// ============================================================================
// Register Properties
// ============================================================================

proptest! {
    #[test]
    fn loan_sets_mask_bits_only(v in any::<u32>()) {
        let mut rig = Rig::new(v);
        rig.io.loan(PinSet::ALL).unwrap();
        let after = rig.phys.generalio();
        prop_assert_eq!(after, v | LOAN_MASK);
        prop_assert_eq!(after & !LOAN_MASK, v & !LOAN_MASK);
    }

    #[test]
    fn restore_clears_mask_bits_only(v in any::<u32>()) {
        let mut rig = Rig::new(v);
        rig.io.restore(PinSet::ALL).unwrap();
        let after = rig.phys.generalio();
        prop_assert_eq!(after, v & !LOAN_MASK);
        prop_assert_eq!(after & !LOAN_MASK, v & !LOAN_MASK);
    }

    #[test]
    fn loan_is_idempotent(v in any::<u32>()) {
        let mut once = Rig::new(v);
        once.io.loan(PinSet::ALL).unwrap();

        let mut twice = Rig::new(v);
        twice.io.loan(PinSet::ALL).unwrap();
        twice.io.loan(PinSet::ALL).unwrap();

        prop_assert_eq!(once.phys.generalio(), twice.phys.generalio());
    }

    #[test]
    fn loan_then_restore_keeps_non_mask_bits(v in any::<u32>()) {
        let mut rig = Rig::new(v);

        let loaned = rig.io.loan(PinSet::ALL).unwrap();
        prop_assert_eq!(loaned.after() & !LOAN_MASK, v & !LOAN_MASK);

        let restored = rig.io.restore(PinSet::ALL).unwrap();
        prop_assert_eq!(restored.before(), loaned.after());
        prop_assert_eq!(rig.phys.generalio(), v & !LOAN_MASK);
    }

    #[test]
    fn status_reports_loaned_iff_bit_set(v in any::<u32>()) {
        let mut rig = Rig::new(v);
        let status = rig.io.status().unwrap();
        for gpio in 48..=53_u8 {
            let pin = Pin::new(gpio).unwrap();
            let bit_set = v & (1 << (gpio - 32)) != 0;
            prop_assert_eq!(status.state(pin) == PinState::Loaned, bit_set);
        }
        prop_assert_eq!(rig.phys.generalio(), v);
    }
}

// ============================================================================
// Failure Path
// ============================================================================

#[test]
fn device_failures_leave_register_untouched() {
    for failure in [MockFailure::Open(Some(13)), MockFailure::Map(Some(22))] {
        let mut rig = Rig::new(0xA5A5_A5A5);
        rig.phys.fail(failure);

        let loan = rig.io.loan(PinSet::ALL);
        let restore = rig.io.restore(PinSet::ALL);
        let status = rig.io.status();

        for result in [loan.map(|_| ()), restore.map(|_| ()), status.map(|_| ())] {
            assert!(matches!(
                result,
                Err(LoanError::DeviceUnavailable { .. } | LoanError::MappingFailed { .. })
            ));
        }
        assert_eq!(rig.phys.generalio(), 0xA5A5_A5A5);
        assert_eq!(rig.phys.counters().writes, 0);
        assert_eq!(rig.phys.counters().open_handles(), 0);
        assert_eq!(rig.output().lines().count(), 3);
        assert!(rig.output().lines().all(|line| line.starts_with("Error: ")));
    }
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn status_unmaps_and_next_operation_maps_afresh() {
    let mut rig = Rig::new(0);

    rig.io.status().unwrap();
    assert!(!rig.io.is_mapped());
    assert!(!rig.phys.is_mapped());
    let after_status = rig.phys.counters();

    rig.io.loan(PinSet::ALL).unwrap();
    let after_loan = rig.phys.counters();
    assert_eq!(after_loan.opens, after_status.opens + 1);
    assert_eq!(after_loan.maps, after_status.maps + 1);
    assert_eq!(after_loan.live_mappings(), 0);
}

#[test]
fn concurrent_writer_between_sessions_is_visible() {
    let mut rig = Rig::new(0);
    rig.io.loan(PinSet::ALL).unwrap();

    // Another bus master flips an unrelated bit.
    rig.phys.set_generalio(rig.phys.generalio() | 0x0000_0001);

    rig.io.restore(PinSet::ALL).unwrap();
    assert_eq!(rig.phys.generalio(), 0x0000_0001);
}
