// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for pin and pin set types.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::pin::{Pin, PinSet};
use crate::layout::LOAN_MASK;

#[test]
fn pin_bounds() {
    assert!(Pin::new(47).is_none());
    assert!(Pin::new(48).is_some());
    assert!(Pin::new(53).is_some());
    assert!(Pin::new(54).is_none());
    assert!(Pin::new(0).is_none());
}

#[test]
fn pin_bit_is_gpio_minus_32() {
    for pin in Pin::ALL {
        assert_eq!(pin.bit(), u32::from(pin.number()) - 32);
    }
    assert_eq!(Pin::new(48).unwrap().mask(), 0x0001_0000);
    assert_eq!(Pin::new(53).unwrap().mask(), 0x0020_0000);
}

#[test]
fn pin_loaned_in_register_value() {
    let gpio50 = Pin::new(50).unwrap();
    assert!(gpio50.is_loaned_in(0x0004_0000));
    assert!(!gpio50.is_loaned_in(0xFFFB_FFFF));
}

#[test]
fn pin_display() {
    assert_eq!(format!("{}", Pin::new(49).unwrap()), "GPIO 49");
    assert_eq!(format!("{:?}", Pin::new(49).unwrap()), "Pin(49)");
}

#[test]
fn pin_set_all_is_loan_mask() {
    assert_eq!(PinSet::ALL.mask(), LOAN_MASK);
    assert_eq!(PinSet::ALL.len(), 6);
    assert_eq!(Pin::ALL.into_iter().collect::<PinSet>(), PinSet::ALL);
}

#[test]
fn pin_set_from_mask_rejects_foreign_bits() {
    assert_eq!(PinSet::from_mask(0x0003_0000).map(PinSet::len), Some(2));
    assert!(PinSet::from_mask(0x0040_0000).is_none());
    assert!(PinSet::from_mask(0x0000_8000).is_none());
    assert_eq!(PinSet::from_mask(0), Some(PinSet::EMPTY));
}

#[test]
fn pin_set_loaned_in_ignores_other_bits() {
    let set = PinSet::loaned_in(0xFFC5_FFFF);
    assert_eq!(set.mask(), 0x0005_0000);
    assert!(set.contains(Pin::new(48).unwrap()));
    assert!(!set.contains(Pin::new(49).unwrap()));
    assert!(set.contains(Pin::new(50).unwrap()));
}

#[test]
fn pin_set_with_and_without() {
    let gpio51 = Pin::new(51).unwrap();
    let set = PinSet::EMPTY.with(gpio51);
    assert!(set.contains(gpio51));
    assert_eq!(set.len(), 1);
    assert!(set.without(gpio51).is_empty());
    assert_eq!(PinSet::from(gpio51), set);
}

#[test]
fn pin_set_iterates_in_order() {
    let numbers: Vec<u8> = PinSet::ALL.iter().map(Pin::number).collect();
    assert_eq!(numbers, [48, 49, 50, 51, 52, 53]);
    assert_eq!(PinSet::EMPTY.iter().count(), 0);
}

#[test]
fn pin_set_contiguity() {
    assert!(PinSet::ALL.is_contiguous());
    assert!(PinSet::from_mask(0x000C_0000).unwrap().is_contiguous());
    assert!(!PinSet::from_mask(0x0005_0000).unwrap().is_contiguous());
    assert!(!PinSet::EMPTY.is_contiguous());
}

#[test]
fn pin_set_display() {
    assert_eq!(format!("{}", PinSet::ALL), "48-53");
    assert_eq!(format!("{}", PinSet::from_mask(0x0001_0000).unwrap()), "48");
    assert_eq!(format!("{}", PinSet::from_mask(0x000F_0000).unwrap()), "48-51");
    assert_eq!(format!("{}", PinSet::from_mask(0x0025_0000).unwrap()), "48,50,53");
    assert_eq!(format!("{}", PinSet::EMPTY), "none");
}
