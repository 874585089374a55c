// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Core type definitions for physical addresses and managed GPIO pins.
//!
//! These newtypes keep raw integers from being mixed up with register bits.

mod addr;
mod pin;

#[cfg(test)]
mod pin_test;

pub use addr::Paddr;
pub use pin::{Pin, PinSet, PinSetIter};
