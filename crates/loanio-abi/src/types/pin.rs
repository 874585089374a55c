// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Loanable GPIO pins and pin sets.
//!
//! A [`Pin`] can only hold a GPIO number in `48..=53`, and a [`PinSet`] can
//! only hold such pins, so every mask derived from them stays inside
//! [`LOAN_MASK`].

use core::fmt;

use crate::layout::{FIRST_LOAN_PIN, LAST_LOAN_PIN, LOAN_MASK, PIN_BIT_BASE};

/// A GPIO line whose ownership can be loaned to the FPGA.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Pin(u8);

impl Pin {
    /// All loanable pins in ascending order.
    pub const ALL: [Self; 6] = [
        Self(48),
        Self(49),
        Self(50),
        Self(51),
        Self(52),
        Self(53),
    ];

    /// Create a pin from its GPIO number.
    ///
    /// Returns `None` if the GPIO cannot be loaned.
    #[inline]
    #[must_use]
    pub const fn new(gpio: u8) -> Option<Self> {
        if gpio >= FIRST_LOAN_PIN && gpio <= LAST_LOAN_PIN {
            Some(Self(gpio))
        } else {
            None
        }
    }

    /// GPIO number of this pin.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Bit position of this pin in `GENERALIO`.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u32 {
        (self.0 - PIN_BIT_BASE) as u32
    }

    /// Single-bit `GENERALIO` mask for this pin.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u32 {
        1 << self.bit()
    }

    /// Whether this pin is loaned to the FPGA in the given register value.
    #[inline]
    #[must_use]
    pub const fn is_loaned_in(self, generalio: u32) -> bool {
        (generalio >> self.bit()) & 1 == 1
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pin({})", self.0)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO {}", self.0)
    }
}

/// A set of loanable pins, stored as its `GENERALIO` mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct PinSet(u32);

impl PinSet {
    /// No pins.
    pub const EMPTY: Self = Self(0);

    /// Every loanable pin (GPIO 48-53).
    pub const ALL: Self = Self(LOAN_MASK);

    /// Create a set from a `GENERALIO` mask.
    ///
    /// Returns `None` if the mask has bits outside [`LOAN_MASK`].
    #[inline]
    #[must_use]
    pub const fn from_mask(mask: u32) -> Option<Self> {
        if mask & !LOAN_MASK == 0 {
            Some(Self(mask))
        } else {
            None
        }
    }

    /// The pins currently loaned according to a raw register value.
    #[inline]
    #[must_use]
    pub const fn loaned_in(generalio: u32) -> Self {
        Self(generalio & LOAN_MASK)
    }

    /// `GENERALIO` mask of this set. Always a subset of [`LOAN_MASK`].
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u32 {
        self.0
    }

    /// Return this set with `pin` added.
    #[inline]
    #[must_use]
    pub const fn with(self, pin: Pin) -> Self {
        Self(self.0 | pin.mask())
    }

    /// Return this set with `pin` removed.
    #[inline]
    #[must_use]
    pub const fn without(self, pin: Pin) -> Self {
        Self(self.0 & !pin.mask())
    }

    /// Check if `pin` is in this set.
    #[inline]
    #[must_use]
    pub const fn contains(self, pin: Pin) -> bool {
        self.0 & pin.mask() != 0
    }

    /// Number of pins in this set.
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Check if this set has no pins.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if the pins form one unbroken GPIO range.
    #[inline]
    #[must_use]
    pub const fn is_contiguous(self) -> bool {
        if self.0 == 0 {
            return false;
        }
        let shifted = self.0 >> self.0.trailing_zeros();
        shifted & (shifted + 1) == 0
    }

    /// Iterate over the pins in ascending GPIO order.
    #[inline]
    #[must_use]
    pub const fn iter(self) -> PinSetIter {
        PinSetIter { set: self, next: 0 }
    }
}

impl From<Pin> for PinSet {
    fn from(pin: Pin) -> Self {
        Self::EMPTY.with(pin)
    }
}

impl FromIterator<Pin> for PinSet {
    fn from_iter<I: IntoIterator<Item = Pin>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl IntoIterator for PinSet {
    type Item = Pin;
    type IntoIter = PinSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for PinSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PinSet({:#010x})", self.0)
    }
}

/// Formats as the GPIO numbers: `48-53` for a range, `48,50` otherwise.
impl fmt::Display for PinSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pins = self.iter();
        let Some(first) = pins.next() else {
            return write!(f, "none");
        };

        if self.is_contiguous() {
            return match pins.last() {
                Some(last) => write!(f, "{}-{}", first.number(), last.number()),
                None => write!(f, "{}", first.number()),
            };
        }

        write!(f, "{}", first.number())?;
        for pin in pins {
            write!(f, ",{}", pin.number())?;
        }
        Ok(())
    }
}

/// Iterator over the pins of a [`PinSet`].
#[derive(Debug, Clone)]
pub struct PinSetIter {
    set: PinSet,
    next: usize,
}

impl Iterator for PinSetIter {
    type Item = Pin;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&pin) = Pin::ALL.get(self.next) {
            self.next += 1;
            if self.set.contains(pin) {
                return Some(pin);
            }
        }
        None
    }
}
