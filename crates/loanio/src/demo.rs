// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Example usage sequence shipped with MiSTer cores that use loaned GPIO.
//!
//! Shows the initial pin state, loans GPIO 48-53 to the FPGA, shows the state
//! again and prints wiring hints. The pins stay loaned afterwards; MiSTer
//! cores normally never hand them back.

use std::io::Write;

use loanio_abi::PinSet;
use tracing::debug;

use crate::LoanError;
use crate::iomgr::LoanIo;
use crate::platform::PhysMemory;

/// Run the example sequence.
///
/// A device failure in one step is printed and the sequence moves on, the
/// same as calling each operation by hand.
///
/// # Errors
///
/// Returns [`LoanError::Output`] if the operator sink fails.
pub fn run<P: PhysMemory, W: Write>(io: &mut LoanIo<P, W>) -> Result<(), LoanError> {
    io.say("=== LoanIO Example Usage ===")?;

    io.say("\n1. Initial GPIO status:")?;
    step(io.status())?;

    io.say("\n2. Loaning GPIO to FPGA:")?;
    step(io.loan(PinSet::ALL))?;

    io.say("\n3. GPIO status after loaning:")?;
    step(io.status())?;

    io.say("\n4. FPGA can now control these pins via USER_LED and USER_BTN signals")?;
    io.say("   Connect LEDs to GPIO 48-51 and buttons to GPIO 52-53")?;
    io.say("   Use buttons to rotate LED patterns!")?;

    Ok(())
}

/// Swallow device errors (already printed), keep output errors.
fn step<T>(result: Result<T, LoanError>) -> Result<(), LoanError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.is_device() => {
            debug!(%err, "demo step failed, continuing");
            Ok(())
        }
        Err(err) => Err(err),
    }
}
