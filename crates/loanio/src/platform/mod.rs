// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Platform abstraction for physical register access.
//!
//! The only unsafe, platform-specific step in LoanIO is mapping physical
//! memory and touching it with volatile loads and stores. This module puts
//! that behind [`PhysMemory`] and [`RegisterWindow`] so the register logic
//! can be tested on the development host.


#[cfg(all(unix, feature = "devmem"))]
mod devmem;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod traits;

#[cfg(all(unix, feature = "devmem"))]
pub use devmem::{DevMem, DevMemWindow};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCounters, MockFailure, MockPhysMemory, MockWindow};
pub use traits::{PhysMemory, RegisterWindow};
