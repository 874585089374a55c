// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Errors reported by LoanIO operations.
//!
//! None of these are fatal: the operator is told, the mapping is unwound,
//! and control returns to the caller.

use std::io;

/// Errors that can occur while accessing the IOMGR register page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanError {
    /// The privileged memory device could not be opened.
    ///
    /// Almost always a missing root privilege; busy or unsupported devices
    /// land here as well.
    DeviceUnavailable {
        /// OS error number, if the backend reported one.
        errno: Option<i32>,
    },
    /// The device opened but the register page could not be mapped.
    MappingFailed {
        /// OS error number, if the backend reported one.
        errno: Option<i32>,
    },
    /// Operator output could not be written.
    Output(io::ErrorKind),
}

impl LoanError {
    /// Whether this error came from the memory device rather than the output sink.
    #[inline]
    #[must_use]
    pub const fn is_device(&self) -> bool {
        matches!(
            self,
            Self::DeviceUnavailable { .. } | Self::MappingFailed { .. }
        )
    }

    /// OS error number attached to a device error.
    #[inline]
    #[must_use]
    pub const fn errno(&self) -> Option<i32> {
        match *self {
            Self::DeviceUnavailable { errno } | Self::MappingFailed { errno } => errno,
            Self::Output(_) => None,
        }
    }
}

impl core::fmt::Display for LoanError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DeviceUnavailable { .. } => {
                write!(f, "Cannot open /dev/mem (need root privileges)")
            }
            Self::MappingFailed { .. } => write!(f, "Cannot map IOMGR registers"),
            Self::Output(kind) => write!(f, "cannot write operator output: {kind}"),
        }
    }
}

impl std::error::Error for LoanError {}

impl From<io::Error> for LoanError {
    fn from(err: io::Error) -> Self {
        Self::Output(err.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_errors_use_operator_text() {
        let open = LoanError::DeviceUnavailable { errno: Some(13) };
        let map = LoanError::MappingFailed { errno: None };
        assert_eq!(
            format!("{open}"),
            "Cannot open /dev/mem (need root privileges)"
        );
        assert_eq!(format!("{map}"), "Cannot map IOMGR registers");
    }

    #[test]
    fn errno_only_on_device_errors() {
        assert_eq!(LoanError::DeviceUnavailable { errno: Some(13) }.errno(), Some(13));
        assert_eq!(LoanError::MappingFailed { errno: Some(22) }.errno(), Some(22));
        assert_eq!(LoanError::Output(io::ErrorKind::BrokenPipe).errno(), None);
    }

    #[test]
    fn io_errors_become_output_errors() {
        let err = LoanError::from(io::Error::from(io::ErrorKind::BrokenPipe));
        assert_eq!(err, LoanError::Output(io::ErrorKind::BrokenPipe));
        assert!(!err.is_device());
        assert!(LoanError::MappingFailed { errno: None }.is_device());
    }
}
