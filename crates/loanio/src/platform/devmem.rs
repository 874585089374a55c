// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! `/dev/mem` register backend.
//!
//! Opens the physical memory device with `O_RDWR | O_SYNC` so register
//! accesses are uncached, and maps pages `MAP_SHARED` at their physical
//! address. Requires root (or `CAP_SYS_RAWIO`).

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::PathBuf;
use std::ptr::{self, NonNull};

use loanio_abi::Paddr;
use tracing::{debug, warn};

use super::traits::{PhysMemory, RegisterWindow, check_access};
use crate::LoanError;

/// Physical memory through the `/dev/mem` character device.
#[derive(Debug, Clone)]
pub struct DevMem {
    path: PathBuf,
}

impl DevMem {
    /// Default path of the physical memory device.
    pub const PATH: &'static str = "/dev/mem";

    /// Use the system `/dev/mem`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_path(Self::PATH)
    }

    /// Use a different device node (e.g. a UIO device exposing the same page).
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for DevMem {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysMemory for DevMem {
    type Window = DevMemWindow;

    fn map(&mut self, base: Paddr, len: u64) -> Result<Self::Window, LoanError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(&self.path)
            .map_err(|err| {
                warn!(path = %self.path.display(), %err, "cannot open physical memory device");
                LoanError::DeviceUnavailable {
                    errno: err.raw_os_error(),
                }
            })?;

        let Ok(map_len) = usize::try_from(len) else {
            warn!(len, "mapping length exceeds address space");
            return Err(LoanError::MappingFailed {
                errno: Some(libc::EINVAL),
            });
        };

        // 32-bit ARM has a 32-bit off_t; the kernel reinterprets the wrapped
        // value as an unsigned page offset, same as C callers passing 0xFFD05000.
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let offset = base.as_u64() as libc::off_t;

        // SAFETY: We request a fresh mapping (addr = NULL) backed by a file
        // descriptor that stays open for the duration of the call.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                map_len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                offset,
            )
        };

        if addr == libc::MAP_FAILED {
            let err = io::Error::last_os_error();
            warn!(%base, len, %err, "cannot map physical register page");
            // Dropping `file` closes the device handle.
            return Err(LoanError::MappingFailed {
                errno: err.raw_os_error(),
            });
        }

        let Some(addr) = NonNull::new(addr.cast::<u8>()) else {
            return Err(LoanError::MappingFailed { errno: None });
        };

        debug!(%base, len, vaddr = ?addr, "mapped physical register page");
        Ok(DevMemWindow {
            addr,
            len,
            map_len,
            _file: file,
        })
    }
}

/// A live `/dev/mem` mapping.
///
/// Unmaps on drop, then closes the device handle.
#[derive(Debug)]
pub struct DevMemWindow {
    addr: NonNull<u8>,
    len: u64,
    map_len: usize,
    _file: File,
}

impl RegisterWindow for DevMemWindow {
    fn read32(&self, offset: u64) -> u32 {
        let index = check_access(offset, self.len);
        // SAFETY: `check_access` keeps the 4-byte access inside the mapping,
        // and mmap returns page-aligned addresses so the word is aligned.
        unsafe { self.addr.as_ptr().add(index).cast::<u32>().read_volatile() }
    }

    fn write32(&mut self, offset: u64, value: u32) {
        let index = check_access(offset, self.len);
        // SAFETY: See `read32`.
        unsafe {
            self.addr
                .as_ptr()
                .add(index)
                .cast::<u32>()
                .write_volatile(value);
        }
    }

    fn len(&self) -> u64 {
        self.len
    }
}

impl Drop for DevMemWindow {
    fn drop(&mut self) {
        // SAFETY: `addr`/`map_len` describe a mapping created by `DevMem::map`
        // that nothing else unmaps.
        let result = unsafe { libc::munmap(self.addr.as_ptr().cast(), self.map_len) };
        if result == 0 {
            debug!(vaddr = ?self.addr, "unmapped physical register page");
        } else {
            warn!(err = %io::Error::last_os_error(), "munmap failed");
        }
    }
}
