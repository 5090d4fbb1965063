//! `/dev/mem` backend.
//!
//! This module maps physical pages through the Linux physical-memory
//! character device. It provides:
//! 1. **Device Handle:** `DevMem`, an open read-write descriptor (with `O_SYNC` by default).
//! 2. **Page Mapping:** `DevMemPage`, a `MAP_SHARED` mapping released by `munmap` on drop.
//!
//! Any regular file can stand in for the device; the mapping offset is then a
//! file offset instead of a physical address.

use std::fs::{File, OpenOptions};
use std::io;
use std::mem::ManuallyDrop;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::ptr::{self, NonNull};

use tracing::{debug, warn};

use super::phys::{MappedPage, PhysMemory};
use crate::common::{MAP_LEN, PhysAddr};

/// An open handle to a physical-memory device.
#[derive(Debug)]
pub struct DevMem {
    file: File,
    path: PathBuf,
}

impl DevMem {
    /// Opens `path` read-write with `O_SYNC`.
    ///
    /// # Errors
    ///
    /// Returns the OS error from `open(2)`, typically `PermissionDenied` when
    /// not running as root.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::open_with(path, true)
    }

    /// Opens `path` read-write, adding `O_SYNC` when `sync` is set.
    ///
    /// # Errors
    ///
    /// Returns the OS error from `open(2)`.
    pub fn open_with(path: impl AsRef<Path>, sync: bool) -> io::Result<Self> {
        let path = path.as_ref();
        let flags = if sync { libc::O_SYNC } else { 0 };
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(flags)
            .open(path)?;
        debug!(path = %path.display(), sync, "opened physical memory device");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Returns the path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PhysMemory for DevMem {
    type Page = DevMemPage;

    fn map_page(&mut self, page: PhysAddr) -> io::Result<DevMemPage> {
        // SAFETY: a fresh mapping is requested (null hint, no MAP_FIXED), so no
        // existing memory of this process is affected. The descriptor is open
        // read-write for as long as `self` lives; the mapping outlives it safely.
        let ptr = unsafe { mmap_shared(self.file.as_raw_fd(), page)? };
        NonNull::new(ptr.cast::<u8>())
            .map(|ptr| DevMemPage { ptr, page })
            .ok_or_else(|| io::Error::other("mmap returned a null mapping"))
    }
}

/// Calls `mmap` for one `MAP_LEN` shared read-write page at the offset of `page`.
///
/// On 32-bit glibc targets the 64-bit offset variant is used so that
/// addresses above 2 GiB (all SAMA5 peripherals) do not overflow `off_t`.
///
/// # Safety
///
/// `fd` must be an open descriptor.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
unsafe fn mmap_shared(fd: libc::c_int, page: PhysAddr) -> io::Result<*mut libc::c_void> {
    let offset = libc::off64_t::try_from(page.mmap_offset())
        .map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;
    // SAFETY: forwarded from the caller.
    let ptr = unsafe {
        libc::mmap64(
            ptr::null_mut(),
            MAP_LEN,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_SHARED,
            fd,
            offset,
        )
    };
    if ptr == libc::MAP_FAILED {
        Err(io::Error::last_os_error())
    } else {
        Ok(ptr)
    }
}

/// Calls `mmap` for one `MAP_LEN` shared read-write page at the offset of `page`.
///
/// # Safety
///
/// `fd` must be an open descriptor.
#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
unsafe fn mmap_shared(fd: libc::c_int, page: PhysAddr) -> io::Result<*mut libc::c_void> {
    let offset = libc::off_t::try_from(page.mmap_offset())
        .map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;
    // SAFETY: forwarded from the caller.
    let ptr = unsafe {
        libc::mmap(
            ptr::null_mut(),
            MAP_LEN,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_SHARED,
            fd,
            offset,
        )
    };
    if ptr == libc::MAP_FAILED {
        Err(io::Error::last_os_error())
    } else {
        Ok(ptr)
    }
}

/// A live `MAP_SHARED` mapping of one physical page.
#[derive(Debug)]
pub struct DevMemPage {
    ptr: NonNull<u8>,
    page: PhysAddr,
}

impl DevMemPage {
    /// Returns the physical page base this mapping covers.
    pub const fn page(&self) -> PhysAddr {
        self.page
    }

    /// Unmaps the region.
    ///
    /// # Safety
    ///
    /// Must be called at most once per mapping, and no pointer derived from
    /// `self.ptr` may be used afterwards.
    unsafe fn munmap(&self) -> io::Result<()> {
        // SAFETY: `ptr` came from a successful MAP_LEN mmap; forwarded from the caller.
        let rc = unsafe { libc::munmap(self.ptr.as_ptr().cast(), MAP_LEN) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

impl MappedPage for DevMemPage {
    fn as_ptr(&self) -> NonNull<u8> {
        self.ptr
    }

    fn unmap(self) -> io::Result<()> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so this is the only munmap of the mapping.
        unsafe { this.munmap() }
    }
}

impl Drop for DevMemPage {
    /// Unmaps the page, logging instead of failing if `munmap` reports an error.
    fn drop(&mut self) {
        // SAFETY: `unmap` bypasses drop, so this is the only munmap of the mapping.
        if let Err(err) = unsafe { self.munmap() } {
            warn!(page = %self.page, %err, "munmap failed while dropping mapping");
        }
    }
}
