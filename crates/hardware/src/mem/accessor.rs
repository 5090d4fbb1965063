//! Typed 32-bit register access.
//!
//! `RegisterAccessor` turns a physical register address into a volatile
//! 32-bit read or write through the page cache, hiding the page-offset
//! arithmetic from call sites. Values are never cached: every read goes to
//! the hardware.
//!
//! Read-modify-write helpers are provided for the common "change one field,
//! keep the rest" pattern. They are not atomic with respect to other
//! processes or to interrupt handlers touching the same register.

use std::ptr::NonNull;

use tracing::trace;

use super::cache::PageMapCache;
use super::devmem::DevMem;
use super::phys::PhysMemory;
use crate::common::constants::REGISTER_BYTES;
use crate::common::{MAP_LEN, MapError, PhysAddr};

/// Outcome of a read-modify-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegUpdate {
    /// Value read from the register.
    pub old: u32,
    /// Value the register holds afterwards.
    pub new: u32,
}

impl RegUpdate {
    /// Returns `true` if the register was written back.
    pub const fn written(&self) -> bool {
        self.old != self.new
    }
}

/// A borrowed view of a [`PageMapCache`] for reading and writing registers.
///
/// Addresses must be 4-byte aligned. An unaligned address is a caller bug
/// and panics before anything is mapped.
#[derive(Debug)]
pub struct RegisterAccessor<'a, M: PhysMemory = DevMem> {
    cache: &'a mut PageMapCache<M>,
}

impl<'a, M: PhysMemory> RegisterAccessor<'a, M> {
    /// Wraps `cache` for register access.
    pub const fn new(cache: &'a mut PageMapCache<M>) -> Self {
        Self { cache }
    }

    fn register(&mut self, addr: PhysAddr) -> Result<NonNull<u32>, MapError> {
        assert!(addr.is_word_aligned(), "unaligned register address {addr}");
        let offset = addr.page_offset();
        assert!(offset + REGISTER_BYTES <= MAP_LEN, "register {addr} crosses its page");
        let page = self.cache.acquire(addr)?;
        // SAFETY: `page` points to a live MAP_LEN-byte mapping and
        // `offset + 4 <= MAP_LEN` was checked above.
        Ok(unsafe { page.add(offset) }.cast::<u32>())
    }

    /// Reads the 32-bit register at `addr`.
    ///
    /// # Errors
    ///
    /// Propagates any [`MapError`] from mapping the register's page.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not 4-byte aligned.
    pub fn read32(&mut self, addr: PhysAddr) -> Result<u32, MapError> {
        let reg = self.register(addr)?;
        // SAFETY: `reg` is in bounds of the live mapping and 4-byte aligned
        // (page-aligned base plus word-aligned offset).
        let val = unsafe { reg.read_volatile() };
        trace!(%addr, val = format_args!("{val:#010x}"), "read32");
        Ok(val)
    }

    /// Writes `val` to the 32-bit register at `addr`.
    ///
    /// No read-modify-write is performed; see [`modify32`](Self::modify32).
    ///
    /// # Errors
    ///
    /// Propagates any [`MapError`] from mapping the register's page.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not 4-byte aligned.
    pub fn write32(&mut self, addr: PhysAddr, val: u32) -> Result<(), MapError> {
        let reg = self.register(addr)?;
        trace!(%addr, val = format_args!("{val:#010x}"), "write32");
        // SAFETY: see `read32`.
        unsafe { reg.write_volatile(val) };
        Ok(())
    }

    /// Clears the bits in `clear`, then sets the bits in `set`.
    ///
    /// The register is read once and written back only when the new value
    /// differs from the one read. The returned [`RegUpdate`] carries both
    /// values, so callers never need a second read to report the result.
    ///
    /// # Errors
    ///
    /// Propagates any [`MapError`] from mapping the register's page.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not 4-byte aligned.
    pub fn update32(
        &mut self,
        addr: PhysAddr,
        clear: u32,
        set: u32,
    ) -> Result<RegUpdate, MapError> {
        let old = self.read32(addr)?;
        let update = RegUpdate {
            old,
            new: (old & !clear) | set,
        };
        if update.written() {
            self.write32(addr, update.new)?;
        } else {
            trace!(%addr, "modify32 left register unchanged");
        }
        Ok(update)
    }

    /// Like [`update32`](Self::update32), returning `true` if a write was issued.
    ///
    /// # Errors
    ///
    /// Propagates any [`MapError`] from mapping the register's page.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not 4-byte aligned.
    pub fn modify32(&mut self, addr: PhysAddr, clear: u32, set: u32) -> Result<bool, MapError> {
        self.update32(addr, clear, set).map(|update| update.written())
    }

    /// Sets the bits in `mask`, writing only if any were clear.
    ///
    /// # Errors
    ///
    /// Propagates any [`MapError`] from mapping the register's page.
    pub fn set_bits32(&mut self, addr: PhysAddr, mask: u32) -> Result<bool, MapError> {
        self.modify32(addr, 0, mask)
    }

    /// Clears the bits in `mask`, writing only if any were set.
    ///
    /// # Errors
    ///
    /// Propagates any [`MapError`] from mapping the register's page.
    pub fn clear_bits32(&mut self, addr: PhysAddr, mask: u32) -> Result<bool, MapError> {
        self.modify32(addr, mask, 0)
    }

    /// Returns the underlying cache.
    pub const fn cache(&self) -> &PageMapCache<M> {
        &*self.cache
    }
}

impl<M: PhysMemory> PageMapCache<M> {
    /// Borrows the cache as a [`RegisterAccessor`].
    pub const fn regs(&mut self) -> RegisterAccessor<'_, M> {
        RegisterAccessor::new(self)
    }
}
