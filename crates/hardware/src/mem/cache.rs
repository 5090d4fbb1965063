//! Single-slot page mapping cache.
//!
//! Register accesses on these SoCs cluster heavily: the mode, status, and
//! data registers of one PIO bank or of the PMC share a 4 KiB page. The
//! cache keeps the most recently mapped page alive and only goes back to the
//! OS when an access lands in a different page.
//!
//! At most one mapping is live at any time. Switching pages unmaps the old
//! page before mapping the new one.

use std::fmt;
use std::ptr::NonNull;

use tracing::{debug, trace, warn};

use super::devmem::DevMem;
use super::phys::{MappedPage, PhysMemory};
use crate::common::{MapError, PhysAddr};
use crate::stats::MapStats;

struct Slot<P> {
    base: PhysAddr,
    page: P,
}

/// Caches the single most recently mapped physical page.
///
/// The backend handle is owned for the lifetime of the cache. Dropping the
/// cache releases the live mapping; call [`PageMapCache::release`] first to
/// observe unmap errors.
///
/// There is no locking against other processes touching the same registers.
pub struct PageMapCache<M: PhysMemory = DevMem> {
    mem: M,
    slot: Option<Slot<M::Page>>,
    stats: MapStats,
}

impl<M: PhysMemory> PageMapCache<M> {
    /// Creates an empty cache over `mem`. No mapping is made until the first acquire.
    pub fn new(mem: M) -> Self {
        Self {
            mem,
            slot: None,
            stats: MapStats::default(),
        }
    }

    /// Returns a pointer to the start of the mapped page containing `addr`.
    ///
    /// Reuses the live mapping when `addr` falls in the same page; otherwise
    /// unmaps it and maps the new page. The caller adds
    /// `addr.page_offset()` to reach a specific register.
    ///
    /// The pointer is valid for `PAGE_SIZE` bytes until the next `acquire`
    /// for a different page, [`release`](Self::release), or drop.
    ///
    /// # Errors
    ///
    /// - [`MapError::UnmapFailed`] if the previous page could not be unmapped.
    ///   The slot is left empty.
    /// - [`MapError::MapFailed`] if the new page could not be mapped. The slot
    ///   is left empty and a later call retries from scratch.
    pub fn acquire(&mut self, addr: PhysAddr) -> Result<NonNull<u8>, MapError> {
        let base = addr.page_base();

        if let Some(slot) = &self.slot
            && slot.base == base
        {
            self.stats.hits += 1;
            trace!(%addr, page = %base, "page cache hit");
            return Ok(slot.page.as_ptr());
        }

        self.unmap_current()?;

        let page = self
            .mem
            .map_page(base)
            .map_err(|source| MapError::MapFailed { page: base, source })?;
        self.stats.maps += 1;
        debug!(%addr, page = %base, "mapped page");

        let ptr = page.as_ptr();
        self.slot = Some(Slot { base, page });
        Ok(ptr)
    }

    /// Unmaps the live page, if any.
    ///
    /// Idempotent: succeeds without doing anything when nothing is mapped.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnmapFailed`] when `munmap` fails. The slot is
    /// empty afterwards regardless.
    pub fn release(&mut self) -> Result<(), MapError> {
        self.unmap_current()
    }

    fn unmap_current(&mut self) -> Result<(), MapError> {
        let Some(Slot { base, page }) = self.slot.take() else {
            return Ok(());
        };
        page.unmap()
            .map_err(|source| MapError::UnmapFailed { page: base, source })?;
        self.stats.unmaps += 1;
        debug!(page = %base, "unmapped page");
        Ok(())
    }

    /// Returns the base of the currently mapped page, if any.
    pub fn mapped_page(&self) -> Option<PhysAddr> {
        self.slot.as_ref().map(|slot| slot.base)
    }

    /// Returns `true` while a page is mapped.
    pub const fn is_mapped(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns the mapping counters accumulated so far.
    pub const fn stats(&self) -> MapStats {
        self.stats
    }

    /// Returns the backend.
    pub const fn mem(&self) -> &M {
        &self.mem
    }

    /// Returns the backend mutably.
    ///
    /// Mapping through the backend directly bypasses the cache.
    pub const fn mem_mut(&mut self) -> &mut M {
        &mut self.mem
    }
}

impl<M: PhysMemory + fmt::Debug> fmt::Debug for PageMapCache<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageMapCache")
            .field("mem", &self.mem)
            .field("mapped_page", &self.mapped_page())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<M: PhysMemory> Drop for PageMapCache<M> {
    fn drop(&mut self) {
        if let Err(err) = self.unmap_current() {
            warn!(%err, "releasing page mapping on drop");
        }
    }
}
